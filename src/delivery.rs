//! Inquiry delivery boundary.
//!
//! The real transport (email service, ticketing system, CRM) is an
//! external collaborator. [`InquirySink`] is the seam; [`LogSink`]
//! records the inquiry as a structured log event and nothing more.

use thiserror::Error;
use tracing::info;

use crate::types::Inquiry;

/// Why an inquiry did not reach its destination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The destination refused the inquiry.
    #[error("inquiry rejected: {0}")]
    Rejected(String),

    /// The destination could not be reached.
    #[error("delivery unavailable: {0}")]
    Unavailable(String),
}

/// Destination for submitted inquiries.
pub trait InquirySink {
    fn deliver(&self, inquiry: &Inquiry) -> Result<(), DeliveryError>;
}

/// Records inquiries in the log. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl InquirySink for LogSink {
    fn deliver(&self, inquiry: &Inquiry) -> Result<(), DeliveryError> {
        info!(
            program = %inquiry.program_title,
            name = %inquiry.name,
            email = %inquiry.email,
            message = %inquiry.message,
            "contact inquiry submitted"
        );
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

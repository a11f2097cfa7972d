//! Contact form widget state.
//!
//! Pure state machine without I/O or timers. The effects layer delivers the
//! [`Inquiry`] and schedules the reset; this module only records the
//! outcome and decides what the form accepts in each phase.
//!
//! ```text
//!   Idle ──submit (all fields filled)──▶ Submitted{ticket} ──reset(ticket)──▶ Idle (cleared)
//!    ▲
//!    └── edit ── Failed{reason} ◀── delivery error
//! ```

use thiserror::Error;

use crate::types::Inquiry;

/// Text shown while the form is in the Submitted phase.
pub const CONFIRMATION: &str = "Message Sent! We'll get back to you shortly.";

/// Hint shown next to a required field left empty.
pub const REQUIRED_HINT: &str = "Please fill out this field.";

// ============================================================================
// FIELDS
// ============================================================================

/// The three required inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    /// Fields in tab order.
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Your Name",
            Field::Email => "Your Email",
            Field::Message => "Your specific question or request...",
        }
    }

    /// Only the message accepts line breaks.
    pub fn is_multiline(self) -> bool {
        self == Field::Message
    }
}

// ============================================================================
// PHASES
// ============================================================================

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormPhase {
    /// Fields editable, submit enabled.
    #[default]
    Idle,
    /// Confirmation shown, fields hidden. The ticket names the pending reset.
    Submitted { ticket: u64 },
    /// Delivery failed. Fields stay editable with an error banner.
    Failed { reason: String },
}

/// Why a submit attempt produced no inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{} is required", .0.label())]
    MissingField(Field),

    #[error("inquiry already sent")]
    AlreadySubmitted,
}

// ============================================================================
// FORM
// ============================================================================

/// Contact form for one program's modal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    phase: FormPhase,
    /// Field flagged by the last rejected submit.
    rejected: Option<Field>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn rejected(&self) -> Option<Field> {
        self.rejected
    }

    /// Fields are hidden while the confirmation is up.
    pub fn is_editable(&self) -> bool {
        !matches!(self.phase, FormPhase::Submitted { .. })
    }

    pub fn submitted_ticket(&self) -> Option<u64> {
        match self.phase {
            FormPhase::Submitted { ticket } => Some(ticket),
            _ => None,
        }
    }

    /// True when every field is empty.
    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|f| self.value(*f).is_empty())
    }

    /// Type a character. Newlines only reach multiline fields.
    ///
    /// Returns false when the edit was refused.
    pub fn insert(&mut self, field: Field, c: char) -> bool {
        let allowed = match c {
            '\n' => field.is_multiline(),
            c => !c.is_control(),
        };
        if !self.is_editable() || !allowed {
            return false;
        }
        self.value_mut(field).push(c);
        self.touched(field);
        true
    }

    /// Delete the last character of a field.
    pub fn backspace(&mut self, field: Field) -> bool {
        if !self.is_editable() {
            return false;
        }
        let removed = self.value_mut(field).pop().is_some();
        if removed {
            self.touched(field);
        }
        removed
    }

    /// An edit clears a stale failure banner and the hint on that field.
    fn touched(&mut self, field: Field) {
        if matches!(self.phase, FormPhase::Failed { .. }) {
            self.phase = FormPhase::Idle;
        }
        if self.rejected == Some(field) {
            self.rejected = None;
        }
    }

    /// Validate and build the payload for delivery.
    ///
    /// Does not change phase on success; the caller reports the delivery
    /// outcome through [`mark_submitted`](Self::mark_submitted) or
    /// [`mark_failed`](Self::mark_failed). On a missing field the first
    /// empty field is flagged.
    pub fn submit(&mut self, program_title: &str) -> Result<Inquiry, SubmitError> {
        if !self.is_editable() {
            return Err(SubmitError::AlreadySubmitted);
        }

        if let Some(missing) = Field::ALL.into_iter().find(|f| self.value(*f).is_empty()) {
            self.rejected = Some(missing);
            return Err(SubmitError::MissingField(missing));
        }

        self.rejected = None;
        Ok(Inquiry {
            program_title: program_title.to_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
        })
    }

    /// Delivery succeeded: show the confirmation until `ticket` is reset.
    pub fn mark_submitted(&mut self, ticket: u64) {
        self.phase = FormPhase::Submitted { ticket };
    }

    /// Delivery failed: keep the fields, show why.
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.phase = FormPhase::Failed {
            reason: reason.into(),
        };
    }

    /// Clear everything if `ticket` is the pending reset.
    ///
    /// A stale ticket (from a submission this form no longer shows) is
    /// ignored and returns false.
    pub fn reset(&mut self, ticket: u64) -> bool {
        if self.submitted_ticket() != Some(ticket) {
            return false;
        }
        *self = ContactForm::new();
        true
    }
}

// ============================================================================
// TESTS
// ============================================================================

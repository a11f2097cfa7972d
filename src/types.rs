//! Domain types for youth-programs.
//!
//! Plain data: program content records, the inquiry payload, and
//! run configuration. Behaviour lives in the modules that consume them.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============================================================================
// CONTENT RECORDS
// ============================================================================

/// A program card as shown in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramSummary {
    /// Unique key, also the card heading ("EVERYTHING POETRY").
    pub title: String,
    /// One-sentence blurb under the heading.
    pub short_description: String,
    /// Icon location, e.g. "/assets/images/poetry.png".
    pub icon_path: String,
}

/// Long-form content shown in the detail modal.
///
/// Keyed by `title`, which must match a [`ProgramSummary::title`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramDetail {
    pub title: String,
    /// Subtitle rendered under the program name in the hero header.
    pub long_title: String,
    /// Body text. May contain `**emphasis**` markers.
    pub long_description: String,
    /// Ordered checklist labels.
    pub focus_areas: Vec<String>,
    /// Tailwind-style colour token, e.g. "pink-500".
    pub accent_color: String,
}

// ============================================================================
// FORM PAYLOAD
// ============================================================================

/// What the contact form hands to the delivery boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub program_title: String,
    pub name: String,
    pub email: String,
    pub message: String,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for non-interactive commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

/// How long the confirmation stays up before the form clears.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(3000);

/// Configuration for the interactive browser.
#[derive(Debug, Clone)]
pub struct BrowseConfig {
    /// Delay between a successful submission and the form reset.
    pub reset_delay: Duration,
    /// Local directory holding the icon files. None = don't check.
    pub assets_dir: Option<PathBuf>,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            reset_delay: DEFAULT_RESET_DELAY,
            assets_dir: None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

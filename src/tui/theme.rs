//! TUI color semantics and style constants.
//!
//! Centralized theme definitions. Pure data, consumed by the rendering
//! layer for visual consistency.
//!
//! Color semantics:
//! - Fuchsia: brand, primary buttons, focus rings
//! - Accent: per-program colour from the catalog (checkmarks, hero)
//! - Green: confirmation after a sent inquiry
//! - Red: delivery failure, rejected field
//! - Dim: de-emphasized (hints, placeholders, icon names)

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// PALETTE
// ============================================================================

/// Brand colour (fuchsia-600); also the accent fallback.
pub const BRAND: Color = Color::Rgb(0xc0, 0x26, 0xd3);

/// Accent tokens the catalog may use, as Tailwind names with their 500 shades.
const ACCENTS: [(&str, Color); 7] = [
    ("blue-500", Color::Rgb(0x3b, 0x82, 0xf6)),
    ("pink-500", Color::Rgb(0xec, 0x48, 0x99)),
    ("green-500", Color::Rgb(0x22, 0xc5, 0x5e)),
    ("red-500", Color::Rgb(0xef, 0x44, 0x44)),
    ("amber-500", Color::Rgb(0xf5, 0x9e, 0x0b)),
    ("indigo-500", Color::Rgb(0x63, 0x66, 0xf1)),
    ("fuchsia-600", BRAND),
];

/// Resolve an accent token, if known.
pub fn accent(token: &str) -> Option<Color> {
    ACCENTS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, color)| *color)
}

/// Whether the theme can render this accent token.
pub fn is_known_accent(token: &str) -> bool {
    accent(token).is_some()
}

/// Accent colour with the brand fallback.
pub fn accent_or_brand(token: &str) -> Color {
    accent(token).unwrap_or(BRAND)
}

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Success / confirmation: green.
pub const STYLE_SAFE: Style = Style::new().fg(Color::Green);

/// Failure / rejection: red.
pub const STYLE_DANGER: Style = Style::new().fg(Color::Red);

/// Interactive element / keybinding hint: brand.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(BRAND);

/// De-emphasized metadata: dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Important text: bold.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / section heading.
pub const STYLE_TITLE: Style = Style::new().fg(BRAND).add_modifier(Modifier::BOLD);

/// Card heading.
pub const STYLE_CARD_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Border of the focused card or input.
pub const STYLE_FOCUS: Style = Style::new().fg(BRAND).add_modifier(Modifier::BOLD);

/// Border of an unfocused card or input.
pub const STYLE_BLUR: Style = Style::new().fg(Color::DarkGray);

/// Primary button.
pub const STYLE_BUTTON: Style = Style::new().fg(Color::White).bg(BRAND);

/// Primary button with focus.
pub const STYLE_BUTTON_FOCUS: Style = Style::new()
    .fg(Color::White)
    .bg(BRAND)
    .add_modifier(Modifier::BOLD.union(Modifier::REVERSED));

/// Input placeholder text.
pub const STYLE_PLACEHOLDER: Style = Style::new().fg(Color::DarkGray).add_modifier(Modifier::ITALIC);

/// Backdrop behind the modal.
pub const STYLE_BACKDROP: Style = Style::new().fg(Color::DarkGray);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================

//! Program icon locations and availability.
//!
//! Encodes the asset layout as named constants and reports icon
//! availability with explicit state instead of failing silently.
//!
//! Structure:
//! - Constants: asset base path, fallback glyph
//! - Types: icon availability (sum type)
//! - Pure functions: path construction
//! - Effect functions: filesystem checks

use std::path::{Path, PathBuf};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Base path every program icon lives under.
pub const ASSET_BASE: &str = "/assets/images/";

/// Icon file extension.
pub const ICON_EXTENSION: &str = "png";

/// Glyph drawn in place of an icon that could not be found.
pub const FALLBACK_GLYPH: &str = "✦";

// ============================================================================
// TYPES
// ============================================================================

/// Icon availability for one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconStatus {
    /// File found on disk.
    Available { path: PathBuf },
    /// Assets directory was given but the file is not in it.
    Missing { expected: PathBuf },
    /// No assets directory configured; nothing was checked.
    Unchecked,
}

impl IconStatus {
    pub fn is_missing(&self) -> bool {
        matches!(self, IconStatus::Missing { .. })
    }
}

// ============================================================================
// PURE FUNCTIONS
// ============================================================================

/// Icon path for a short asset name: "poetry" → "/assets/images/poetry.png".
pub fn icon_path(name: &str) -> String {
    format!("{ASSET_BASE}{name}.{ICON_EXTENSION}")
}

/// File name component of an icon path ("poetry.png").
pub fn icon_file_name(icon_path: &str) -> &str {
    icon_path.rsplit('/').next().unwrap_or(icon_path)
}

/// Map an icon path onto a local assets directory.
///
/// The web-root prefix is stripped so "/assets/images/poetry.png" under
/// root "site/public" becomes "site/public/assets/images/poetry.png".
pub fn local_icon_path(assets_root: &Path, icon_path: &str) -> PathBuf {
    assets_root.join(icon_path.trim_start_matches('/'))
}

// ============================================================================
// EFFECT FUNCTIONS
// ============================================================================

/// Check one icon against the assets directory, if any.
pub fn resolve_icon(assets_root: Option<&Path>, icon_path: &str) -> IconStatus {
    let Some(root) = assets_root else {
        return IconStatus::Unchecked;
    };

    let local = local_icon_path(root, icon_path);
    if local.is_file() {
        IconStatus::Available { path: local }
    } else {
        IconStatus::Missing { expected: local }
    }
}

impl std::fmt::Display for IconStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IconStatus::Available { path } => write!(f, "available ({})", path.display()),
            IconStatus::Missing { expected } => {
                write!(f, "missing (expected {})", expected.display())
            }
            IconStatus::Unchecked => write!(f, "not checked"),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

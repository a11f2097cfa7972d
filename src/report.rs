//! Report formatting for the non-interactive commands.
//!
//! Pure functions: (Catalog, OutputFormat) → String.
//! No I/O, no side effects.

use serde::Serialize;

use crate::catalog::{Catalog, CatalogIssue};
use crate::rich_text;
use crate::types::{OutputFormat, ProgramDetail, ProgramSummary};

/// One program as printed by `show --format json`.
#[derive(Debug, Serialize)]
struct ProgramView<'a> {
    #[serde(flatten)]
    summary: &'a ProgramSummary,
    detail: Option<&'a ProgramDetail>,
}

/// Format the program list.
pub fn format_catalog(catalog: &Catalog, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Human => Ok(format_catalog_human(catalog)),
        OutputFormat::Json => serde_json::to_string_pretty(catalog.programs()),
    }
}

/// Format one program with its detail record.
///
/// Returns an empty report for an index outside the catalog.
pub fn format_program(
    catalog: &Catalog,
    index: usize,
    format: OutputFormat,
) -> serde_json::Result<String> {
    let Some(summary) = catalog.program(index) else {
        return Ok(String::new());
    };
    let detail = catalog.detail(&summary.title);

    match format {
        OutputFormat::Human => Ok(format_program_human(summary, detail)),
        OutputFormat::Json => serde_json::to_string_pretty(&ProgramView { summary, detail }),
    }
}

/// Format audit findings.
pub fn format_issues(issues: &[CatalogIssue]) -> String {
    if issues.is_empty() {
        return "Catalog OK: no issues found.\n".to_string();
    }

    let mut out = String::new();
    out.push_str("=== Catalog Issues ===\n");
    for issue in issues {
        out.push_str(&format!("  {}\n", issue));
    }
    out.push('\n');
    out.push_str(&format!("Issues: {}\n", issues.len()));
    out
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_catalog_human(catalog: &Catalog) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", catalog.heading()));
    for (i, program) in catalog.programs().iter().enumerate() {
        let marker = if catalog.detail(&program.title).is_some() {
            ""
        } else {
            "  (no details)"
        };
        out.push_str(&format!("{}. {}{}\n", i + 1, program.title, marker));
        out.push_str(&format!("   {}\n", program.short_description));
    }
    out.push('\n');
    out.push_str(&format!("Programs: {}\n", catalog.len()));

    out
}

fn format_program_human(summary: &ProgramSummary, detail: Option<&ProgramDetail>) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} ===\n", summary.title));
    out.push_str(&format!("Icon: {}\n", summary.icon_path));

    let Some(detail) = detail else {
        out.push_str(&format!(
            "Details for {} are not available yet.\n",
            summary.title
        ));
        return out;
    };

    out.push_str(&format!("{}\n\n", detail.long_title));
    out.push_str(&rich_text::parse(&detail.long_description).plain_text());
    out.push_str("\n\nKey Focus Areas\n");
    for area in &detail.focus_areas {
        out.push_str(&format!("  ✔ {}\n", area));
    }

    out
}

// ============================================================================
// TESTS
// ============================================================================

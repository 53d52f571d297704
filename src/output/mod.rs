//! Output formatting for validation reports.
//!
//! Three formats are supported:
//!
//! | Format | Module | Use case |
//! |--------|--------|----------|
//! | [`Pretty`](OutputFormat::Pretty) | [`pretty`] | Terminal / human review |
//! | [`Json`](OutputFormat::Json)     | [`json`]   | Automation / scripting  |
//! | [`Sarif`](OutputFormat::Sarif)   | [`sarif`]  | CI/CD integration       |
//!
//! Output never depends on strict mode: `--strict` only changes the exit
//! code.

pub mod json;
pub mod pretty;
pub mod sarif;

use crate::finding::ValidationReport;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored text.
    Pretty,
    /// Machine-readable JSON.
    Json,
    /// [SARIF 2.1.0](https://sarifweb.azurewebsites.net/) for CI/CD tool integration.
    Sarif,
}

/// Formats every report in the requested [`OutputFormat`].
///
/// `verbose` adds each rule's explanation to pretty output; the structured
/// formats always carry it.
///
/// ```rust,no_run
/// use validate_skill::output::{format_reports, OutputFormat};
/// # use validate_skill::finding::ValidationReport;
/// # fn example(reports: &[ValidationReport]) {
/// let json = format_reports(reports, OutputFormat::Json, false);
/// println!("{json}");
/// # }
/// ```
pub fn format_reports(reports: &[ValidationReport], format: OutputFormat, verbose: bool) -> String {
    match format {
        OutputFormat::Pretty => {
            let mut out: String = reports.iter().map(|r| pretty::format(r, verbose)).collect();
            if reports.len() > 1 {
                out.push_str(&pretty::format_collection_summary(reports));
            }
            out
        }
        OutputFormat::Json => json::format(reports),
        OutputFormat::Sarif => sarif::format(reports),
    }
}

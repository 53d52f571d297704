//! Human-readable colored text formatter.
//!
//! Each report prints a header, one `[SEVERITY] code: message` line per
//! finding (errors first, then warnings), and a result line. Collections end
//! with a summary table.

use crate::finding::{ReportStatus, Severity, ValidationReport};
use colored::Colorize;

/// Formats one report.
///
/// With `verbose`, the rule explanation is printed under every finding.
pub fn format(report: &ValidationReport, verbose: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{}\n",
        format!("  Skill: {}  ", report.skill).bold().on_blue().white()
    ));
    out.push_str(&format!("  Path: {}\n\n", report.path.display()));

    for finding in report.grouped() {
        let severity = match finding.severity {
            Severity::Error => finding.severity.label().red().bold().to_string(),
            Severity::Warning => finding.severity.label().yellow().bold().to_string(),
        };
        out.push_str(&format!(
            "  [{severity}] {code}: {message}\n",
            code = finding.code,
            message = finding.message,
        ));
        if let Some(line) = finding.line {
            out.push_str(&format!(
                "         {}\n",
                format!("{}:{}", report.path.display(), line).dimmed()
            ));
        }
        if verbose {
            if let Some(ref explanation) = finding.explanation {
                out.push_str(&format!("         {} {}\n", "hint:".cyan(), explanation));
            }
        }
    }
    if !report.findings.is_empty() {
        out.push('\n');
    }

    let status_str = match report.status(false) {
        ReportStatus::Passed => "PASSED".green().bold().to_string(),
        ReportStatus::Warning => "PASSED WITH WARNINGS".yellow().bold().to_string(),
        ReportStatus::Failed => "FAILED".red().bold().to_string(),
    };
    let (errors, warnings) = report.count_by_severity();
    out.push_str(&format!(
        "Result: {status_str}  |  {errors} errors, {warnings} warnings\n"
    ));

    out
}

/// Renders a compact summary table after every skill report of a collection.
pub fn format_collection_summary(reports: &[ValidationReport]) -> String {
    let mut out = String::new();
    let separator = "─".repeat(54);

    out.push('\n');
    out.push_str(&format!(
        "{}\n",
        format!("  Collection Summary  ({} skills)", reports.len())
            .bold()
            .underline()
    ));
    out.push_str(&format!("{}\n", separator.dimmed()));

    let mut n_failed = 0usize;
    let mut n_warned = 0usize;
    let mut n_passed = 0usize;

    for report in reports {
        let (icon, status_str) = match report.status(false) {
            ReportStatus::Passed => {
                n_passed += 1;
                ("✓".green().to_string(), "PASSED ".green().bold().to_string())
            }
            ReportStatus::Warning => {
                n_warned += 1;
                ("⚠".yellow().to_string(), "WARNING".yellow().bold().to_string())
            }
            ReportStatus::Failed => {
                n_failed += 1;
                ("✗".red().to_string(), "FAILED ".red().bold().to_string())
            }
        };

        let (errors, warnings) = report.count_by_severity();
        out.push_str(&format!(
            "  {icon}  {name:<28} {status_str}  {errors}e {warnings}w\n",
            name = report.skill,
        ));
    }

    out.push_str(&format!("{}\n", separator.dimmed()));
    out.push_str(&format!(
        "  Total: {}  {}  {}\n",
        format!("{n_failed} failed").red().bold(),
        format!("{n_warned} with warnings").yellow().bold(),
        format!("{n_passed} passed").green().bold(),
    ));

    out
}

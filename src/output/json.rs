//! JSON output formatter.
//!
//! Produces one pretty-printed JSON document covering every validated skill:
//! a generation timestamp, an overall verdict, a severity summary, and each
//! report with its findings.

use crate::finding::{Finding, ReportStatus, ValidationReport};

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    tool: &'static str,
    version: &'static str,
    generated_at: String,
    passed: bool,
    summary: Summary,
    reports: Vec<JsonReport<'a>>,
}

#[derive(serde::Serialize)]
struct Summary {
    skills: usize,
    failed: usize,
    errors: usize,
    warnings: usize,
}

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    skill: &'a str,
    path: String,
    status: ReportStatus,
    passed: bool,
    errors: usize,
    warnings: usize,
    findings: &'a [Finding],
}

/// Formats reports as pretty-printed JSON.
///
/// # Panics
///
/// Panics if serialization fails, which cannot happen for these types.
pub fn format(reports: &[ValidationReport]) -> String {
    let mut summary = Summary {
        skills: reports.len(),
        failed: 0,
        errors: 0,
        warnings: 0,
    };

    let json_reports: Vec<JsonReport<'_>> = reports
        .iter()
        .map(|r| {
            let (errors, warnings) = r.count_by_severity();
            summary.errors += errors;
            summary.warnings += warnings;
            if !r.passed {
                summary.failed += 1;
            }
            JsonReport {
                skill: &r.skill,
                path: r.path.to_string_lossy().to_string(),
                status: r.status(false),
                passed: r.passed,
                errors,
                warnings,
                findings: &r.findings,
            }
        })
        .collect();

    let output = JsonOutput {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        generated_at: chrono::Utc::now().to_rfc3339(),
        passed: reports.iter().all(|r| r.passed),
        summary,
        reports: json_reports,
    };

    serde_json::to_string_pretty(&output).expect("JSON serialization failed")
}

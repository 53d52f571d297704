use std::path::Path;

use validate_skill::config::Config;
use validate_skill::finding::ValidationReport;
use validate_skill::output::{self, OutputFormat};
use validate_skill::validate;

fn reports_for(path: &str) -> Vec<ValidationReport> {
    validate::validate_path(Path::new(path), &Config::default()).unwrap()
}

fn broken() -> Vec<ValidationReport> {
    reports_for("tests/fixtures/broken-skill")
}

fn valid() -> Vec<ValidationReport> {
    reports_for("tests/fixtures/valid-skill")
}

fn pretty(reports: &[ValidationReport], verbose: bool) -> String {
    colored::control::set_override(false);
    output::format_reports(reports, OutputFormat::Pretty, verbose)
}

// ---------------------------------------------------------------------------
// Pretty
// ---------------------------------------------------------------------------

#[test]
fn pretty_valid_skill_passes() {
    let out = pretty(&valid(), false);
    assert!(out.contains("Skill: valid-skill"));
    assert!(out.contains("Result: PASSED  |  0 errors, 0 warnings"));
}

#[test]
fn pretty_lists_each_finding_with_code() {
    let out = pretty(&broken(), false);
    assert!(out.contains("[ERROR] name-mismatch: name 'Broken_Skill' does not match directory name 'broken-skill'"));
    assert!(out.contains("[WARNING] missing-triggers: "));
    assert!(out.contains("Result: FAILED  |  5 errors, 2 warnings"));
}

#[test]
fn pretty_prints_errors_before_warnings() {
    let out = pretty(&broken(), false);
    let last_error = out.rfind("[ERROR]").unwrap();
    let first_warning = out.find("[WARNING]").unwrap();
    assert!(last_error < first_warning);
}

#[test]
fn pretty_shows_file_line_locations() {
    let out = pretty(&broken(), false);
    // `color: blue` sits on line 4, the placeholder on line 9.
    assert!(out.contains("SKILL.md:4"));
    assert!(out.contains("SKILL.md:9"));
}

#[test]
fn pretty_verbose_adds_hints() {
    assert!(!pretty(&broken(), false).contains("hint:"));
    assert!(pretty(&broken(), true).contains("hint:"));
}

#[test]
fn pretty_warnings_only_pass_with_warnings() {
    let out = pretty(&reports_for("tests/fixtures/header-skill"), false);
    assert!(out.contains("PASSED WITH WARNINGS"));
}

#[test]
fn pretty_collection_ends_with_summary() {
    let out = pretty(&reports_for("tests/fixtures"), false);
    assert!(out.contains("Collection Summary  (3 skills)"));
    assert!(out.contains("Total: 1 failed  1 with warnings  1 passed"));

    let broken_at = out.find("Skill: broken-skill").unwrap();
    let header_at = out.find("Skill: header-skill").unwrap();
    let valid_at = out.find("Skill: valid-skill").unwrap();
    assert!(broken_at < header_at && header_at < valid_at);
}

#[test]
fn single_report_has_no_summary() {
    assert!(!pretty(&valid(), false).contains("Collection Summary"));
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[test]
fn json_output_is_valid() {
    let json = output::format_reports(&broken(), OutputFormat::Json, false);

    let parsed: serde_json::Value = serde_json::from_str(&json).expect("JSON should be valid");
    assert_eq!(parsed["tool"], "validate-skill");
    assert!(parsed["generated_at"].is_string());
    assert!(!parsed["passed"].as_bool().unwrap());
    assert_eq!(parsed["summary"]["skills"], 1);
    assert_eq!(parsed["summary"]["errors"], 5);
    assert_eq!(parsed["summary"]["warnings"], 2);

    let report = &parsed["reports"][0];
    assert_eq!(report["skill"], "broken-skill");
    assert_eq!(report["status"], "failed");
    assert!(report["findings"].is_array());
}

#[test]
fn json_findings_carry_severity_line_and_explanation() {
    let json = output::format_reports(&broken(), OutputFormat::Json, false);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let findings = parsed["reports"][0]["findings"].as_array().unwrap();

    let unknown = findings
        .iter()
        .find(|f| f["code"] == "unknown-frontmatter-key")
        .unwrap();
    assert_eq!(unknown["severity"], "error");
    assert_eq!(unknown["line"], 4);
    assert!(unknown["explanation"].is_string());

    assert!(findings.iter().any(|f| f["severity"] == "warning"));
}

#[test]
fn json_valid_skill_passes() {
    let json = output::format_reports(&valid(), OutputFormat::Json, false);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(parsed["passed"].as_bool().unwrap());
    assert_eq!(parsed["reports"][0]["status"], "passed");
}

#[test]
fn json_passed_ignores_warnings() {
    let json = output::format_reports(
        &reports_for("tests/fixtures/header-skill"),
        OutputFormat::Json,
        false,
    );
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(parsed["passed"].as_bool().unwrap());
    assert_eq!(parsed["reports"][0]["status"], "warning");
}

// ---------------------------------------------------------------------------
// SARIF
// ---------------------------------------------------------------------------

#[test]
fn sarif_output_is_valid() {
    let sarif = output::format_reports(&broken(), OutputFormat::Sarif, false);

    let parsed: serde_json::Value =
        serde_json::from_str(&sarif).expect("SARIF JSON should be valid");
    assert_eq!(parsed["version"], "2.1.0");
    assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "validate-skill");
    assert_eq!(parsed["runs"][0]["results"].as_array().unwrap().len(), 7);
}

#[test]
fn sarif_rules_are_unique_and_sorted() {
    let sarif = output::format_reports(&broken(), OutputFormat::Sarif, false);
    let parsed: serde_json::Value = serde_json::from_str(&sarif).unwrap();
    let ids: Vec<&str> = parsed["runs"][0]["tool"]["driver"]["rules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();

    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(ids, sorted);
    assert!(ids.contains(&"incomplete-placeholder"));
}

#[test]
fn sarif_valid_skill_has_no_results() {
    let sarif = output::format_reports(&valid(), OutputFormat::Sarif, false);
    let parsed: serde_json::Value = serde_json::from_str(&sarif).unwrap();
    assert!(parsed["runs"][0]["results"]
        .as_array()
        .map_or(true, |r| r.is_empty()));
}

use std::path::Path;

use validate_skill::finding::{all_pass, Finding, ReportStatus, Severity, ValidationReport};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn error(code: &str) -> Finding {
    Finding::new(code, Severity::Error, format!("{code} happened"))
}

fn warning(code: &str) -> Finding {
    Finding::new(code, Severity::Warning, format!("{code} happened"))
}

fn report(findings: Vec<Finding>) -> ValidationReport {
    ValidationReport::from_findings("demo", Path::new("demo/SKILL.md"), findings)
}

// ---------------------------------------------------------------------------
// passed / status
// ---------------------------------------------------------------------------

#[test]
fn empty_report_passes() {
    let r = report(vec![]);
    assert!(r.passed);
    assert_eq!(r.status(false), ReportStatus::Passed);
    assert!(r.passes(true));
}

#[test]
fn any_error_fails() {
    let r = report(vec![warning("missing-triggers"), error("name-mismatch")]);
    assert!(!r.passed);
    assert_eq!(r.status(false), ReportStatus::Failed);
    assert!(!r.passes(false));
}

#[test]
fn warnings_alone_pass_unless_strict() {
    let r = report(vec![warning("missing-descriptive-header")]);
    assert!(r.passed);
    assert_eq!(r.status(false), ReportStatus::Warning);
    assert!(r.passes(false));
    assert_eq!(r.status(true), ReportStatus::Failed);
    assert!(!r.passes(true));
    // Strict mode never changes the report itself.
    assert!(r.passed);
}

#[test]
fn counts_by_severity() {
    let r = report(vec![
        error("a"),
        warning("b"),
        error("c"),
        warning("d"),
        warning("e"),
    ]);
    assert_eq!(r.count_by_severity(), (2, 3));
    assert_eq!(r.error_count(), 2);
    assert_eq!(r.warning_count(), 3);
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

#[test]
fn grouped_puts_errors_first_and_keeps_discovery_order() {
    let r = report(vec![
        warning("w1"),
        error("e1"),
        warning("w2"),
        error("e2"),
    ]);
    let order: Vec<_> = r.grouped().map(|f| f.code.as_str()).collect();
    assert_eq!(order, ["e1", "e2", "w1", "w2"]);
    // The stored order is the discovery order.
    let stored: Vec<_> = r.findings.iter().map(|f| f.code.as_str()).collect();
    assert_eq!(stored, ["w1", "e1", "w2", "e2"]);
}

// ---------------------------------------------------------------------------
// Finding construction
// ---------------------------------------------------------------------------

#[test]
fn known_code_gets_explanation() {
    let f = Finding::new("name-mismatch", Severity::Error, "x").at_line(3);
    assert_eq!(f.line, Some(3));
    assert!(f.explanation.is_some());
}

#[test]
fn unknown_code_has_no_explanation() {
    let f = Finding::new("made-up", Severity::Warning, "x");
    assert!(f.explanation.is_none());
    assert!(!f.is_error());
}

#[test]
fn severity_labels() {
    assert_eq!(Severity::Error.label(), "ERROR");
    assert_eq!(Severity::Warning.label(), "WARNING");
    assert_eq!(Severity::Warning.to_string(), "warning");
}

// ---------------------------------------------------------------------------
// Aggregate exit status
// ---------------------------------------------------------------------------

#[test]
fn all_pass_is_order_independent() {
    let ok = report(vec![warning("w")]);
    let bad = report(vec![error("e")]);

    assert!(all_pass(&[ok.clone(), ok.clone()], false));
    assert!(!all_pass(&[ok.clone(), bad.clone()], false));
    assert!(!all_pass(&[bad, ok.clone()], false));
    assert!(!all_pass(&[ok], true));
    assert!(all_pass(&[], true));
}

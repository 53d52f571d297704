use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Upper-case label used in text reports (`ERROR`, `WARNING`).
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Finding {
    pub code: String,
    pub message: String,
    pub severity: Severity,
    pub line: Option<usize>,
    pub explanation: Option<String>,
}

impl Finding {
    /// Builds a finding, attaching the catalogue explanation for `code`.
    pub fn new(code: &str, severity: Severity, message: impl Into<String>) -> Self {
        Finding {
            code: code.to_string(),
            message: message.into(),
            severity,
            line: None,
            explanation: crate::rules::lookup(code).map(|r| r.remediation.to_string()),
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationReport {
    pub skill: String,
    pub path: PathBuf,
    pub findings: Vec<Finding>,
    pub passed: bool,
}

impl ValidationReport {
    /// Finalizes a report: `passed` is true iff no finding is an error.
    pub fn from_findings(skill: &str, path: &Path, findings: Vec<Finding>) -> Self {
        let passed = !findings.iter().any(Finding::is_error);
        ValidationReport {
            skill: skill.to_string(),
            path: path.to_path_buf(),
            findings,
            passed,
        }
    }

    /// A report holding one terminal error, used when a file cannot be
    /// validated at all (unreadable, malformed frontmatter, no skill file).
    pub fn single(skill: &str, path: &Path, finding: Finding) -> Self {
        Self::from_findings(skill, path, vec![finding])
    }

    pub fn error_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    /// Counts errors and warnings in a single pass.
    ///
    /// Returns `(errors, warnings)`.
    pub fn count_by_severity(&self) -> (usize, usize) {
        self.findings
            .iter()
            .fold((0, 0), |(e, w), f| match f.severity {
                Severity::Error => (e + 1, w),
                Severity::Warning => (e, w + 1),
            })
    }

    /// Findings grouped for display: all errors, then all warnings, each
    /// group in discovery order.
    pub fn grouped(&self) -> impl Iterator<Item = &Finding> {
        let errors = self.findings.iter().filter(|f| f.is_error());
        let warnings = self.findings.iter().filter(|f| !f.is_error());
        errors.chain(warnings)
    }

    pub fn status(&self, strict: bool) -> ReportStatus {
        compute_status(&self.findings, strict)
    }

    /// Exit-code view of the report. Under `strict`, warnings fail too.
    pub fn passes(&self, strict: bool) -> bool {
        matches!(self.status(strict), ReportStatus::Passed | ReportStatus::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Passed,
    Warning,
    Failed,
}

fn compute_status(findings: &[Finding], strict: bool) -> ReportStatus {
    let (has_errors, has_warnings) =
        findings
            .iter()
            .fold((false, false), |(e, w), f| match f.severity {
                Severity::Error => (true, w),
                Severity::Warning => (e, true),
            });

    if has_errors {
        ReportStatus::Failed
    } else if has_warnings {
        if strict {
            ReportStatus::Failed
        } else {
            ReportStatus::Warning
        }
    } else {
        ReportStatus::Passed
    }
}

/// Logical AND of every report's exit-code view. Order does not matter.
pub fn all_pass(reports: &[ValidationReport], strict: bool) -> bool {
    reports.iter().all(|r| r.passes(strict))
}

//! Body structure rules.
//!
//! | Code | Sev | What it checks |
//! |------|-----|----------------|
//! | `missing-descriptive-header` | Warning | Two `# ABOUTME:` lines in the first 10 non-blank lines |
//! | `descriptive-header-not-first` | Warning | No heading before the descriptive header |
//! | `incomplete-placeholder` | Error | No `[TODO: ...]` left in the body |

use crate::config::RuleSet;
use crate::finding::{Finding, Severity};
use crate::frontmatter::SkillDocument;
use crate::rules::Validator;
use regex::Regex;

/// Matches `marker` literally, followed by a closing `]` on the same line.
pub(crate) fn placeholder_regex(marker: &str) -> Regex {
    let pattern = format!(r"{}[^\n]*\]", regex::escape(marker));
    Regex::new(&pattern).expect("escaped placeholder pattern is valid")
}

/// Checks the Markdown body of a skill document.
pub struct StructureValidator {
    header_marker: String,
    header_window: usize,
    placeholder_marker: String,
    placeholder_re: Regex,
}

/// Where the descriptive header was found among the scanned lines.
enum HeaderScan {
    Missing,
    /// Found, with the 1-indexed line of the heading that precedes it.
    AfterHeading(usize),
    Found,
}

impl StructureValidator {
    pub fn new(rules: &RuleSet) -> Self {
        StructureValidator {
            header_marker: rules.header_marker.clone(),
            header_window: rules.header_window,
            placeholder_marker: rules.placeholder_marker.clone(),
            placeholder_re: placeholder_regex(&rules.placeholder_marker),
        }
    }

    /// Runs both body rules. `body_line` is the file line on which `body`
    /// starts, so findings point into the original file.
    ///
    /// ```
    /// use validate_skill::config::RuleSet;
    /// use validate_skill::rules::structure::StructureValidator;
    ///
    /// let validator = StructureValidator::new(&RuleSet::default());
    /// let body = "\n# ABOUTME: Deploys services\n# ABOUTME: Needs kubectl\n\n# Deploy\n";
    /// assert!(validator.check(body, 4).is_empty());
    ///
    /// let codes: Vec<_> = validator.check("# Deploy\n[TODO: steps]\n", 4)
    ///     .into_iter()
    ///     .map(|f| f.code)
    ///     .collect();
    /// assert_eq!(codes, ["missing-descriptive-header", "incomplete-placeholder"]);
    /// ```
    pub fn check(&self, body: &str, body_line: usize) -> Vec<Finding> {
        let mut findings = Vec::new();
        self.descriptive_header(body, body_line, &mut findings);
        self.placeholders(body, body_line, &mut findings);
        findings
    }

    fn is_header(&self, line: &str) -> bool {
        line.trim_start().starts_with(self.header_marker.as_str())
    }

    fn scan_header(&self, body: &str, body_line: usize) -> HeaderScan {
        let window: Vec<(usize, &str)> = body
            .lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .take(self.header_window)
            .map(|(idx, l)| (body_line + idx, l))
            .collect();

        let mut first_heading = None;
        for (i, &(line_num, line)) in window.iter().enumerate() {
            let next_is_header = window
                .get(i + 1)
                .is_some_and(|&(_, next)| self.is_header(next));
            if self.is_header(line) && next_is_header {
                return match first_heading {
                    Some(heading) => HeaderScan::AfterHeading(heading),
                    None => HeaderScan::Found,
                };
            }
            let is_heading = !self.is_header(line) && line.trim_start().starts_with('#');
            if first_heading.is_none() && is_heading {
                first_heading = Some(line_num);
            }
        }
        HeaderScan::Missing
    }

    fn descriptive_header(&self, body: &str, body_line: usize, findings: &mut Vec<Finding>) {
        match self.scan_header(body, body_line) {
            HeaderScan::Found => {}
            HeaderScan::Missing => findings.push(Finding::new(
                "missing-descriptive-header",
                Severity::Warning,
                format!(
                    "missing two-line '{}' descriptive header (recommended within first {} lines)",
                    self.header_marker, self.header_window
                ),
            )),
            HeaderScan::AfterHeading(line) => findings.push(
                Finding::new(
                    "descriptive-header-not-first",
                    Severity::Warning,
                    format!(
                        "'{}' header should appear before the first heading",
                        self.header_marker
                    ),
                )
                .at_line(line),
            ),
        }
    }

    fn placeholders(&self, body: &str, body_line: usize, findings: &mut Vec<Finding>) {
        let mut hits = body
            .lines()
            .enumerate()
            .filter(|(_, l)| self.placeholder_re.is_match(l))
            .map(|(idx, _)| body_line + idx);

        let Some(first) = hits.next() else {
            return;
        };
        let count = 1 + hits.count();
        findings.push(
            Finding::new(
                "incomplete-placeholder",
                Severity::Error,
                format!(
                    "body contains {count} unfinished {}...] placeholder(s), first on line {first}",
                    self.placeholder_marker
                ),
            )
            .at_line(first),
        );
    }
}

impl Validator for StructureValidator {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn validate(&self, doc: &SkillDocument) -> Vec<Finding> {
        self.check(doc.body(), doc.body_line)
    }
}

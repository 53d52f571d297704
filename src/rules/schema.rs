//! Frontmatter schema rules.
//!
//! # Rules
//!
//! | Code | Sev | What it checks |
//! |------|-----|----------------|
//! | `missing-name` | Error | `name` key must exist |
//! | `invalid-name-format` | Error | `name` must be lowercase hyphen-case |
//! | `name-too-long` | Error | `name` must be ≤ 64 characters |
//! | `name-mismatch` | Error | `name` must equal the directory name |
//! | `missing-description` | Error | `description` key must exist |
//! | `description-too-long` | Error | `description` must be ≤ 1024 characters |
//! | `missing-triggers` | Warning | `description` should contain `Triggers on` |
//! | `description-has-angle-bracket` | Error | No `<` in `description` |
//! | `unknown-frontmatter-key` | Error | Keys must be in the allow-list |
//! | `empty-description` | Error | `description` must not be blank |
//! | `incomplete-placeholder` | Error | No `[TODO: ...]` in `description` |
//!
//! Every rule runs on every document; a file can fail several at once.

use crate::config::RuleSet;
use crate::error::{Error, Result};
use crate::finding::{Finding, Severity};
use crate::frontmatter::{Entry, Frontmatter, SkillDocument};
use crate::rules::structure::placeholder_regex;
use crate::rules::Validator;
use regex::Regex;

type Rule = fn(&SchemaValidator, &Frontmatter, &str, &mut Vec<Finding>);

/// Evaluation order. Findings come out in this order.
const RULES: &[Rule] = &[
    SchemaValidator::missing_name,
    SchemaValidator::name_format,
    SchemaValidator::name_length,
    SchemaValidator::name_matches_directory,
    SchemaValidator::missing_description,
    SchemaValidator::description_length,
    SchemaValidator::description_triggers,
    SchemaValidator::description_angle_bracket,
    SchemaValidator::unknown_keys,
    SchemaValidator::empty_description,
    SchemaValidator::description_placeholder,
];

/// Validates frontmatter against a [`RuleSet`].
pub struct SchemaValidator {
    rules: RuleSet,
    name_re: Regex,
    placeholder_re: Regex,
}

impl SchemaValidator {
    /// Compiles the name pattern from `rules`.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when `rules.name_pattern` is not a valid regex.
    pub fn new(rules: &RuleSet) -> Result<Self> {
        let name_re = Regex::new(&rules.name_pattern).map_err(|e| {
            Error::Config(format!("invalid rules.name_pattern {:?}: {e}", rules.name_pattern))
        })?;
        Ok(SchemaValidator {
            rules: rules.clone(),
            name_re,
            placeholder_re: placeholder_regex(&rules.placeholder_marker),
        })
    }

    /// Runs every schema rule against `frontmatter` for a skill stored in
    /// `directory_name`.
    ///
    /// ```
    /// use validate_skill::config::RuleSet;
    /// use validate_skill::frontmatter;
    /// use validate_skill::rules::schema::SchemaValidator;
    ///
    /// let parsed = frontmatter::parse("---\nname: my-skill\ncolor: blue\n---\n").unwrap();
    /// let validator = SchemaValidator::new(&RuleSet::default()).unwrap();
    /// let codes: Vec<_> = validator
    ///     .check(&parsed.frontmatter, "my-skill")
    ///     .into_iter()
    ///     .map(|f| f.code)
    ///     .collect();
    /// assert_eq!(codes, ["missing-description", "unknown-frontmatter-key"]);
    /// ```
    pub fn check(&self, frontmatter: &Frontmatter, directory_name: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        for rule in RULES {
            rule(self, frontmatter, directory_name, &mut findings);
        }
        findings
    }

    fn name_entry(fm: &Frontmatter) -> Option<(&Entry, &str)> {
        fm.get("name").map(|e| (e, e.value.trim()))
    }

    fn missing_name(&self, fm: &Frontmatter, _dir: &str, findings: &mut Vec<Finding>) {
        if fm.get("name").is_none() {
            findings.push(Finding::new(
                "missing-name",
                Severity::Error,
                "Missing required field: name",
            ));
        }
    }

    fn name_format(&self, fm: &Frontmatter, _dir: &str, findings: &mut Vec<Finding>) {
        let Some((entry, name)) = Self::name_entry(fm) else {
            return;
        };
        if !self.name_re.is_match(name) {
            findings.push(
                Finding::new(
                    "invalid-name-format",
                    Severity::Error,
                    format!(
                        "name '{name}' must be hyphen-case (lowercase letters and digits separated by single hyphens)"
                    ),
                )
                .at_line(entry.line),
            );
        }
    }

    fn name_length(&self, fm: &Frontmatter, _dir: &str, findings: &mut Vec<Finding>) {
        let Some((entry, name)) = Self::name_entry(fm) else {
            return;
        };
        let len = name.chars().count();
        if len > self.rules.name_max_length {
            findings.push(
                Finding::new(
                    "name-too-long",
                    Severity::Error,
                    format!(
                        "name too long ({len} chars, max {})",
                        self.rules.name_max_length
                    ),
                )
                .at_line(entry.line),
            );
        }
    }

    fn name_matches_directory(&self, fm: &Frontmatter, dir: &str, findings: &mut Vec<Finding>) {
        let Some((entry, name)) = Self::name_entry(fm) else {
            return;
        };
        if name != dir {
            findings.push(
                Finding::new(
                    "name-mismatch",
                    Severity::Error,
                    format!("name '{name}' does not match directory name '{dir}'"),
                )
                .at_line(entry.line),
            );
        }
    }

    fn missing_description(&self, fm: &Frontmatter, _dir: &str, findings: &mut Vec<Finding>) {
        if fm.get("description").is_none() {
            findings.push(Finding::new(
                "missing-description",
                Severity::Error,
                "Missing required field: description",
            ));
        }
    }

    fn description_length(&self, fm: &Frontmatter, _dir: &str, findings: &mut Vec<Finding>) {
        let Some(entry) = fm.get("description") else {
            return;
        };
        let len = entry.value.trim().chars().count();
        if len > self.rules.description_max_length {
            findings.push(
                Finding::new(
                    "description-too-long",
                    Severity::Error,
                    format!(
                        "description too long ({len} chars, max {})",
                        self.rules.description_max_length
                    ),
                )
                .at_line(entry.line),
            );
        }
    }

    fn description_triggers(&self, fm: &Frontmatter, _dir: &str, findings: &mut Vec<Finding>) {
        let Some(entry) = fm.get("description") else {
            return;
        };
        if !entry.value.contains(self.rules.trigger_marker.as_str()) {
            findings.push(
                Finding::new(
                    "missing-triggers",
                    Severity::Warning,
                    format!(
                        "description should include trigger phrases (e.g., '{} \"x\", \"y\"')",
                        self.rules.trigger_marker
                    ),
                )
                .at_line(entry.line),
            );
        }
    }

    fn description_angle_bracket(&self, fm: &Frontmatter, _dir: &str, findings: &mut Vec<Finding>) {
        let Some(entry) = fm.get("description") else {
            return;
        };
        if entry.value.contains('<') {
            findings.push(
                Finding::new(
                    "description-has-angle-bracket",
                    Severity::Error,
                    "description cannot contain HTML/XML-like tags or the '<' character",
                )
                .at_line(entry.line),
            );
        }
    }

    /// One finding per unknown key, in declaration order.
    fn unknown_keys(&self, fm: &Frontmatter, _dir: &str, findings: &mut Vec<Finding>) {
        for entry in fm.entries() {
            if self.rules.is_allowed_key(&entry.key) {
                continue;
            }
            findings.push(
                Finding::new(
                    "unknown-frontmatter-key",
                    Severity::Error,
                    format!(
                        "unexpected frontmatter key '{}' (allowed: {})",
                        entry.key,
                        self.rules.allowed_keys.join(", ")
                    ),
                )
                .at_line(entry.line),
            );
        }
    }

    fn empty_description(&self, fm: &Frontmatter, _dir: &str, findings: &mut Vec<Finding>) {
        let Some(entry) = fm.get("description") else {
            return;
        };
        if entry.value.trim().is_empty() {
            findings.push(
                Finding::new("empty-description", Severity::Error, "description cannot be empty")
                    .at_line(entry.line),
            );
        }
    }

    fn description_placeholder(&self, fm: &Frontmatter, _dir: &str, findings: &mut Vec<Finding>) {
        let Some(entry) = fm.get("description") else {
            return;
        };
        if self.placeholder_re.is_match(&entry.value) {
            findings.push(
                Finding::new(
                    "incomplete-placeholder",
                    Severity::Error,
                    format!(
                        "description contains an unfinished {}...] placeholder",
                        self.rules.placeholder_marker
                    ),
                )
                .at_line(entry.line),
            );
        }
    }
}

impl Validator for SchemaValidator {
    fn name(&self) -> &'static str {
        "schema"
    }

    fn validate(&self, doc: &SkillDocument) -> Vec<Finding> {
        self.check(&doc.frontmatter, &doc.directory_name)
    }
}

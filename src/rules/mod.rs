//! Validation rules.
//!
//! Every validator implements the [`Validator`] trait and inspects one slice
//! of a [`SkillDocument`]:
//!
//! - [`schema`]: the frontmatter mapping (required keys, name and
//!   description constraints, key allow-list).
//! - [`structure`]: the Markdown body (descriptive header, placeholders).
//!
//! [`RULES`] is the catalogue of every finding code the tool can emit,
//! including the terminal codes produced by the runner itself. Use
//! [`validators`] to build the validators from a [`RuleSet`].

pub mod schema;
pub mod structure;

use crate::config::RuleSet;
use crate::error::Result;
use crate::finding::{Finding, Severity};
use crate::frontmatter::SkillDocument;

/// A set of checks run against a parsed skill document.
///
/// Implementers must be [`Send`] + [`Sync`] because batch validation shares
/// one validator list across [rayon] workers.
pub trait Validator: Send + Sync {
    /// Short identifier (`"schema"`, `"structure"`).
    fn name(&self) -> &'static str;

    /// Runs every rule and returns the findings in rule order.
    fn validate(&self, doc: &SkillDocument) -> Vec<Finding>;
}

/// Builds the validators for `rules`, in reporting order.
///
/// # Errors
///
/// Returns [`Error::Config`](crate::error::Error::Config) when the configured
/// name pattern is not a valid regular expression.
pub fn validators(rules: &RuleSet) -> Result<Vec<Box<dyn Validator>>> {
    Ok(vec![
        Box::new(schema::SchemaValidator::new(rules)?),
        Box::new(structure::StructureValidator::new(rules)),
    ])
}

/// Metadata for a single finding code.
///
/// Backs the `list-rules` and `explain` commands and the explanation text
/// attached to every [`Finding`].
#[derive(Debug)]
pub struct RuleInfo {
    /// Finding code (e.g., `"name-mismatch"`).
    pub id: &'static str,
    pub severity: Severity,
    /// Component that emits the code: `"parser"`, `"schema"`, or `"structure"`.
    pub component: &'static str,
    /// Short description of what the rule checks.
    pub message: &'static str,
    /// Guidance on how to fix a violation.
    pub remediation: &'static str,
}

/// Catalogue of every finding code, grouped by component.
pub static RULES: &[RuleInfo] = &[
    RuleInfo {
        id: "missing-skill-md",
        severity: Severity::Error,
        component: "parser",
        message: "Directory holds no SKILL.md and no child skill directories",
        remediation: "Create a SKILL.md in the skill root, or point the tool at a collection of skills",
    },
    RuleInfo {
        id: "unreadable-file",
        severity: Severity::Error,
        component: "parser",
        message: "Skill file could not be read",
        remediation: "Check the file permissions and that the file is valid UTF-8",
    },
    RuleInfo {
        id: "malformed-frontmatter",
        severity: Severity::Error,
        component: "parser",
        message: "Frontmatter block is missing, unterminated, or unparseable",
        remediation: "Start the file with a `---` line on line 1, list `key: value` pairs, and close the block with `---`",
    },
    RuleInfo {
        id: "missing-name",
        severity: Severity::Error,
        component: "schema",
        message: "Required frontmatter key `name` is missing",
        remediation: "Add `name: <directory-name>` to the frontmatter",
    },
    RuleInfo {
        id: "invalid-name-format",
        severity: Severity::Error,
        component: "schema",
        message: "Skill name must be lowercase hyphen-case",
        remediation: "Rename the skill to match `rules.name_pattern`; by default lowercase letters and digits separated by single hyphens (e.g. 'my-skill')",
    },
    RuleInfo {
        id: "name-too-long",
        severity: Severity::Error,
        component: "schema",
        message: "Skill name exceeds the maximum length",
        remediation: "Shorten the skill name to the limit in `rules.name_max_length`",
    },
    RuleInfo {
        id: "name-mismatch",
        severity: Severity::Error,
        component: "schema",
        message: "Skill name does not match its directory name",
        remediation: "Rename the directory or change `name` so both are identical",
    },
    RuleInfo {
        id: "missing-description",
        severity: Severity::Error,
        component: "schema",
        message: "Required frontmatter key `description` is missing",
        remediation: "Add a `description` saying what the skill does and when to use it",
    },
    RuleInfo {
        id: "description-too-long",
        severity: Severity::Error,
        component: "schema",
        message: "Description exceeds the maximum length",
        remediation: "Shorten the description to the limit in `rules.description_max_length`",
    },
    RuleInfo {
        id: "missing-triggers",
        severity: Severity::Warning,
        component: "schema",
        message: "Description has no trigger phrases",
        remediation: "Append the trigger marker (`rules.trigger_marker`) and the phrases that should activate the skill to the description",
    },
    RuleInfo {
        id: "description-has-angle-bracket",
        severity: Severity::Error,
        component: "schema",
        message: "Description contains a `<` character",
        remediation: "Remove HTML/XML-like tags and `<` from the description",
    },
    RuleInfo {
        id: "unknown-frontmatter-key",
        severity: Severity::Error,
        component: "schema",
        message: "Frontmatter key is not in the allow-list",
        remediation: "Remove the key, or add it to `rules.allowed_keys` if it is intended",
    },
    RuleInfo {
        id: "empty-description",
        severity: Severity::Error,
        component: "schema",
        message: "Description is present but empty",
        remediation: "Write a description saying what the skill does and when to use it",
    },
    RuleInfo {
        id: "incomplete-placeholder",
        severity: Severity::Error,
        component: "structure",
        message: "Unfinished `[TODO: ...]` placeholder",
        remediation: "Replace every placeholder opened with `rules.placeholder_marker` with real content",
    },
    RuleInfo {
        id: "missing-descriptive-header",
        severity: Severity::Warning,
        component: "structure",
        message: "Two-line descriptive header is missing",
        remediation: "Start the body with two `rules.header_marker` lines giving the skill's purpose and context",
    },
    RuleInfo {
        id: "descriptive-header-not-first",
        severity: Severity::Warning,
        component: "structure",
        message: "Descriptive header appears after a heading",
        remediation: "Move the descriptive header lines directly below the closing `---`",
    },
];

/// Looks up the catalogue entry for `code`.
///
/// ```
/// use validate_skill::rules;
///
/// assert_eq!(rules::lookup("name-mismatch").unwrap().component, "schema");
/// assert!(rules::lookup("no-such-rule").is_none());
/// ```
pub fn lookup(code: &str) -> Option<&'static RuleInfo> {
    RULES.iter().find(|r| r.id == code)
}

//! # validate-skill
//!
//! Validation for AI assistant skill definitions.
//!
//! A skill is a directory holding a `SKILL.md` file: a `---`-delimited
//! frontmatter block (`name`, `description`, ...) followed by a Markdown body.
//! `validate-skill` checks the frontmatter schema and the body conventions
//! and reports every violation at once, as human-readable text, JSON, or
//! [SARIF].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use validate_skill::{config::Config, output, validate};
//!
//! let config = Config::load(None).expect("failed to load config");
//! let reports = validate::validate_path(Path::new("./my-skill"), &config)
//!     .expect("path should exist");
//!
//! print!("{}", output::format_reports(&reports, output::OutputFormat::Pretty, false));
//! let ok = reports.iter().all(|r| r.passes(config.strict.enabled));
//! ```
//!
//! ## Architecture
//!
//! 1. **[`config`]**: the immutable [`config::RuleSet`] (limits, markers,
//!    allowed keys) loaded from TOML or defaults.
//! 2. **[`frontmatter`]**: splits a document into frontmatter and body.
//! 3. **[`rules`]**: the [`rules::Validator`] trait, the schema and structure
//!    validators, and the rule catalogue.
//! 4. **[`validate`]**: resolves paths and runs validators, in parallel for
//!    skill collections.
//! 5. **[`finding`]**: [`finding::Finding`] and [`finding::ValidationReport`].
//! 6. **[`output`]**: pretty, JSON, and SARIF formatters.
//!
//! [SARIF]: https://sarifweb.azurewebsites.net/

pub mod config;
pub mod error;
pub mod finding;
pub mod frontmatter;
pub mod output;
pub mod rules;
pub mod validate;

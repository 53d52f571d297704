//! Validation orchestration.
//!
//! [`validate_path`] is the main entry-point. It resolves the target path to
//! one or more skill files, runs every [`Validator`] on each, and returns one
//! [`ValidationReport`] per skill. Collections are validated in parallel via
//! [rayon]; reports come back sorted by directory name regardless of which
//! worker finished first.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::finding::{Finding, Severity, ValidationReport};
use crate::frontmatter::SkillDocument;
use crate::rules::{self, Validator};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a CLI path argument resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A single skill file.
    File(PathBuf),
    /// A skill directory (holds the skill file).
    Skill(PathBuf),
    /// A directory whose immediate children are skill directories.
    Collection(Vec<PathBuf>),
    /// A directory with neither a skill file nor skill children.
    Empty(PathBuf),
}

/// Resolves `path` into a [`Target`].
///
/// # Errors
///
/// [`Error::Usage`] when the path does not exist, cannot be accessed, or
/// is neither a regular file nor a directory.
pub fn resolve(path: &Path, config: &Config) -> Result<Target> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            Error::Usage(format!("path does not exist: {}", path.display()))
        }
        _ => Error::Usage(format!("cannot access {}: {e}", path.display())),
    })?;

    if metadata.is_file() {
        return Ok(Target::File(path.to_path_buf()));
    }
    if !metadata.is_dir() {
        return Err(Error::Usage(format!(
            "path is neither a file nor a directory: {}",
            path.display()
        )));
    }

    let skill_file = &config.rules.skill_file;
    if path.join(skill_file).is_file() {
        return Ok(Target::Skill(path.to_path_buf()));
    }

    let children = find_skill_dirs(path, skill_file);
    if children.is_empty() {
        Ok(Target::Empty(path.to_path_buf()))
    } else {
        Ok(Target::Collection(children))
    }
}

/// Returns immediate child directories of `path` that contain `skill_file`,
/// sorted by directory name.
pub fn find_skill_dirs(path: &Path, skill_file: &str) -> Vec<PathBuf> {
    WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(path = %path.display(), "skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.into_path())
        .filter(|p| p.join(skill_file).is_file())
        .collect()
}

/// Validates a file, a skill directory, or a collection of skills.
///
/// # Errors
///
/// [`Error::Usage`] for a bad path and [`Error::Config`] for an unusable
/// rule set. Problems with individual skill files never error: they become
/// findings in that skill's report.
///
/// ```rust,no_run
/// use std::path::Path;
/// use validate_skill::{config::Config, validate};
///
/// let config = Config::load(None)?;
/// let reports = validate::validate_path(Path::new("./skills"), &config)?;
/// let ok = reports.iter().all(|r| r.passes(config.strict.enabled));
/// # Ok::<(), validate_skill::error::Error>(())
/// ```
pub fn validate_path(path: &Path, config: &Config) -> Result<Vec<ValidationReport>> {
    let target = resolve(path, config)?;
    let validators = rules::validators(&config.rules)?;
    tracing::debug!(?target, "resolved validation target");

    let reports = match target {
        Target::File(file) => vec![validate_file(&file, &directory_name_of(&file), &validators)],
        Target::Skill(dir) => vec![validate_skill_dir(&dir, config, &validators)],
        Target::Collection(dirs) => dirs
            .par_iter()
            .map(|dir| validate_skill_dir(dir, config, &validators))
            .collect(),
        Target::Empty(dir) => {
            let finding = Finding::new(
                "missing-skill-md",
                Severity::Error,
                format!(
                    "{} not found in {} or any of its immediate subdirectories",
                    config.rules.skill_file,
                    dir.display()
                ),
            );
            vec![ValidationReport::single(&base_name(&dir), &dir, finding)]
        }
    };
    Ok(reports)
}

fn validate_skill_dir(
    dir: &Path,
    config: &Config,
    validators: &[Box<dyn Validator>],
) -> ValidationReport {
    let file = dir.join(&config.rules.skill_file);
    validate_file(&file, &base_name(dir), validators)
}

/// Validates one skill file whose containing directory is `directory_name`.
///
/// Never fails: unreadable files and malformed frontmatter produce a report
/// with a single error finding.
pub fn validate_file(
    file: &Path,
    directory_name: &str,
    validators: &[Box<dyn Validator>],
) -> ValidationReport {
    let doc = match SkillDocument::load(file, directory_name) {
        Ok(doc) => doc,
        Err(Error::MalformedFrontmatter(e)) => {
            tracing::debug!(file = %file.display(), error = %e, "malformed frontmatter");
            let finding = Finding::new("malformed-frontmatter", Severity::Error, e.to_string());
            return ValidationReport::single(directory_name, file, finding);
        }
        Err(e) => {
            tracing::error!(file = %file.display(), "{e}");
            let finding = Finding::new("unreadable-file", Severity::Error, e.to_string());
            return ValidationReport::single(directory_name, file, finding);
        }
    };

    let findings: Vec<Finding> = validators
        .iter()
        .flat_map(|v| {
            let found = v.validate(&doc);
            tracing::debug!(
                file = %file.display(),
                validator = v.name(),
                findings = found.len(),
                "ran validator"
            );
            found
        })
        .collect();
    ValidationReport::from_findings(directory_name, file, findings)
}

/// Base name of the directory holding `file`, resolving relative paths such
/// as `SKILL.md` or `./SKILL.md` against the working directory.
fn directory_name_of(file: &Path) -> String {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => base_name(parent),
        _ => base_name(Path::new(".")),
    }
}

/// Last path component, or `"unknown"` when the path has none (e.g. `/`).
/// Paths such as `.` are canonicalized first.
fn base_name(path: &Path) -> String {
    if let Some(name) = path.file_name() {
        return name.to_string_lossy().to_string();
    }
    std::fs::canonicalize(path)
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

//! Error types.
//!
//! Two layers:
//!
//! - [`FrontmatterError`] describes why a `SKILL.md` frontmatter block could
//!   not be parsed. It never reaches the user as an error: the runner turns it
//!   into a `malformed-frontmatter` finding and carries on.
//! - [`Error`] covers the failures that abort a run (bad CLI input, bad
//!   configuration) plus per-file I/O problems.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a frontmatter block is malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterError {
    /// The file does not begin with a `---` line.
    #[error("frontmatter must start on line 1")]
    NotOnFirstLine,

    /// No closing `---` line before end-of-file.
    #[error("unterminated frontmatter block")]
    Unterminated,

    /// A top-level line that is not a `key: value` pair.
    #[error("line {line} is not a `key: value` pair")]
    InvalidLine { line: usize },

    /// An indented line appearing before any key.
    #[error("line {line} is indented but belongs to no key")]
    OrphanContinuation { line: usize },

    /// The same key declared twice.
    #[error("duplicate key `{key}` on line {line}")]
    DuplicateKey { key: String, line: usize },
}

/// Errors surfaced by the library.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid invocation: missing path, unsupported file type, unknown rule.
    #[error("{0}")]
    Usage(String),

    /// Configuration file missing, unreadable, or invalid.
    #[error("{0}")]
    Config(String),

    /// Frontmatter could not be parsed.
    #[error("malformed frontmatter: {0}")]
    MalformedFrontmatter(#[from] FrontmatterError),

    /// A skill file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Library result alias.
pub type Result<T> = std::result::Result<T, Error>;

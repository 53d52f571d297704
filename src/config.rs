//! Configuration loading.
//!
//! Every limit, marker and allow-list the validators consult lives in
//! [`RuleSet`]. The set is built once (defaults or a TOML file) and handed to
//! the validators at construction time; nothing reads global state.
//!
//! # Configuration file
//!
//! The default configuration file is `validate-skill.toml` in the current
//! working directory. Use [`Config::load`] to read it:
//!
//! ```rust,no_run
//! use validate_skill::config::Config;
//!
//! let config = Config::load(None).expect("failed to load config");
//! assert_eq!(config.rules.name_max_length, 64);
//! ```

use crate::error::{Error, Result};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "validate-skill.toml";

/// Top-level configuration.
///
/// All fields carry defaults so the config file can be omitted entirely.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    /// Limits, markers, and allow-lists used by the validators.
    pub rules: RuleSet,
    /// When strict mode is enabled, warnings fail the run.
    pub strict: StrictConfig,
}

/// Strict-mode configuration.
///
/// Strict mode only changes the exit code: any
/// [`Severity::Warning`](crate::finding::Severity::Warning) finding makes the
/// run fail. Report contents are unaffected.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct StrictConfig {
    /// Set to `true` to treat warnings as failures.
    pub enabled: bool,
}

/// The rule parameters shared by the schema and structure validators.
///
/// # Examples
///
/// ```toml
/// [rules]
/// description_max_length = 512
/// allowed_keys = ["name", "description"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct RuleSet {
    /// File name that marks a directory as a skill.
    pub skill_file: String,
    /// Maximum `name` length, in characters.
    pub name_max_length: usize,
    /// Maximum `description` length, in characters.
    pub description_max_length: usize,
    /// Regular expression the `name` value must match.
    pub name_pattern: String,
    /// Frontmatter keys that may appear.
    pub allowed_keys: Vec<String>,
    /// Literal, case-sensitive substring expected in `description`.
    pub trigger_marker: String,
    /// Literal that opens an unfinished placeholder, e.g. `[TODO: ...]`.
    pub placeholder_marker: String,
    /// Line prefix of the two-line descriptive header.
    pub header_marker: String,
    /// Number of non-blank body lines searched for the descriptive header.
    pub header_window: usize,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet {
            skill_file: "SKILL.md".to_string(),
            name_max_length: 64,
            description_max_length: 1024,
            name_pattern: r"^[a-z0-9]+(-[a-z0-9]+)*$".to_string(),
            allowed_keys: ["name", "description", "allowed-tools", "license", "metadata"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            trigger_marker: "Triggers on".to_string(),
            placeholder_marker: "[TODO:".to_string(),
            header_marker: "# ABOUTME:".to_string(),
            header_window: 10,
        }
    }
}

impl RuleSet {
    /// Returns `true` if `key` is in the frontmatter allow-list.
    ///
    /// ```
    /// use validate_skill::config::RuleSet;
    ///
    /// let rules = RuleSet::default();
    /// assert!(rules.is_allowed_key("allowed-tools"));
    /// assert!(!rules.is_allowed_key("color"));
    /// ```
    pub fn is_allowed_key(&self, key: &str) -> bool {
        self.allowed_keys.iter().any(|k| k == key)
    }

    fn check(&self) -> Result<()> {
        if self.skill_file.trim().is_empty() {
            return Err(Error::Config("rules.skill_file must not be empty".into()));
        }
        for (field, value) in [
            ("rules.trigger_marker", &self.trigger_marker),
            ("rules.placeholder_marker", &self.placeholder_marker),
            ("rules.header_marker", &self.header_marker),
        ] {
            if value.is_empty() {
                return Err(Error::Config(format!("{field} must not be empty")));
            }
        }
        if self.header_window < 2 {
            return Err(Error::Config(
                "rules.header_window must be at least 2 (the header spans two lines)".into(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Resolution order:
    /// 1. If `path` is `Some`, load from that file (error if missing).
    /// 2. If `path` is `None`, try [`DEFAULT_CONFIG_FILE`] in the current directory.
    /// 3. If that file does not exist either, return [`Config::default()`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the explicit path does not exist, the
    /// file cannot be read, the TOML fails to parse, or a rule parameter is
    /// unusable (empty marker, header window below 2).
    ///
    /// ```rust,no_run
    /// use std::path::Path;
    /// use validate_skill::config::Config;
    ///
    /// let cfg = Config::load(Some(Path::new("team-rules.toml")))?;
    /// let cfg = Config::load(None)?;
    /// # Ok::<(), validate_skill::error::Error>(())
    /// ```
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let config_path = match path {
            Some(p) if p.exists() => Some(p.to_path_buf()),
            Some(p) => {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )))
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        let Some(path) = config_path else {
            tracing::debug!("no config file found, using built-in rules");
            return Ok(Config::default());
        };

        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let config = Config::from_toml(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config {}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses configuration from TOML text and checks the rule parameters.
    ///
    /// ```
    /// use validate_skill::config::Config;
    ///
    /// let config = Config::from_toml("[rules]\nname_max_length = 32\n").unwrap();
    /// assert_eq!(config.rules.name_max_length, 32);
    /// assert_eq!(config.rules.description_max_length, 1024);
    /// ```
    pub fn from_toml(content: &str) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.rules.check()?;
        Ok(config)
    }
}

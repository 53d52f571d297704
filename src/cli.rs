use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use validate_skill::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "validate-skill",
    version,
    about = "Validate AI assistant skill definitions (SKILL.md)",
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub validate: ValidateArgs,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Skill file, skill directory, or directory of skill directories
    #[arg(required = true)]
    pub path: Option<PathBuf>,

    /// Show the explanation for every finding
    #[arg(long, short)]
    pub verbose: bool,

    /// Treat warnings as errors for the exit code
    #[arg(long)]
    pub strict: bool,

    /// Output format
    #[arg(long, short, default_value = "pretty", value_enum)]
    pub format: OutputFormat,

    /// Custom config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all built-in rules with descriptions
    ListRules,

    /// Show full explanation for a rule
    Explain {
        /// Rule code (e.g., "name-mismatch")
        code: String,
    },
}

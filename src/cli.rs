//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the profile engine.
#[derive(Parser, Debug)]
#[command(
    name = "engine",
    about = "Declarative profile-driven installation orchestrator",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Override orchestrator root directory (default: $ENGINE_ROOT or current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install every component listed in a profile
    Install(InstallOpts),
    /// List profiles found under <root>/profiles
    List,
    /// Show a profile's metadata and computed plan
    Info(InfoOpts),
    /// Run component validation for a profile without installing
    Validate(ValidateOpts),
    /// Print version information
    Version,
    /// Generate shell completions
    Completions(CompletionsOpts),
}

impl Command {
    /// Subcommand name, used to name the run log.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Install(_) => "install",
            Self::List => "list",
            Self::Info(_) => "info",
            Self::Validate(_) => "validate",
            Self::Version => "version",
            Self::Completions(_) => "completions",
        }
    }
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InstallOpts {
    /// Path to the profile descriptor (.yaml, .yml or .toml)
    pub profile: PathBuf,

    /// Preview the plan without installing anything
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Skip the post-install validation pass
    #[arg(long)]
    pub skip_validation: bool,
}

/// Options for the `info` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InfoOpts {
    /// Path to the profile descriptor
    pub profile: PathBuf,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for the `validate` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ValidateOpts {
    /// Path to the profile descriptor
    pub profile: PathBuf,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

//! Domain-specific error types for the profile engine.
//!
//! Internal modules return typed errors (e.g., [`ProfileError`],
//! [`ResolveError`]) while command handlers at the CLI boundary convert them
//! to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! EngineError
//! ├── Profile(ProfileError)     - unreadable or incomplete descriptor (fatal)
//! ├── Resolve(ResolveError)     - component not on the search path
//! ├── Component(ComponentError) - install or validate entrypoint failed
//! └── Hook(HookError)           - post-install command failed
//! ```
//!
//! Only [`ProfileError`] aborts an installation run. Every other class is
//! accumulated per step and surfaced in the final summary.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the profile engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Descriptor error (missing file, parse failure, missing field).
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Component could not be located on the search path.
    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// Component entrypoint reported failure.
    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    /// Post-install command failed.
    #[error("Hook error: {0}")]
    Hook(#[from] HookError),
}

/// Errors raised while loading a profile descriptor.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The descriptor file does not exist.
    #[error("profile file not found: {}", path.display())]
    NotFound {
        /// Path that was probed.
        path: PathBuf,
    },

    /// The descriptor file exists but could not be read.
    #[error("IO error reading profile {}: {source}", path.display())]
    Io {
        /// Path to the descriptor.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid YAML/TOML or does not match the schema.
    #[error("invalid profile document {}: {message}", path.display())]
    Parse {
        /// Path to the descriptor.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// The file extension does not name a supported document format.
    #[error("unsupported profile format {} (expected .yaml, .yml or .toml)", path.display())]
    UnsupportedFormat {
        /// Path to the descriptor.
        path: PathBuf,
    },

    /// A required `profile.*` field is absent or blank.
    #[error("missing required field: profile.{0}")]
    MissingField(&'static str),

    /// A `profile.*` field holds a value the engine cannot use.
    #[error("invalid profile.{field}: {reason}")]
    InvalidField {
        /// Field name, e.g. `name`.
        field: &'static str,
        /// What is wrong with the value.
        reason: String,
    },
}

/// Errors raised while mapping a `category/name` key to a component.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// No candidate location holds an install entrypoint.
    #[error("component not found: {key} (searched {})", searched.len())]
    NotFound {
        /// The requested key.
        key: String,
        /// Every candidate directory that was probed, in order.
        searched: Vec<PathBuf>,
    },

    /// The key is not of the form `category/name`.
    #[error("invalid component key '{0}': expected category/name")]
    InvalidKey(String),
}

/// Errors reported by a component's entrypoints.
#[derive(Error, Debug)]
pub enum ComponentError {
    /// The install entrypoint exited unsuccessfully.
    #[error("install of {key} failed: {reason}")]
    InstallFailed {
        /// Component key.
        key: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The validate entrypoint exited unsuccessfully.
    #[error("validation of {key} failed: {reason}")]
    ValidateFailed {
        /// Component key.
        key: String,
        /// Human-readable reason.
        reason: String,
    },
}

impl ComponentError {
    /// The failure reason without the component key.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::InstallFailed { reason, .. } | Self::ValidateFailed { reason, .. } => reason,
        }
    }
}

/// Errors raised by post-install commands.
#[derive(Error, Debug)]
pub enum HookError {
    /// The command exited non-zero or could not be spawned.
    #[error("post-install command '{command}' failed: {reason}")]
    Failed {
        /// The command line as written in the descriptor.
        command: String,
        /// Human-readable reason.
        reason: String,
    },
}

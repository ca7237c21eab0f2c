//! Declarative, profile-driven installation orchestrator.
//!
//! A profile descriptor lists categorized components, configuration
//! settings and post-install commands. The engine orders the components by
//! category precedence, installs them one at a time while continuing past
//! failures, writes the configuration to a generated env file, runs the
//! post-install commands, validates the result and records the run.
//!
//! The public API is organised into four layers:
//!
//! - **[`profile`]**: load descriptors and lint them
//! - **[`components`]**: categories, keys, and search-path resolution
//! - **[`engine`]**: planning, execution, configuration, hooks, validation
//! - **[`commands`]**: top-level subcommand orchestration (`install`, `list`, `info`, `validate`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod components;
pub mod engine;
pub mod error;
pub mod exec;
pub mod logging;
pub mod operations;
pub mod paths;
pub mod profile;

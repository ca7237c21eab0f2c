//! Top-level subcommand orchestration.
pub mod completions;
pub mod info;
pub mod install;
pub mod list;
pub mod validate;
pub mod version;

//! Command: generate shell completions.
use clap::CommandFactory as _;

use crate::cli::{Cli, CompletionsOpts};

/// Write a completion script for the requested shell to stdout.
pub fn run(opts: &CompletionsOpts) {
    let mut cmd = Cli::command();
    clap_complete::generate(opts.shell, &mut cmd, "engine", &mut std::io::stdout());
}

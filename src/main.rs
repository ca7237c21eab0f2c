//! `engine` binary entry point.
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use profile_engine::cli::{Cli, Command};
use profile_engine::commands;
use profile_engine::logging::{self, Logger};
use profile_engine::paths::Paths;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    match &args.command {
        Command::Version => {
            commands::version::run();
            return Ok(());
        }
        Command::Completions(opts) => {
            commands::completions::run(opts);
            return Ok(());
        }
        _ => {}
    }

    let paths = Paths::resolve(args.global.root.as_deref())?;
    let log_file = matches!(args.command, Command::Install(_) | Command::Validate(_))
        .then(|| paths.run_log(args.command.name()));
    logging::init_subscriber(args.verbose, log_file.as_deref());
    let log = Arc::new(Logger::new(log_file));

    match &args.command {
        Command::Install(opts) => commands::install::run(&paths, opts, &log),
        Command::List => commands::list::run(&paths, &log),
        Command::Info(opts) => commands::info::run(&paths, opts, &log),
        Command::Validate(opts) => commands::validate::run(&paths, opts, &log),
        Command::Version | Command::Completions(_) => Ok(()),
    }
}

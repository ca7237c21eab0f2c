//! Command: install a profile.
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use crate::cli::InstallOpts;
use crate::engine::{self, Context, InstallOptions};
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger, format_elapsed};
use crate::paths::Paths;

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded, or if any component
/// failed to resolve, install or validate.
pub fn run(paths: &Paths, opts: &InstallOpts, log: &Arc<Logger>) -> Result<()> {
    let started = Instant::now();
    log.info(&format!("profile engine {}", super::version::version()));
    log.debug(&format!("root: {}", paths.root.display()));

    let ctx = Context::new(
        paths.clone(),
        Arc::clone(log) as Arc<dyn Log>,
        Arc::new(SystemExecutor),
        opts.dry_run,
    );
    let outcome = engine::install_profile(
        &ctx,
        &opts.profile,
        InstallOptions {
            skip_validation: opts.skip_validation,
        },
    )?;

    log.print_summary();
    if let Some(validation) = &outcome.validation {
        log.info(&format!(
            "validation: {} passed, {} failed",
            validation.pass_count(),
            validation.failed.len()
        ));
    }
    if !outcome.hooks.failed.is_empty() {
        log.warn(&format!(
            "{} post-install command(s) failed",
            outcome.hooks.failed.len()
        ));
    }
    log.info(&format!("finished in {}", format_elapsed(started.elapsed())));

    if !outcome.is_success() {
        anyhow::bail!(
            "profile '{}' finished with failures",
            outcome.profile.meta.name
        );
    }
    Ok(())
}

//! Command: validate a profile's components without installing.
use std::sync::Arc;

use anyhow::Result;

use crate::cli::ValidateOpts;
use crate::engine::{self, Context};
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger};
use crate::paths::Paths;

/// Run the validate command.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded or any component's
/// validate entrypoint fails.
pub fn run(paths: &Paths, opts: &ValidateOpts, log: &Arc<Logger>) -> Result<()> {
    let ctx = Context::new(
        paths.clone(),
        Arc::clone(log) as Arc<dyn Log>,
        Arc::new(SystemExecutor),
        false,
    );
    let report = engine::validate_profile(&ctx, &opts.profile)?;
    log.print_summary();
    if !report.is_success() {
        anyhow::bail!("{} component(s) failed validation", report.failed.len());
    }
    Ok(())
}

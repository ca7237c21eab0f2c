//! The installation engine.
//!
//! [`install_profile`] drives one run through
//! `LOADED → PLANNED → EXECUTING → CONFIGURED → HOOKED → VALIDATED → RECORDED`.
//! Only a descriptor error stops the run early; every other failure is
//! accumulated into the returned [`InstallOutcome`]. Dry-run stops after
//! `PLANNED`, previewing each entry without invoking anything.
pub mod configure;
mod context;
pub mod hooks;
pub mod planner;
pub mod record;
pub mod runner;
pub mod validate;

pub use context::Context;

use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::error::EngineError;
use crate::logging::StepStatus;
use crate::profile::{self, Profile};
use hooks::HookReport;
use planner::InstallPlan;
use runner::ExecutionReport;
use validate::ValidationReport;

/// Stages of an installation run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InstallStage {
    /// Descriptor loaded and checked.
    Loaded,
    /// Plan computed.
    Planned,
    /// Components installed.
    Executing,
    /// Configuration file written.
    Configured,
    /// Post-install commands run.
    Hooked,
    /// Validation pass complete.
    Validated,
    /// Install record appended.
    Recorded,
}

/// Per-run switches not carried by [`Context`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Skip the validation pass.
    pub skip_validation: bool,
}

/// Everything an installation run produced.
#[derive(Debug)]
pub struct InstallOutcome {
    /// The loaded descriptor.
    pub profile: Profile,
    /// The computed plan.
    pub plan: InstallPlan,
    /// Last stage the run entered.
    pub stage: InstallStage,
    /// Per-component install results.
    pub execution: ExecutionReport,
    /// Generated configuration file, if one was written.
    pub config_file: Option<PathBuf>,
    /// Whether writing the configuration file failed.
    pub config_failed: bool,
    /// Post-install command results.
    pub hooks: HookReport,
    /// Validation results, unless skipped or in dry-run.
    pub validation: Option<ValidationReport>,
    /// Whether a line was appended to the install record.
    pub recorded: bool,
}

impl InstallOutcome {
    /// `true` when every component resolved and installed, configuration
    /// was written, and (if run) validation found no failures.
    ///
    /// Post-install command failures do not count.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.execution.is_success()
            && !self.config_failed
            && self.validation.as_ref().is_none_or(ValidationReport::is_success)
    }
}

/// Load, plan, install, configure, hook, validate and record one profile.
///
/// # Errors
///
/// Returns [`EngineError::Profile`] if the descriptor cannot be loaded; in
/// that case no component is touched and nothing is written.
pub fn install_profile(
    ctx: &Context,
    path: &Path,
    opts: InstallOptions,
) -> Result<InstallOutcome, EngineError> {
    ctx.log.stage("Loading profile");
    let profile = profile::load(path)?;
    ctx.log.info(&format!(
        "{} {} ({} component(s))",
        profile.meta.name,
        profile.meta.version,
        profile.component_count()
    ));
    for warning in profile::validation::lint(&profile) {
        ctx.log.warn(&format!(
            "{} [{}]: {}",
            warning.source, warning.item, warning.message
        ));
    }

    ctx.log.stage("Planning");
    let plan = planner::build_plan(&profile.requested_keys());
    for invalid in plan.dropped() {
        ctx.log
            .warn(&format!("'{invalid}' is not a valid category/name key"));
    }
    ctx.log.info(&format!("{} component(s) planned", plan.len()));
    let entries = runner::resolve_plan(ctx.components.as_ref(), &plan);

    let mut outcome = InstallOutcome {
        profile,
        plan,
        stage: InstallStage::Planned,
        execution: ExecutionReport::default(),
        config_file: None,
        config_failed: false,
        hooks: HookReport::default(),
        validation: None,
        recorded: false,
    };

    if ctx.dry_run {
        ctx.log.stage("Installing components");
        outcome.execution = runner::execute_plan(ctx, &entries);
        if !outcome.profile.configuration.is_empty() {
            ctx.log.dry_run(&format!(
                "would write {}",
                ctx.paths.env_file(&outcome.profile.meta.name).display()
            ));
        }
        for command in outcome.profile.post_install.iter().filter(|c| !c.trim().is_empty()) {
            ctx.log.dry_run(&format!("would run: {command}"));
        }
        return Ok(outcome);
    }

    if !ctx.executor.which("sh") {
        ctx.log
            .warn("sh not found on PATH; component entrypoints will fail to start");
    }
    // Held until the run returns; the file is removed on drop.
    let _plan_artifact = write_plan_artifact(ctx, &outcome.plan);

    outcome.stage = InstallStage::Executing;
    ctx.log.stage("Installing components");
    outcome.execution = runner::execute_plan(ctx, &entries);

    outcome.stage = InstallStage::Configured;
    ctx.log.stage("Applying configuration");
    match configure::apply_configuration(ctx, &outcome.profile) {
        Ok(path) => outcome.config_file = path,
        Err(e) => {
            ctx.log.error(&format!("configuration: {e:#}"));
            ctx.log
                .record_step("configuration", StepStatus::Failed, Some(&format!("{e:#}")));
            outcome.config_failed = true;
        }
    }

    outcome.stage = InstallStage::Hooked;
    if !outcome.profile.post_install.is_empty() {
        ctx.log.stage("Running post-install commands");
    }
    outcome.hooks = hooks::run_hooks(ctx, &outcome.profile.post_install);

    outcome.stage = InstallStage::Validated;
    if opts.skip_validation {
        ctx.log
            .record_step("validation", StepStatus::Skipped, Some("--skip-validation"));
    } else {
        ctx.log.stage("Validating installation");
        outcome.validation = Some(validate::validate_components(ctx, &entries));
    }

    outcome.stage = InstallStage::Recorded;
    if outcome.is_success() {
        let record = ctx.paths.record_log();
        match record::append_record(&record, &outcome.profile, chrono::Utc::now()) {
            Ok(()) => {
                ctx.log.debug(&format!("recorded install in {}", record.display()));
                outcome.recorded = true;
            }
            Err(e) => ctx.log.warn(&format!("install record: {e:#}")),
        }
    }

    Ok(outcome)
}

/// Load a profile and run only the validation pass over its components.
///
/// # Errors
///
/// Returns [`EngineError::Profile`] if the descriptor cannot be loaded.
pub fn validate_profile(ctx: &Context, path: &Path) -> Result<ValidationReport, EngineError> {
    ctx.log.stage("Loading profile");
    let profile = profile::load(path)?;
    let warnings = profile::validation::lint(&profile);
    for warning in &warnings {
        ctx.log.warn(&format!(
            "{} [{}]: {}",
            warning.source, warning.item, warning.message
        ));
    }
    if warnings.is_empty() {
        ctx.log.info("descriptor OK");
    }

    let plan = planner::build_plan(&profile.requested_keys());
    let entries = runner::resolve_plan(ctx.components.as_ref(), &plan);
    ctx.log.stage("Validating components");
    Ok(validate::validate_components(ctx, &entries))
}

/// Write the plan to a temporary file in the cache directory for the
/// duration of the run.
fn write_plan_artifact(ctx: &Context, plan: &InstallPlan) -> Option<tempfile::NamedTempFile> {
    let result = std::fs::create_dir_all(&ctx.paths.cache_dir).and_then(|()| {
        let mut file = tempfile::Builder::new()
            .prefix("plan-")
            .suffix(".txt")
            .tempfile_in(&ctx.paths.cache_dir)?;
        file.write_all(plan.render().as_bytes())?;
        Ok(file)
    });
    match result {
        Ok(file) => {
            ctx.log
                .debug(&format!("plan written to {}", file.path().display()));
            Some(file)
        }
        Err(e) => {
            ctx.log.warn(&format!("could not write plan file: {e}"));
            None
        }
    }
}

//! Best-effort post-install commands.
use super::Context;
use crate::components::script::ENV_MANAGED;
use crate::error::HookError;
use crate::paths::ENV_ROOT;

/// Outcome of running post-install commands.
#[derive(Debug, Default)]
pub struct HookReport {
    /// Number of commands that were run.
    pub ran: usize,
    /// Commands that failed; reported as warnings only.
    pub failed: Vec<HookError>,
}

/// Run each non-blank command in order through the platform shell, from
/// the orchestrator root with `ENGINE_ROOT` and `ENGINE_MANAGED` set.
///
/// A failing command is logged as a warning and never stops the remaining
/// commands.
pub fn run_hooks(ctx: &Context, commands: &[String]) -> HookReport {
    let mut report = HookReport::default();
    let root = &ctx.paths.root;
    let env = vec![
        (ENV_ROOT.to_string(), root.to_string_lossy().into_owned()),
        (ENV_MANAGED.to_string(), "1".to_string()),
    ];
    for command in commands.iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
        ctx.log.info(&format!("$ {command}"));
        report.ran += 1;
        let reason = match ctx.executor.run_shell(root, command, &env) {
            Ok(result) if result.success => continue,
            Ok(result) => result.describe(),
            Err(e) => format!("{e:#}"),
        };
        let err = HookError::Failed {
            command: command.to_string(),
            reason,
        };
        ctx.log.warn(&err.to_string());
        report.failed.push(err);
    }
    report
}

//! Sequential, continue-on-error plan execution.
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::Context;
use super::planner::InstallPlan;
use crate::components::{Component, ComponentKey, ComponentSource};
use crate::error::ResolveError;
use crate::logging::{StepStatus, format_elapsed};

/// A planned key together with its one-time resolution.
#[derive(Debug)]
pub struct PlanEntry {
    /// Planned key as `category/name`, or the raw request if it is malformed.
    pub key: String,
    /// Resolved component, or why it could not be found.
    pub resolution: Result<Arc<dyn Component>, ResolveError>,
}

/// Resolve every planned key once, in plan order.
///
/// Malformed requests follow the planned keys as entries that failed with
/// [`ResolveError::InvalidKey`], so they are accounted like any other
/// component that cannot be found.
#[must_use]
pub fn resolve_plan(source: &dyn ComponentSource, plan: &InstallPlan) -> Vec<PlanEntry> {
    let resolved = plan.entries().iter().map(|key: &ComponentKey| PlanEntry {
        key: key.to_string(),
        resolution: source.resolve(key),
    });
    let invalid = plan.dropped().iter().map(|raw| PlanEntry {
        key: raw.trim().to_string(),
        resolution: Err(ResolveError::InvalidKey(raw.trim().to_string())),
    });
    resolved.chain(invalid).collect()
}

/// A step that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    /// Component key.
    pub key: String,
    /// Human-readable reason.
    pub reason: String,
}

/// A successfully installed component and how long it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTiming {
    /// Component key.
    pub key: String,
    /// Wall-clock install time.
    pub elapsed: Duration,
}

/// Outcome of executing a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Number of planned entries.
    pub total: usize,
    /// Components whose install entrypoint succeeded.
    pub succeeded: Vec<StepTiming>,
    /// Components not found on the search path, or requested with a
    /// malformed key.
    pub unresolved: Vec<StepFailure>,
    /// Components whose install entrypoint failed.
    pub failed: Vec<StepFailure>,
}

impl ExecutionReport {
    /// `true` when nothing failed to resolve or install.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.unresolved.is_empty() && self.failed.is_empty()
    }
}

/// Install every entry in order, recording failures and carrying on.
///
/// In dry-run mode nothing is invoked; each entry is reported as a
/// "would install" line instead.
pub fn execute_plan(ctx: &Context, entries: &[PlanEntry]) -> ExecutionReport {
    let total = entries.len();
    let mut report = ExecutionReport {
        total,
        ..ExecutionReport::default()
    };
    let component_ctx = ctx.component_context();

    for (i, entry) in entries.iter().enumerate() {
        let key = entry.key.clone();

        let component = match &entry.resolution {
            Ok(component) => component,
            Err(e) => {
                let why = match e {
                    ResolveError::InvalidKey(_) => "invalid key",
                    ResolveError::NotFound { .. } => "not found",
                };
                if ctx.dry_run {
                    ctx.log.dry_run(&format!("would install {key} ({why})"));
                } else {
                    ctx.log.info(&format!("[{}/{total}] {key}", i + 1));
                }
                ctx.log.error(&e.to_string());
                ctx.log.record_step(&key, StepStatus::NotFound, Some(why));
                report.unresolved.push(StepFailure {
                    key,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if ctx.dry_run {
            ctx.log.dry_run(&format!(
                "would install {key} from {}",
                component.location().display()
            ));
            ctx.log.record_step(&key, StepStatus::DryRun, None);
            continue;
        }

        ctx.log.info(&format!("[{}/{total}] {key}", i + 1));
        ctx.log
            .debug(&format!("running install for {key} in {}", component.location().display()));
        let started = Instant::now();
        match component.install(&component_ctx) {
            Ok(()) => {
                let elapsed = started.elapsed();
                ctx.log
                    .record_step(&key, StepStatus::Ok, Some(&format_elapsed(elapsed)));
                report.succeeded.push(StepTiming { key, elapsed });
            }
            Err(e) => {
                ctx.log.error(&e.to_string());
                let reason = e.reason().to_string();
                ctx.log.record_step(&key, StepStatus::Failed, Some(&reason));
                report.failed.push(StepFailure { key, reason });
            }
        }
    }

    report
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::engine::planner::build_plan;
    use crate::engine::test_helpers::{FakeSource, test_context};

    fn plan(keys: &[&str]) -> InstallPlan {
        let requested: Vec<String> = keys.iter().map(|k| (*k).to_string()).collect();
        build_plan(&requested)
    }

    #[test]
    fn all_components_install() {
        let (ctx, log) = test_context(false);
        let source = FakeSource::new()
            .with("core/git", true, None)
            .with("core/zsh", true, None);
        let entries = resolve_plan(&source, &plan(&["core/zsh", "core/git"]));
        let report = execute_plan(&ctx, &entries);

        assert!(report.is_success());
        assert_eq!(report.total, 2);
        let keys: Vec<_> = report.succeeded.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["core/git", "core/zsh"]);
        assert_eq!(source.install_calls("core/git"), 1);
        assert_eq!(
            log.messages("info"),
            vec!["[1/2] core/git".to_string(), "[2/2] core/zsh".to_string()]
        );
    }

    #[test]
    fn unresolved_component_does_not_stop_the_run() {
        let (ctx, log) = test_context(false);
        let source = FakeSource::new().with("core/git", true, None);
        let entries = resolve_plan(&source, &plan(&["cloud/aws", "core/git"]));
        let report = execute_plan(&ctx, &entries);

        assert!(!report.is_success());
        assert_eq!(report.unresolved.len(), 1);
        assert_eq!(report.unresolved[0].key, "cloud/aws");
        assert_eq!(report.succeeded.len(), 1);
        assert_eq!(report.succeeded[0].key, "core/git");
        assert_eq!(source.install_calls("core/git"), 1);

        let statuses: Vec<_> = log.steps().iter().map(|s| s.status).collect();
        assert_eq!(statuses, vec![StepStatus::Ok, StepStatus::NotFound]);
    }

    #[test]
    fn install_failure_continues_with_next_entry() {
        let (ctx, _log) = test_context(false);
        let source = FakeSource::new()
            .with("core/git", false, None)
            .with("devops/docker", true, None);
        let entries = resolve_plan(&source, &plan(&["core/git", "devops/docker"]));
        let report = execute_plan(&ctx, &entries);

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].key, "core/git");
        assert_eq!(report.failed[0].reason, "exit code 1");
        assert_eq!(report.succeeded.len(), 1);
        assert_eq!(source.install_calls("devops/docker"), 1);
    }

    #[test]
    fn dry_run_invokes_nothing() {
        let (ctx, log) = test_context(true);
        let source = FakeSource::new()
            .with("core/git", true, None)
            .with("core/zsh", true, None);
        let entries = resolve_plan(&source, &plan(&["core/git", "core/zsh", "devops/docker"]));
        let report = execute_plan(&ctx, &entries);

        assert_eq!(source.install_calls("core/git"), 0);
        assert_eq!(source.install_calls("core/zsh"), 0);
        assert!(report.succeeded.is_empty());
        assert_eq!(report.unresolved.len(), 1);
        let lines = log.messages("dry_run");
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.starts_with("would install ")));
        assert!(lines[2].contains("not found"));
    }

    #[test]
    fn malformed_request_counts_as_unresolved() {
        let (ctx, log) = test_context(false);
        let source = FakeSource::new().with("core/git", true, None);
        let entries = resolve_plan(&source, &plan(&["core/git", "core/tools/rg", "core/.."]));
        let report = execute_plan(&ctx, &entries);

        assert!(!report.is_success());
        assert_eq!(report.total, 3);
        assert_eq!(report.succeeded.len(), 1);
        let keys: Vec<_> = report.unresolved.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["core/tools/rg", "core/.."]);
        assert!(report.unresolved[0].reason.contains("invalid component key"));
        assert_eq!(
            log.messages("info"),
            vec![
                "[1/3] core/git".to_string(),
                "[2/3] core/tools/rg".to_string(),
                "[3/3] core/..".to_string(),
            ]
        );
    }
}

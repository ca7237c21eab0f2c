//! Post-installation validation pass.
use super::Context;
use super::runner::{PlanEntry, StepFailure};
use crate::error::ResolveError;
use crate::logging::StepStatus;

/// Aggregate result of validating requested components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Components whose validate entrypoint succeeded.
    pub passed: Vec<String>,
    /// Components with no validate entrypoint, or that could not be
    /// resolved; these count as passing.
    pub unchecked: Vec<String>,
    /// Components whose validate entrypoint failed, or whose key is
    /// malformed.
    pub failed: Vec<StepFailure>,
}

impl ValidationReport {
    /// Number of components counted as passing.
    #[must_use]
    pub fn pass_count(&self) -> usize {
        self.passed.len() + self.unchecked.len()
    }

    /// `true` when no validate entrypoint failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Validate every entry, regardless of how its installation went.
///
/// Entries without a validate entrypoint pass automatically.
pub fn validate_components(ctx: &Context, entries: &[PlanEntry]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let component_ctx = ctx.component_context();

    for entry in entries {
        let key = entry.key.clone();
        let component = match &entry.resolution {
            Ok(component) => component,
            Err(e @ ResolveError::InvalidKey(_)) => {
                ctx.log.error(&e.to_string());
                ctx.log.record_step(&key, StepStatus::Invalid, Some("invalid key"));
                report.failed.push(StepFailure {
                    key,
                    reason: e.to_string(),
                });
                continue;
            }
            Err(ResolveError::NotFound { .. }) => {
                ctx.log
                    .warn(&format!("{key}: not found, validation skipped"));
                report.unchecked.push(key);
                continue;
            }
        };
        match component.validate(&component_ctx) {
            None => {
                ctx.log.debug(&format!("{key}: no validation"));
                report.unchecked.push(key);
            }
            Some(Ok(())) => {
                ctx.log.info(&format!("{key}: ok"));
                report.passed.push(key);
            }
            Some(Err(e)) => {
                ctx.log.error(&e.to_string());
                let reason = e.reason().to_string();
                ctx.log.record_step(&key, StepStatus::Invalid, Some(&reason));
                report.failed.push(StepFailure { key, reason });
            }
        }
    }

    ctx.log.info(&format!(
        "{} passed, {} failed",
        report.pass_count(),
        report.failed.len()
    ));
    report
}

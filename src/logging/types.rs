//! Core logging types: step entries, status, and the [`Log`] trait.

/// Step result for summary reporting.
#[derive(Debug, Clone)]
pub struct StepEntry {
    /// Step label, usually a `category/name` component key.
    pub name: String,
    /// Final status of the step.
    pub status: StepStatus,
    /// Optional detail message (e.g., failure reason).
    pub message: Option<String>,
}

/// Status of a completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Component installed successfully.
    Ok,
    /// Step ran in dry-run mode; nothing was invoked.
    DryRun,
    /// Component could not be resolved on the search path.
    NotFound,
    /// Component install entrypoint failed.
    Failed,
    /// Component validate entrypoint failed.
    Invalid,
    /// Step was deliberately not run.
    Skipped,
}

impl StepStatus {
    /// Whether this status counts against the run's exit status.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::NotFound | Self::Failed | Self::Invalid)
    }
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) is the production implementation; engine
/// code takes `&dyn Log` so tests can capture output instead.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a step result for the summary.
    fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>);
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn failure_statuses() {
        assert!(StepStatus::NotFound.is_failure());
        assert!(StepStatus::Failed.is_failure());
        assert!(StepStatus::Invalid.is_failure());
        assert!(!StepStatus::Ok.is_failure());
        assert!(!StepStatus::DryRun.is_failure());
        assert!(!StepStatus::Skipped.is_failure());
    }

    #[test]
    fn step_entry_clone() {
        let entry = StepEntry {
            name: "core/git".to_string(),
            status: StepStatus::Ok,
            message: Some("1.2s".to_string()),
        };
        let cloned = entry.clone();
        assert_eq!(cloned.name, entry.name);
        assert_eq!(cloned.status, entry.status);
        assert_eq!(cloned.message, entry.message);
    }
}

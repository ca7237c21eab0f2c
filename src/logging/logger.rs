//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{Log, StepEntry, StepStatus};

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
///
/// The `record_step` method is **not** included because its signature differs
/// from the `fn(&self, &str)` pattern shared by the display methods.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with dry-run awareness and summary collection.
///
/// Console and file output both go through the global tracing subscriber
/// installed by [`init_subscriber`](super::subscriber::init_subscriber); the
/// logger itself only remembers step results and where the run log lives.
#[derive(Debug)]
pub struct Logger {
    steps: Mutex<Vec<StepEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// `log_file` is only used for display in the run summary.
    #[must_use]
    pub const fn new(log_file: Option<PathBuf>) -> Self {
        Self {
            steps: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Return a clone of all recorded step entries.
    #[must_use]
    pub fn step_entries(&self) -> Vec<StepEntry> {
        self.steps.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the run log).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record a step result for the summary.
    pub fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.steps.lock() {
            guard.push(StepEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the number of failed steps (not found, failed, or invalid).
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.steps.lock().map_or(0, |guard| {
            guard.iter().filter(|s| s.status.is_failure()).count()
        })
    }

    /// Print the summary of all recorded steps.
    pub fn print_summary(&self) {
        let steps = self.step_entries();
        if steps.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut ok = 0u32;
        let mut dry_run = 0u32;
        let mut not_found = 0u32;
        let mut failed = 0u32;
        let mut invalid = 0u32;
        let mut skipped = 0u32;

        for step in &steps {
            let (icon, color) = match step.status {
                StepStatus::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                StepStatus::DryRun => {
                    dry_run += 1;
                    ("~", "\x1b[37m")
                }
                StepStatus::NotFound => {
                    not_found += 1;
                    ("?", "\x1b[31m")
                }
                StepStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
                StepStatus::Invalid => {
                    invalid += 1;
                    ("!", "\x1b[31m")
                }
                StepStatus::Skipped => {
                    skipped += 1;
                    ("○", "\x1b[33m")
                }
            };

            let suffix = step
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", step.name));
        }

        self.info(&format!(
            "\x1b[32m{ok} installed\x1b[0m, \x1b[37m{dry_run} dry-run\x1b[0m, \x1b[31m{not_found} not found\x1b[0m, \x1b[31m{failed} failed\x1b[0m, \x1b[31m{invalid} failed validation\x1b[0m, \x1b[33m{skipped} skipped\x1b[0m"
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        self.record_step(name, status, message);
    }
}

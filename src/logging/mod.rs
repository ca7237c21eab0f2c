//! Logging infrastructure for structured console and file output.

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{Log, StepEntry, StepStatus};
pub use utils::format_elapsed;

/// Create a Logger backed by an isolated per-thread tracing subscriber
/// with a [`FileLayer`](subscriber::FileLayer) writing to `<tmp>/test.log`,
/// so that tracing events emitted by logger methods reach a file the test
/// can inspect.
///
/// Returns a [`tracing::dispatcher::DefaultGuard`] that must be kept alive
/// for the duration of the test; dropping it restores the previous
/// thread-local dispatcher.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_logger() -> (Logger, tempfile::TempDir, tracing::dispatcher::DefaultGuard) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("test.log");
    let file_layer = subscriber::FileLayer::new(&path).expect("failed to create file layer");
    let log = Logger::new(Some(path));
    let subscriber =
        tracing_subscriber::registry().with(file_layer.with_filter(LevelFilter::DEBUG));
    let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(subscriber));
    (log, tmp, guard)
}

/// In-memory [`Log`] that keeps every message, for asserting on engine output.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct CaptureLog {
    lines: std::sync::Mutex<Vec<(&'static str, String)>>,
    steps: std::sync::Mutex<Vec<StepEntry>>,
}

#[cfg(test)]
impl CaptureLog {
    fn push(&self, kind: &'static str, msg: &str) {
        if let Ok(mut guard) = self.lines.lock() {
            guard.push((kind, msg.to_string()));
        }
    }

    /// Messages logged with the given kind (`"info"`, `"dry_run"`, ...).
    pub(crate) fn messages(&self, kind: &str) -> Vec<String> {
        self.lines.lock().map_or_else(
            |_| vec![],
            |g| {
                g.iter()
                    .filter(|(k, _)| *k == kind)
                    .map(|(_, m)| m.clone())
                    .collect()
            },
        )
    }

    /// Every recorded step.
    pub(crate) fn steps(&self) -> Vec<StepEntry> {
        self.steps.lock().map_or_else(|_| vec![], |g| g.clone())
    }
}

#[cfg(test)]
impl Log for CaptureLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
    fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.steps.lock() {
            guard.push(StepEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }
}

//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use super::utils::{format_utc_datetime, format_utc_time, strip_ansi};

/// Tracing target for stage headers.
pub(super) const STAGE_TARGET: &str = "engine::stage";

/// Tracing target for dry-run previews.
pub(super) const DRY_RUN_TARGET: &str = "engine::dry_run";

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// How an engine event is laid out, on the console and in the run log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    /// `==>` header opening an install stage.
    Stage,
    /// Per-component progress, `[i/total] category/name`.
    Progress,
    /// Something dry-run would have done.
    Preview,
    Error,
    Warn,
    Info,
    Debug,
}

impl LineKind {
    fn of(level: tracing::Level, target: &str, msg: &str) -> Self {
        match level {
            tracing::Level::ERROR => Self::Error,
            tracing::Level::WARN => Self::Warn,
            tracing::Level::INFO if target == STAGE_TARGET => Self::Stage,
            tracing::Level::INFO if target == DRY_RUN_TARGET => Self::Preview,
            tracing::Level::INFO if is_progress(msg) => Self::Progress,
            tracing::Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Run-log rendering, without colour.
    fn plain(self, msg: &str) -> String {
        match self {
            Self::Stage => format!("==> {msg}"),
            Self::Progress => format!("  {msg}"),
            Self::Preview => format!("    dry-run: {msg}"),
            Self::Error => format!("    error: {msg}"),
            Self::Warn => format!("    warning: {msg}"),
            Self::Info => format!("    {msg}"),
            Self::Debug => format!("    debug: {msg}"),
        }
    }

    /// Console rendering.
    fn styled(self, msg: &str) -> String {
        match self {
            Self::Stage => format!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Self::Progress => match msg.split_once(' ') {
                Some((counter, key)) => format!("  \x1b[36m{counter}\x1b[0m \x1b[1m{key}\x1b[0m"),
                None => format!("  {msg}"),
            },
            Self::Preview => format!("    \x1b[33mdry-run:\x1b[0m {msg}"),
            Self::Error => format!("\x1b[31merror:\x1b[0m {msg}"),
            Self::Warn => format!("\x1b[33mwarning:\x1b[0m {msg}"),
            Self::Info => format!("    {msg}"),
            Self::Debug => format!("    \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Whether `msg` is a `[i/total] key` progress line.
fn is_progress(msg: &str) -> bool {
    msg.strip_prefix('[')
        .and_then(|rest| rest.split_once(']'))
        .and_then(|(counter, _)| counter.split_once('/'))
        .is_some_and(|(i, total)| {
            !i.is_empty()
                && !total.is_empty()
                && i.chars().all(|c| c.is_ascii_digit())
                && total.chars().all(|c| c.is_ascii_digit())
        })
}

/// A [`tracing_subscriber::Layer`] that appends every event to the run log
/// of one command, timestamped and with ANSI codes stripped.
///
/// Captures `DEBUG` and above regardless of console verbosity.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Truncate `path`, write a header naming the command, and return a
    /// layer appending to it.
    ///
    /// Returns `None` if the parent directory cannot be created or the file
    /// cannot be opened.
    pub(super) fn new(path: &Path) -> Option<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        let command = path
            .file_stem()
            .map_or_else(|| "engine".into(), |s| s.to_string_lossy());
        let version =
            option_env!("ENGINE_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let header = format!(
            "# engine {command} | profile-engine {version} | started {}\n",
            format_utc_datetime(),
        );
        fs::write(path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = strip_ansi(&extractor.message);
        let kind = LineKind::of(*metadata.level(), metadata.target(), &msg);

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{} {}", format_utc_time(), kind.plain(&msg)).ok();
        }
    }
}

/// Console [`tracing_subscriber::fmt::FormatEvent`] for engine output.
struct EngineFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for EngineFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;
        let kind = LineKind::of(*metadata.level(), metadata.target(), msg);
        writeln!(writer, "{}", kind.styled(msg))
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Sets up a console subscriber that formats events to match the engine's
/// output style and, when `log_file` is given, a file layer that records
/// every event (including `debug`) for the run.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, log_file: Option<&Path>) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(EngineFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    let file_layer = log_file
        .and_then(FileLayer::new)
        .map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

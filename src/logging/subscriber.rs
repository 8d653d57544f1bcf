//! Tracing subscriber: coloured console output plus a per-command log file.
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

use super::utils::{clock, log_file_path, started_at, strip_colors};

/// Target for stage headers.
pub(super) const STAGE_TARGET: &str = "tuner::stage";
/// Target for dry-run notices.
pub(super) const DRY_RUN_TARGET: &str = "tuner::dry_run";

/// Kind of line an event renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Stage,
    DryRun,
    Error,
    Warn,
    Info,
    Debug,
}

impl LineKind {
    fn of(event: &Event<'_>) -> Self {
        let metadata = event.metadata();
        match (*metadata.level(), metadata.target()) {
            (Level::ERROR, _) => Self::Error,
            (Level::WARN, _) => Self::Warn,
            (Level::INFO, STAGE_TARGET) => Self::Stage,
            (Level::INFO, DRY_RUN_TARGET) => Self::DryRun,
            (Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }
}

/// The `message` field of an event.
fn message(event: &Event<'_>) -> String {
    #[derive(Default)]
    struct Message(String);

    impl Visit for Message {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "message" {
                self.0 = value.to_string();
            }
        }
    }

    let mut visitor = Message::default();
    event.record(&mut visitor);
    visitor.0
}

/// Plain-text log file line.
fn file_line(kind: LineKind, time: &str, msg: &str) -> String {
    let msg = strip_colors(msg);
    match kind {
        LineKind::Stage => format!("[{time}] ==> {msg}"),
        LineKind::DryRun => format!("[{time}]     [dry run] {msg}"),
        LineKind::Error => format!("[{time}]     [error] {msg}"),
        LineKind::Warn => format!("[{time}]     [warn] {msg}"),
        LineKind::Debug => format!("[{time}]     [debug] {msg}"),
        LineKind::Info => format!("[{time}]     {msg}"),
    }
}

/// Coloured console line.
fn console_line(kind: LineKind, msg: &str) -> String {
    match kind {
        LineKind::Stage => format!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
        LineKind::DryRun => format!("  \x1b[33m[DRY RUN]\x1b[0m {msg}"),
        LineKind::Error => format!("\x1b[31mERROR\x1b[0m {msg}"),
        LineKind::Warn => format!("\x1b[33mWARN\x1b[0m  {msg}"),
        LineKind::Info => format!("  {msg}"),
        LineKind::Debug => format!("  \x1b[2m{msg}\x1b[0m"),
    }
}

/// Appends every event to `$XDG_CACHE_HOME/tuner/<command>.log`.
///
/// The file is truncated at the start of each run and always receives
/// `DEBUG` and above, whatever the console verbosity.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Truncate the log for `command` and write the run header.
    ///
    /// Returns `None` when the log file cannot be opened.
    pub(super) fn new(command: &str) -> Option<Self> {
        let path = log_file_path(command)?;
        let mut file = fs::File::create(&path).ok()?;
        writeln!(
            file,
            "# tuner {} {command} started {}",
            crate::commands::version::version(),
            started_at()
        )
        .ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: Subscriber> Layer<S> for FileLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let line = file_line(LineKind::of(event), &clock(), &message(event));
        if let Ok(mut file) = self.file.lock() {
            writeln!(file, "{line}").ok();
        }
    }
}

/// Console formatter for tuner output.
struct TunerFormatter;

impl<S, N> FormatEvent<S, N> for TunerFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        writeln!(writer, "{}", console_line(LineKind::of(event), &message(event)))
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Warnings and errors go to stderr, everything else to stdout; `verbose`
/// adds debug lines to the console. Call once at startup.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));

    let console = tracing_subscriber::fmt::layer()
        .event_format(TunerFormatter)
        .with_writer(writer)
        .with_filter(console_level);

    let file = FileLayer::new(command).map(|layer| layer.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .init();
}

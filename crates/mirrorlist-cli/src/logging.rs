use std::{env, io};

use nu_ansi_term::Color::{Blue, Magenta, Red, Yellow};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::{
    fmt::{
        self,
        format::{FmtSpan, Writer},
        FmtContext, FormatEvent, FormatFields, MakeWriter,
    },
    registry::LookupSpan,
};

use crate::utils::{Colored, COLOR};

/// Log level, one of `error`, `warn`, `info`, `debug`, `trace`.
pub const LOG_LEVEL_VAR: &str = "MIRRORLIST_LOG";

/// Any non-empty value other than `0` switches to JSON events.
pub const LOG_JSON_VAR: &str = "MIRRORLIST_LOG_JSON";

/// <https://no-color.org>
pub const NO_COLOR_VAR: &str = "NO_COLOR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: Level,
    pub json: bool,
    pub color: bool,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var(LOG_LEVEL_VAR).ok().as_deref(),
            env::var(LOG_JSON_VAR).ok().as_deref(),
            env::var(NO_COLOR_VAR).ok().as_deref(),
        )
    }

    fn from_vars(level: Option<&str>, json: Option<&str>, no_color: Option<&str>) -> Self {
        let level = level
            .and_then(|level| level.trim().parse::<Level>().ok())
            .unwrap_or(Level::INFO);
        let json = json.is_some_and(|value| !value.is_empty() && value != "0");
        let color = no_color.is_none_or(str::is_empty);

        Self {
            level,
            json,
            color,
        }
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }
}

pub struct CustomFormatter;

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        match *event.metadata().level() {
            Level::TRACE => write!(writer, "{} ", Colored(Magenta, "[TRACE]")),
            Level::DEBUG => write!(writer, "{} ", Colored(Blue, "[DEBUG]")),
            Level::INFO => write!(writer, ""),
            Level::WARN => write!(writer, "{} ", Colored(Yellow, "[WARN]")),
            Level::ERROR => write!(writer, "{} ", Colored(Red, "[ERROR]")),
        }?;

        if let Some(message) = visitor.message {
            writeln!(writer, "{message}")
        } else {
            writeln!(writer)
        }
    }
}

/// Stdout or stderr, picked per event.
pub enum Output {
    Stdout(io::Stdout),
    Stderr(io::Stderr),
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(out) => out.write(buf),
            Output::Stderr(err) => err.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(out) => out.flush(),
            Output::Stderr(err) => err.flush(),
        }
    }
}

/// Sends `INFO` events to stdout and every other level to stderr.
struct LevelWriter;

impl<'a> MakeWriter<'a> for LevelWriter {
    type Writer = Output;

    fn make_writer(&'a self) -> Self::Writer {
        Output::Stdout(io::stdout())
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        if *meta.level() == Level::INFO {
            Output::Stdout(io::stdout())
        } else {
            Output::Stderr(io::stderr())
        }
    }
}

pub fn setup_logging(settings: &LogSettings) {
    if let Ok(mut color) = COLOR.write() {
        *color = settings.color;
    }

    let builder = fmt::Subscriber::builder()
        .with_env_filter(format!("mirrorlist={}", settings.level))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(LevelWriter)
        .compact()
        .without_time();

    let subscriber: Box<dyn Subscriber + Send + Sync> = if settings.json {
        Box::new(builder.json().flatten_event(true).finish())
    } else {
        Box::new(builder.event_format(CustomFormatter).finish())
    };

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

//! Log output for the `calc` binary.
//!
//! Records go to stderr so that stdout carries nothing but display output and
//! can be piped. The filter starts from `RUST_LOG` when it is set, otherwise
//! from the configured level, and can be changed while the session runs.

use std::{
    fmt,
    io::{self, IsTerminal},
    sync::OnceLock,
};

use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("logging is not initialised")]
    NotInitialised,

    #[error("cannot apply log filter: {0}")]
    Reload(#[from] reload::Error),
}

type ReloadFilter = Box<dyn Fn(EnvFilter) -> Result<(), reload::Error> + Send + Sync>;

static RELOAD_FILTER: OnceLock<ReloadFilter> = OnceLock::new();

/// Local timestamp, coloured level, event target, then the fields.
struct LocalTimeFormat;

impl LocalTimeFormat {
    fn level_colour(level: Level) -> &'static str {
        match level {
            Level::ERROR => "\x1b[1;31m",
            Level::WARN => "\x1b[1;33m",
            Level::INFO => "\x1b[1;32m",
            Level::DEBUG => "\x1b[1;34m",
            Level::TRACE => "\x1b[1;35m",
        }
    }
}

impl<S, N> FormatEvent<S, N> for LocalTimeFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{timestamp}\x1b[0m {}{:>5}\x1b[0m \x1b[36m{}\x1b[0m ",
                Self::level_colour(*meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} {} ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn parse_filter(filter: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(filter).map_err(|source| LoggingError::InvalidFilter {
        filter: filter.to_string(),
        source,
    })
}

/// Installs the global subscriber. `RUST_LOG` wins over `default_filter`.
///
/// Calling it again is harmless; the first subscriber stays installed.
pub fn init_logging(default_filter: &str) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(default_filter)?,
    };
    let (filter_layer, handle) = reload::Layer::new(filter);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalTimeFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    if tracing_subscriber::registry()
        .with(filter_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok()
    {
        let _ = RELOAD_FILTER.set(Box::new(move |filter: EnvFilter| handle.reload(filter)));
    }
    Ok(())
}

/// Replaces the active filter. Accepts a bare level (`debug`) or any
/// `EnvFilter` directive (`calc_core=trace,warn`).
pub fn set_log_level(filter: &str) -> Result<(), LoggingError> {
    let filter = parse_filter(filter)?;
    let reload = RELOAD_FILTER.get().ok_or(LoggingError::NotInitialised)?;
    reload(filter)?;
    Ok(())
}

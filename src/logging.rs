use std::fmt;
use std::fs::File;
use std::io;
use std::sync::Mutex;

use camino::Utf8Path;
use chrono::Local;
use clap::ValueEnum;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::VdsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

// One record per line, with the level names the diagnostics translator maps.
struct RunLogFormat;

impl<S, N> FormatEvent<S, N> for RunLogFormat
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
        let module = meta
            .module_path()
            .and_then(|path| path.rsplit("::").next())
            .unwrap_or("main");
        write!(
            writer,
            "{} - vds - {} - {} - ",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            module,
            level_name(*meta.level()),
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        _ => "DEBUG",
    }
}

pub fn init(log_path: &Utf8Path, level: LogLevel) -> Result<(), VdsError> {
    let file = File::create(log_path).map_err(|err| VdsError::LoggerInit(err.to_string()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vds_api_download={}", level.directive())));
    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(RunLogFormat)
        .with_ansi(false)
        .with_writer(Mutex::new(file));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(RunLogFormat)
        .with_ansi(false)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|err| VdsError::LoggerInit(err.to_string()))
}

//! Tracing setup: stdout plus an optional `[YYYY-MM-DD HH:MM:SS] message` log file

use std::{
    fmt,
    fs::{self, File, OpenOptions},
    path::Path,
    sync::Mutex,
};

use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::{
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields},
    prelude::*,
    registry::LookupSpan,
    EnvFilter,
};

use crate::error::ReminderError;

/// One line per event: local timestamp in brackets, then the message and fields
#[derive(Debug, Default, Clone, Copy)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
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
        write!(writer, "[{}] ", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn open_log_file(path: &Path) -> Result<File, ReminderError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|e| ReminderError::persistence("create log directory", dir, e))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ReminderError::persistence("open log file", path, e))
}

/// Install the global subscriber.
///
/// Stdout logging is always installed. If the log file cannot be opened the
/// error is returned after installation so the caller can report it.
pub fn init(level: &str, log_file: Option<&Path>) -> Result<(), ReminderError> {
    let filter = EnvFilter::new(format!("desktop_reminder={},tower_http=info", level));

    let (file, file_error) = match log_file.map(open_log_file) {
        Some(Ok(file)) => (Some(file), None),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };
    let file_layer = file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .event_format(LineFormat)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    match file_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

use crate::error::{Result as ServerErrorResult, ServerError};

use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::info;

/// One line per record: timestamp, level, message, callsite.
///
/// The level is passed as `Display` so the colored and plain paths share
/// this formatter.
fn emit(
    out: FormatCallback<'_>,
    message: &fmt::Arguments<'_>,
    record: &log::Record<'_>,
    level: &dyn fmt::Display,
) {
    out.finish(format_args!(
        "{} {:<5} {} ({}:{})",
        humantime::format_rfc3339_seconds(SystemTime::now()),
        level,
        message,
        record.file().unwrap_or("?"),
        record.line().unwrap_or(0),
    ))
}

/// Install the global logger.
///
/// Records go to `log_file` when given, otherwise to stdout. `colored`
/// only applies to stdout; file output is always plain.
pub fn initialize(
    level: hmps_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let dispatch = Dispatch::new().level(level.0);

    let dispatch = if colored && log_file.is_none() {
        let palette = ColoredLevelConfig::new()
            .trace(Color::Magenta)
            .debug(Color::Blue)
            .info(Color::Green)
            .warn(Color::Yellow)
            .error(Color::Red);

        dispatch.format(move |out, message, record| {
            emit(out, message, record, &palette.color(record.level()))
        })
    } else {
        dispatch.format(|out, message, record| emit(out, message, record, &record.level()))
    };

    let dispatch = match &log_file {
        Some(path) => {
            let file = fern::log_file(path).map_err(|e| ServerError::Logger {
                message: format!("cannot open log file {}: {}", path.display(), e),
            })?;
            dispatch.chain(file)
        }
        None => dispatch.chain(std::io::stdout()),
    };

    dispatch.apply().map_err(|e| ServerError::Logger {
        message: format!("global logger already installed: {}", e),
    })?;

    match &log_file {
        Some(path) => info!("Logging at {} to {}", level.0, path.display()),
        None => info!("Logging at {} to stdout", level.0),
    }

    // Bridge tracing to log
    tracing_log::LogTracer::init().ok();

    Ok(())
}

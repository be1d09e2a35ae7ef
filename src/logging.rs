//!
//! src/logging.rs
//!
//! Initializes logger for hosts embedding the resolver so that every
//! resolution stage reports through structured tracing events
//!
//!

use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use tracing_error::ErrorLayer;
use tracing_appender::non_blocking;

use crate::config::{LogFormat, LoggingConfig};
use crate::ResolveError;

/// Keeps the non-blocking writer flushing; drop it only at shutdown
pub struct LoggingGuard(tracing_appender::non_blocking::WorkerGuard);

fn filter(cfg: &LoggingConfig) -> EnvFilter {
    std::env::var("RUST_LOG")
        .ok()
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new(cfg.filter_directives.clone()))
}

/// Install the global subscriber. A second call fails with a config error.
pub fn init_logging(cfg: &LoggingConfig) -> Result<LoggingGuard, ResolveError> {
    let (writer, guard) = non_blocking(std::io::stdout());
    let time = fmt::time::UtcTime::rfc_3339();

    let installed = match cfg.format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(writer)
                .with_timer(time)
                .with_ansi(false)
                .with_target(cfg.include_target)
                .with_file(cfg.include_file_line)
                .with_line_number(cfg.include_file_line)
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_span_list(true);

            tracing_subscriber::registry()
                .with(filter(cfg))
                .with(fmt_layer)
                .with(ErrorLayer::default())
                .try_init()
        }
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(writer)
                .with_timer(time)
                .with_ansi(cfg.with_ansi)
                .with_target(cfg.include_target)
                .with_file(cfg.include_file_line)
                .with_line_number(cfg.include_file_line)
                .pretty();

            tracing_subscriber::registry()
                .with(filter(cfg))
                .with(fmt_layer)
                .with(ErrorLayer::default())
                .try_init()
        }
    };

    installed.map_err(|e| ResolveError::Config(format!("logging init: {e}")))?;
    Ok( LoggingGuard(guard) )
}

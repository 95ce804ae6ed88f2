//! Logging configuration for tome
//!
//! Terminal logs go to stderr: stdout belongs to the scripts, to completion
//! output and to dry-run reports. An optional file layer captures debug logs.

use crate::Result;
use std::path::Path;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system
///
/// # Arguments
/// * `debug` - Enable debug level logging
/// * `log_file` - Optional path to append logs to
///
/// `RUST_LOG` overrides the default filter.
///
/// # Examples
/// ```ignore
/// // Warnings only
/// init(false, None)?;
///
/// // Debug output plus a log file
/// init(true, Some(Path::new("tome.log")))?;
/// ```
pub fn init(debug: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if debug { "debug" } else { "warn" };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            EnvFilter::try_new(format!(
                "tome={level},tome_engine={level},tome_config={level},tome_core={level}"
            ))
        })
        .map_err(|e| tome_core::Error::Config(format!("Invalid log filter: {e}")))?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(debug)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .without_time()
        .compact()
        .with_ansi(true)
        .with_filter(env_filter);

    let file_layer = match log_file {
        Some(log_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)?;

            let filter = EnvFilter::try_new("debug")
                .map_err(|e| tome_core::Error::Config(format!("Invalid log filter: {e}")))?;

            Some(
                fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(filter),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| tome_core::Error::Config(format!("Failed to initialize logging: {e}")))?;

    Ok(())
}

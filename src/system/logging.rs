//! Logging system initialization
//!
//! Console output goes to stderr so command output on stdout stays clean.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::errors::{Result, RotatorError};

const DEFAULT_LOG_FILE: &str = "banner-rotator.log";

fn build_writer(config: &LoggingConfig) -> Result<Box<dyn std::io::Write + Send + Sync>> {
    let log_file = match config.logging_file() {
        Some(file) => file,
        None => return Ok(Box::new(std::io::stderr())),
    };

    if config.enable_rotation {
        let path = Path::new(log_file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or(DEFAULT_LOG_FILE);
        let appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(filename.trim_end_matches(".log"))
            .filename_suffix("log")
            .max_log_files(config.max_backups.max(1) as usize)
            .build(dir)
            .map_err(|e| RotatorError::config(format!("Cannot create log appender: {}", e)))?;
        Ok(Box::new(appender))
    } else {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .map_err(|e| RotatorError::config(format!("Cannot open log file {}: {}", log_file, e)))?;
        Ok(Box::new(file))
    }
}

impl LoggingConfig {
    /// Configured log file, None for console output
    pub fn logging_file(&self) -> Option<&str> {
        self.file.as_deref().filter(|f| !f.is_empty())
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` overrides `logging.level` when set. The returned guard must
/// live until exit so buffered lines are flushed.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let writer = build_writer(config)?;
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(config.logging_file().is_none());

    let installed = if config.format.eq_ignore_ascii_case("json") {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| RotatorError::config(format!("Cannot install logger: {}", e)))?;

    Ok(guard)
}

//! Logging setup.
//!
//! The TUI owns the terminal, so in dashboard mode log lines go to a file.
//! One-shot CLI commands log to stderr instead. Both writers are
//! non-blocking; keep the returned [`WorkerGuard`] alive until exit so
//! buffered lines are flushed.

use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter {filter:?}: {reason}")]
    Filter { filter: String, reason: String },
    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: InitError,
    },
    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    File(&'a Path),
    Stderr,
}

/// Build the filter from the configured level.
///
/// `RUST_LOG` is already folded into the level by the config layer as a
/// fallback, so it is not consulted again here.
pub fn build_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(level).map_err(|e| TelemetryError::Filter {
        filter: level.to_string(),
        reason: e.to_string(),
    })
}

/// Single, never-rotated log file at `path`.
fn file_appender(path: &Path) -> Result<RollingFileAppender, TelemetryError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "rag-dash.log".to_string());

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
        .map_err(|source| TelemetryError::LogFile {
            path: path.display().to_string(),
            source,
        })
}

/// Install the global subscriber.
pub fn init_logging(level: &str, target: LogTarget<'_>) -> Result<WorkerGuard, TelemetryError> {
    let env_filter = build_filter(level)?;

    let guard = match target {
        LogTarget::File(path) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(path)?);
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| TelemetryError::Init(e.to_string()))?;
            guard
        }
        LogTarget::Stderr => {
            let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| TelemetryError::Init(e.to_string()))?;
            guard
        }
    };

    tracing::debug!(level, ?target, "logging initialized");
    Ok(guard)
}

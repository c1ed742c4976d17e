//! Observability and telemetry.
//!
//! Logging goes through `tracing` with a `tracing-subscriber` registry.
//! Library code records counters and histograms through the `metrics` facade;
//! no exporter is installed here, so they are no-ops unless the host process
//! installs a recorder.
//!
//! | Metric | Kind | Recorded by |
//! |--------|------|-------------|
//! | `kbindex_documents_loaded_total` | counter | corpus load |
//! | `kbindex_loads_total{status}` | counter | corpus load |
//! | `kbindex_load_duration_ms` | histogram | corpus load |
//! | `kbindex_search_total` | counter | search |
//! | `kbindex_search_duration_ms` | histogram | search |

mod logging;

pub use logging::{LOG_FILE_ENV, LOG_FORMAT_ENV, LogFormat, LoggingConfig};

use crate::config::LoggingSettings;
use crate::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Options for initialization.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitOptions {
    /// Whether verbose output was requested via CLI.
    pub verbose: bool,
}

static OBSERVABILITY_INIT: OnceLock<()> = OnceLock::new();

/// Initializes logging from config settings with env overrides.
///
/// # Errors
///
/// Returns an error if logging has already been initialized, the filter is
/// invalid, or the log file cannot be opened.
pub fn init_from_config(settings: &LoggingSettings, options: InitOptions) -> Result<()> {
    init(&LoggingConfig::from_settings(Some(settings), options.verbose))
}

/// Initializes logging for the process.
///
/// `RUST_LOG` takes precedence over the configured filter.
///
/// # Errors
///
/// Returns an error if logging has already been initialized, the filter is
/// invalid, or the log file cannot be opened.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if OBSERVABILITY_INIT.get().is_some() {
        return Err(Error::OperationFailed {
            operation: "observability_init".to_string(),
            cause: "observability already initialized".to_string(),
        });
    }

    let filter = build_filter(&config.filter)?;
    let to_file = config.file.is_some();
    let writer = match &config.file {
        Some(path) => BoxMakeWriter::new(Arc::new(open_log_file(path)?)),
        None => BoxMakeWriter::new(io::stderr),
    };
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Pretty if to_file => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(writer)
                    .with_target(true),
            )
            .try_init(),
    };
    installed.map_err(|e| Error::OperationFailed {
        operation: "observability_init".to_string(),
        cause: e.to_string(),
    })?;

    OBSERVABILITY_INIT
        .set(())
        .map_err(|()| Error::OperationFailed {
            operation: "observability_init".to_string(),
            cause: "failed to mark observability initialized".to_string(),
        })
}

/// Builds the event filter, preferring `RUST_LOG` when set.
fn build_filter(directive: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(directive)
        .map_err(|e| Error::InvalidInput(format!("log filter '{directive}': {e}")))
}

/// Opens `path` for appending, creating missing parent directories.
///
/// The handle is shared across threads; `&File` writes go straight to the
/// descriptor, and append mode keeps each line at the end of the file.
fn open_log_file(path: &Path) -> Result<File> {
    let io_error = |operation: &str, e: io::Error| Error::OperationFailed {
        operation: operation.to_string(),
        cause: format!("{}: {e}", path.display()),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error("create_log_dir", e))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| io_error("open_log_file", e))
}

//! Structured logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;

/// Environment variable selecting the log format.
pub const LOG_FORMAT_ENV: &str = "KBINDEX_LOG_FORMAT";
/// Environment variable selecting a log file.
pub const LOG_FILE_ENV: &str = "KBINDEX_LOG_FILE";

/// Filter used when nothing else is configured.
const DEFAULT_FILTER: &str = "kbindex=warn";
/// Filter used with `--verbose`.
const VERBOSE_FILTER: &str = "kbindex=debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-line.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name; unknown names fall back to `Pretty`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Log file; stderr when `None`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: DEFAULT_FILTER.to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Builds the logging config from file settings and the environment.
    ///
    /// Precedence, highest first: environment variables, config file,
    /// defaults. `verbose` replaces the default filter, not an explicit one.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        Self::resolve(
            settings,
            verbose,
            std::env::var(LOG_FORMAT_ENV).ok(),
            std::env::var(LOG_FILE_ENV).ok(),
        )
    }

    fn resolve(
        settings: Option<&LoggingSettings>,
        verbose: bool,
        env_format: Option<String>,
        env_file: Option<String>,
    ) -> Self {
        let format = env_format
            .or_else(|| settings.and_then(|s| s.format.clone()))
            .map_or_else(LogFormat::default, |f| LogFormat::parse(&f));

        let filter = settings
            .and_then(|s| s.filter.clone())
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| {
                if verbose {
                    VERBOSE_FILTER.to_string()
                } else {
                    DEFAULT_FILTER.to_string()
                }
            });

        let file = env_file
            .or_else(|| settings.and_then(|s| s.file.clone()))
            .filter(|f| !f.trim().is_empty())
            .map(PathBuf::from);

        Self {
            format,
            filter,
            file,
        }
    }
}

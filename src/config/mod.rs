//! Configuration management.
//!
//! Settings come from a TOML file:
//!
//! ```toml
//! knowledge_dir = "./knowledge"
//! max_results = 20
//! snippet_width = 64
//!
//! [logging]
//! format = "json"       # or "pretty"
//! filter = "kbindex=debug"
//! file = "/var/log/kbindex.log"
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default maximum number of search hits shown.
pub const DEFAULT_MAX_RESULTS: usize = 20;
/// Default number of characters kept on each side of a snippet match.
pub const DEFAULT_SNIPPET_WIDTH: usize = 64;
/// Default knowledge directory, relative to the working directory.
pub const DEFAULT_KNOWLEDGE_DIR: &str = "knowledge";

/// Main configuration for kbindex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KbConfig {
    /// Directory holding the Markdown articles.
    pub knowledge_dir: PathBuf,
    /// Maximum number of search results.
    pub max_results: usize,
    /// Snippet context width in characters.
    pub snippet_width: usize,
    /// Logging settings (overridable from the environment).
    pub logging: LoggingSettings,
}

/// Logging section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// Output format: "pretty" or "json".
    pub format: Option<String>,
    /// `EnvFilter` directive, e.g. `kbindex=debug`.
    pub filter: Option<String>,
    /// Log file path; logs go to stderr when unset.
    pub file: Option<String>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Knowledge directory.
    pub knowledge_dir: Option<String>,
    /// Max results.
    pub max_results: Option<usize>,
    /// Snippet width.
    pub snippet_width: Option<usize>,
    /// Logging configuration.
    pub logging: Option<LoggingSettings>,
}

impl Default for KbConfig {
    fn default() -> Self {
        Self {
            knowledge_dir: PathBuf::from(DEFAULT_KNOWLEDGE_DIR),
            max_results: DEFAULT_MAX_RESULTS,
            snippet_width: DEFAULT_SNIPPET_WIDTH,
            logging: LoggingSettings::default(),
        }
    }
}

impl KbConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the file cannot be read or parsed,
    /// and [`Error::InvalidInput`] if a value is out of range.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Same as [`load_from_file`](Self::load_from_file), minus I/O.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Self::from_config_file(file)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/kbindex/` on macOS)
    /// 2. XDG config dir (`~/.config/kbindex/` for Unix compatibility)
    ///
    /// Returns default configuration if no usable config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join("kbindex").join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("kbindex")
                .join("config.toml"),
        ];

        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring config file");
                },
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `KbConfig`.
    fn from_config_file(file: ConfigFile) -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = file.knowledge_dir {
            config.knowledge_dir = PathBuf::from(dir);
        }
        if let Some(max_results) = file.max_results {
            if max_results == 0 {
                return Err(Error::InvalidInput(
                    "max_results must be at least 1".to_string(),
                ));
            }
            config.max_results = max_results;
        }
        if let Some(width) = file.snippet_width {
            config.snippet_width = width;
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        Ok(config)
    }

    /// Sets the knowledge directory.
    #[must_use]
    pub fn with_knowledge_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.knowledge_dir = path.into();
        self
    }

    /// Sets the maximum number of results.
    #[must_use]
    pub const fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

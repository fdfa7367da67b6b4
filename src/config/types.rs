//! Configuration data model.
//!
//! Struct definitions plus default values. Loading and precedence live in
//! `config::mod`.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub history: HistoryConfig,
    pub logging: LoggingConfig,
}

/// Display / rendering preferences.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Cyan cursor path, colored errors and suggestions.
    pub color: bool,
    /// Print the welcome and farewell lines.
    pub banner: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            banner: true,
        }
    }
}

/// Input history persistence.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryConfig {
    pub persist: bool,
    /// History file. After loading, `~` is expanded and a missing value is
    /// filled with the default location when `persist` is on.
    pub path: Option<PathBuf>,
}

impl HistoryConfig {
    /// File to load and save history from, when persistence is enabled.
    pub fn active_path(&self) -> Option<&PathBuf> {
        if self.persist {
            self.path.as_ref()
        } else {
            None
        }
    }
}

/// Log filter for the `tracing` subscriber.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Where the configuration text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config <path>`.
    Explicit(PathBuf),
    /// `./fmsh.toml`.
    Local,
    /// `$XDG_CONFIG_HOME/fmsh/fmsh.toml`.
    Global(PathBuf),
    BuiltInDefaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) | Self::Global(path) => write!(f, "{}", path.display()),
            Self::Local => write!(f, "./fmsh.toml"),
            Self::BuiltInDefaults => write!(f, "built-in defaults"),
        }
    }
}

/// Loaded config plus where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

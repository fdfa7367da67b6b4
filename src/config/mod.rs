//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. `--no-color` on the command line (applied by the binary)
//! 2. Environment variables (`FMSH_NO_COLOR`, `FMSH_HISTORY`, `FMSH_LOG`)
//! 3. TOML file specified via --config CLI flag
//! 4. ./fmsh.toml in the current directory
//! 5. $XDG_CONFIG_HOME/fmsh/fmsh.toml (or ~/.config/fmsh/fmsh.toml)
//! 6. Built-in defaults

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

mod env;
mod types;

pub use types::{
    Config, ConfigSource, DisplayConfig, HistoryConfig, LoadedConfig, LoggingConfig,
    DEFAULT_LOG_FILTER,
};

const APP_DIR: &str = "fmsh";
const CONFIG_FILE: &str = "fmsh.toml";
const HISTORY_FILE: &str = "history.json";

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag); it
/// must exist.
pub fn load_config(path_override: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&Path>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) = read_config_text(path_override, &read_file, &config_root)?;
    let mut config: Config = toml::from_str(&config_text)?;
    env::apply_env_overrides(&mut config, &env_lookup);
    resolve_history_path(&mut config, &config_root);
    validate(&config)?;
    tracing::debug!(source = %source, "configuration loaded");
    Ok(LoadedConfig { config, source })
}

fn read_config_text<FRead, FRoot>(
    path_override: Option<&Path>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    if let Some(path) = path_override {
        let text = read_file(path)?;
        return Ok((text, ConfigSource::Explicit(path.to_path_buf())));
    }

    if let Ok(text) = read_file(Path::new(CONFIG_FILE)) {
        return Ok((text, ConfigSource::Local));
    }
    if let Some(dir) = config_root() {
        let global = dir.join(APP_DIR).join(CONFIG_FILE);
        if let Ok(text) = read_file(&global) {
            return Ok((text, ConfigSource::Global(global)));
        }
    }

    Ok((String::new(), ConfigSource::BuiltInDefaults))
}

/// Expand `~/` in the history path and fill in the default location.
fn resolve_history_path<FRoot>(config: &mut Config, config_root: &FRoot)
where
    FRoot: Fn() -> Option<PathBuf>,
{
    config.history.path = match config.history.path.take() {
        Some(path) => Some(expand_home(&path)),
        None if config.history.persist => {
            config_root().map(|dir| dir.join(APP_DIR).join(HISTORY_FILE))
        }
        None => None,
    };
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let filter = config.logging.filter.trim();
    if filter.is_empty() {
        return Err(ConfigError::Invalid("logging.filter must not be empty".into()));
    }
    tracing_subscriber::EnvFilter::try_new(filter).map_err(|e| {
        ConfigError::Invalid(format!("invalid logging.filter `{filter}`: {e}"))
    })?;
    if config.history.persist && config.history.path.is_none() {
        return Err(ConfigError::Invalid(
            "history.persist is on but no history path could be determined".into(),
        ));
    }
    Ok(())
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// Return the base directory for global config (`$XDG_CONFIG_HOME` or
/// `~/.config`).
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

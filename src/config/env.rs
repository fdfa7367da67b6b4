//! Environment overrides.
//!
//! `FMSH_*` variables override values read from the config file. Blank values
//! are treated as unset.

use std::path::PathBuf;

use super::Config;

pub(super) const ENV_NO_COLOR: &str = "FMSH_NO_COLOR";
pub(super) const ENV_HISTORY: &str = "FMSH_HISTORY";
pub(super) const ENV_LOG: &str = "FMSH_LOG";

pub(super) fn apply_env_overrides<FEnv>(config: &mut Config, env_lookup: &FEnv)
where
    FEnv: Fn(&str) -> Option<String>,
{
    if env_value(env_lookup, ENV_NO_COLOR).is_some() {
        config.display.color = false;
    }
    if let Some(path) = env_value(env_lookup, ENV_HISTORY) {
        config.history.persist = true;
        config.history.path = Some(PathBuf::from(path));
    }
    if let Some(filter) = env_value(env_lookup, ENV_LOG) {
        config.logging.filter = filter;
    }
}

/// Trimmed value of `name`, or `None` when unset or blank.
pub(super) fn env_value<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn no_overrides_keep_file_values() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, &lookup(&[]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn each_variable_overrides_its_field() {
        let mut config = Config::default();
        apply_env_overrides(
            &mut config,
            &lookup(&[
                (ENV_NO_COLOR, "1"),
                (ENV_HISTORY, "/tmp/h.json"),
                (ENV_LOG, "fmsh=debug"),
            ]),
        );
        assert!(!config.display.color);
        assert!(config.history.persist);
        assert_eq!(config.history.path, Some(PathBuf::from("/tmp/h.json")));
        assert_eq!(config.logging.filter, "fmsh=debug");
    }

    #[test]
    fn blank_values_are_ignored() {
        let mut config = Config::default();
        apply_env_overrides(
            &mut config,
            &lookup(&[(ENV_NO_COLOR, "  "), (ENV_HISTORY, ""), (ENV_LOG, " ")]),
        );
        assert_eq!(config, Config::default());
    }
}

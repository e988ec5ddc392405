//! Layered configuration for the CLI.
//!
//! Precedence, lowest first: built-in defaults, the TOML file, environment
//! variables (after an optional `.env` is loaded), command line flags.

pub mod error;
mod loader;

use std::path::PathBuf;

use reelrank_core::{Config, MalformedRows, TieBreak};

use self::error::ConfigLoadError;

pub use loader::ConfigLoader;

/// Environment variable naming the config file.
pub const ENV_CONFIG_PATH: &str = "REELRANK_CONFIG_PATH";
pub const ENV_LIST_SIZE: &str = "REELRANK_LIST_SIZE";
pub const ENV_TIE_BREAK: &str = "REELRANK_TIE_BREAK";
pub const ENV_SKIP_MALFORMED: &str = "REELRANK_SKIP_MALFORMED";

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "reelrank.toml";

/// Source that produced the file layer of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "built-in defaults"),
            ConfigSource::EnvPath(path) => {
                write!(f, "{} (via {ENV_CONFIG_PATH})", path.display())
            }
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolved configuration plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLoad {
    pub config: Config,
    pub source: ConfigSource,
}

/// Sparse settings layered over a loaded [`Config`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub list_size: Option<usize>,
    pub tie_break: Option<TieBreak>,
    pub skip_malformed: Option<bool>,
}

impl ConfigOverrides {
    /// Read overrides through `lookup`, normally `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut overrides = ConfigOverrides::default();

        if let Some(raw) = non_empty(lookup(ENV_LIST_SIZE)) {
            let size = raw.parse::<usize>().map_err(|err| {
                ConfigLoadError::InvalidEnv {
                    key: ENV_LIST_SIZE,
                    value: raw.clone(),
                    reason: err.to_string(),
                }
            })?;
            overrides.list_size = Some(size);
        }

        if let Some(raw) = non_empty(lookup(ENV_TIE_BREAK)) {
            let tie_break = raw.parse::<TieBreak>().map_err(|reason| {
                ConfigLoadError::InvalidEnv {
                    key: ENV_TIE_BREAK,
                    value: raw.clone(),
                    reason,
                }
            })?;
            overrides.tie_break = Some(tie_break);
        }

        if let Some(raw) = non_empty(lookup(ENV_SKIP_MALFORMED)) {
            overrides.skip_malformed = Some(parse_flag(&raw).ok_or_else(|| {
                ConfigLoadError::InvalidEnv {
                    key: ENV_SKIP_MALFORMED,
                    value: raw.clone(),
                    reason: "expected true/false, 1/0, yes/no".to_string(),
                }
            })?);
        }

        Ok(overrides)
    }

    pub fn apply(&self, config: &mut Config) {
        if let Some(size) = self.list_size {
            config.ranking.list_size = size;
        }
        if let Some(tie_break) = self.tie_break {
            config.ranking.tie_break = tie_break;
        }
        if let Some(skip) = self.skip_malformed {
            config.ingest.malformed_rows = if skip {
                MalformedRows::Skip
            } else {
                MalformedRows::Fail
            };
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(
        pairs: &[(&str, &str)],
    ) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_overrides_parse() {
        let overrides = ConfigOverrides::from_lookup(lookup(&[
            (ENV_LIST_SIZE, "5"),
            (ENV_TIE_BREAK, "title"),
            (ENV_SKIP_MALFORMED, "yes"),
        ]))
        .unwrap();

        assert_eq!(
            overrides,
            ConfigOverrides {
                list_size: Some(5),
                tie_break: Some(TieBreak::Title),
                skip_malformed: Some(true),
            }
        );
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let overrides =
            ConfigOverrides::from_lookup(lookup(&[(ENV_LIST_SIZE, "  ")]))
                .unwrap();
        assert_eq!(overrides, ConfigOverrides::default());
    }

    #[test]
    fn bad_env_values_name_the_key() {
        let err =
            ConfigOverrides::from_lookup(lookup(&[(ENV_LIST_SIZE, "ten")]))
                .unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::InvalidEnv {
                key: ENV_LIST_SIZE,
                ..
            }
        ));
    }

    #[test]
    fn apply_only_touches_set_fields() {
        let mut config = Config::default();
        ConfigOverrides {
            skip_malformed: Some(true),
            ..ConfigOverrides::default()
        }
        .apply(&mut config);

        assert_eq!(config.ingest.malformed_rows, MalformedRows::Skip);
        assert_eq!(config.ranking, Config::default().ranking);
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use reelrank_core::Config;
use tracing::{debug, info};

use super::error::ConfigLoadError;
use super::{
    ConfigLoad, ConfigOverrides, ConfigSource, DEFAULT_CONFIG_FILE,
    ENV_CONFIG_PATH,
};

/// Resolves a [`Config`] from file, environment and flag layers.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    explicit_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
    search_dir: PathBuf,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            explicit_path: None,
            env_file: None,
            search_dir: PathBuf::from("."),
        }
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config file given on the command line; wins over the environment.
    pub fn with_path(mut self, path: Option<PathBuf>) -> Self {
        self.explicit_path = path;
        self
    }

    /// `.env` file to load before reading the environment. When unset, a
    /// `.env` in the working directory is loaded if present.
    pub fn with_env_file(mut self, path: Option<PathBuf>) -> Self {
        self.env_file = path;
        self
    }

    /// Directory searched for `reelrank.toml` when no path is configured.
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dir = dir.into();
        self
    }

    /// Load using the process environment.
    pub fn load(
        &self,
        cli: &ConfigOverrides,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        self.load_env_file()?;
        self.load_with(|key| std::env::var(key).ok(), cli)
    }

    /// Load using `lookup` in place of the process environment.
    pub fn load_with<F>(
        &self,
        lookup: F,
        cli: &ConfigOverrides,
    ) -> Result<ConfigLoad, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (mut config, source) = self.load_file_layer(&lookup)?;

        ConfigOverrides::from_lookup(&lookup)?.apply(&mut config);
        cli.apply(&mut config);
        config.validate()?;

        info!(
            source = %source,
            list_size = config.ranking.list_size,
            tie_break = %config.ranking.tie_break,
            "configuration resolved"
        );
        Ok(ConfigLoad { config, source })
    }

    fn load_env_file(&self) -> Result<(), ConfigLoadError> {
        let result = match &self.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| path.clone()),
            None => dotenvy::dotenv(),
        };
        match result {
            Ok(path) => {
                debug!(path = %path.display(), "loaded env file");
                Ok(())
            }
            Err(err) if err.not_found() => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn load_file_layer<F>(
        &self,
        lookup: &F,
    ) -> Result<(Config, ConfigSource), ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = &self.explicit_path {
            return Ok((read_file(path)?, ConfigSource::File(path.clone())));
        }

        if let Some(path_str) = lookup(ENV_CONFIG_PATH)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str.trim());
            return Ok((read_file(&path)?, ConfigSource::EnvPath(path)));
        }

        let candidate = self.search_dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            return Ok((read_file(&candidate)?, ConfigSource::File(candidate)));
        }

        Ok((Config::default(), ConfigSource::Default))
    }
}

fn read_file(path: &Path) -> Result<Config, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::FileIo {
            path: path.to_path_buf(),
            source,
        })?;
    toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelrank_core::{MalformedRows, TieBreak};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn defaults_when_nothing_is_configured() {
        let dir = tempfile::tempdir().unwrap();
        let load = ConfigLoader::new()
            .with_search_dir(dir.path())
            .load_with(no_env, &ConfigOverrides::default())
            .unwrap();

        assert_eq!(load.config, Config::default());
        assert_eq!(load.source, ConfigSource::Default);
    }

    #[test]
    fn picks_up_config_in_search_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            DEFAULT_CONFIG_FILE,
            "[ranking]\nlist_size = 3\n",
        );

        let load = ConfigLoader::new()
            .with_search_dir(dir.path())
            .load_with(no_env, &ConfigOverrides::default())
            .unwrap();

        assert_eq!(load.config.ranking.list_size, 3);
        assert_eq!(load.source, ConfigSource::File(path));
    }

    #[test]
    fn env_path_beats_search_dir_and_flag_path_beats_env() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            DEFAULT_CONFIG_FILE,
            "[ranking]\nlist_size = 3\n",
        );
        let env_path =
            write_config(dir.path(), "env.toml", "[ranking]\nlist_size = 4\n");
        let flag_path =
            write_config(dir.path(), "flag.toml", "[ranking]\nlist_size = 5\n");

        let env_value = env_path.display().to_string();
        let lookup = move |key: &str| {
            (key == ENV_CONFIG_PATH).then(|| env_value.clone())
        };

        let via_env = ConfigLoader::new()
            .with_search_dir(dir.path())
            .load_with(&lookup, &ConfigOverrides::default())
            .unwrap();
        assert_eq!(via_env.config.ranking.list_size, 4);
        assert_eq!(via_env.source, ConfigSource::EnvPath(env_path));

        let via_flag = ConfigLoader::new()
            .with_search_dir(dir.path())
            .with_path(Some(flag_path.clone()))
            .load_with(&lookup, &ConfigOverrides::default())
            .unwrap();
        assert_eq!(via_flag.config.ranking.list_size, 5);
        assert_eq!(via_flag.source, ConfigSource::File(flag_path));
    }

    #[test]
    fn env_values_override_file_and_flags_override_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "custom.toml",
            "[ranking]\nlist_size = 3\ntie_break = \"title\"\n",
        );
        let lookup = |key: &str| match key {
            "REELRANK_LIST_SIZE" => Some("7".to_string()),
            "REELRANK_SKIP_MALFORMED" => Some("true".to_string()),
            _ => None,
        };

        let env_only = ConfigLoader::new()
            .with_path(Some(path.clone()))
            .load_with(lookup, &ConfigOverrides::default())
            .unwrap();
        assert_eq!(env_only.config.ranking.list_size, 7);
        assert_eq!(env_only.config.ranking.tie_break, TieBreak::Title);
        assert_eq!(env_only.config.ingest.malformed_rows, MalformedRows::Skip);

        let cli = ConfigOverrides {
            list_size: Some(2),
            tie_break: Some(TieBreak::InputOrder),
            skip_malformed: Some(false),
        };
        let with_flags = ConfigLoader::new()
            .with_path(Some(path))
            .load_with(lookup, &cli)
            .unwrap();
        assert_eq!(with_flags.config.ranking.list_size, 2);
        assert_eq!(with_flags.config.ranking.tie_break, TieBreak::InputOrder);
        assert_eq!(
            with_flags.config.ingest.malformed_rows,
            MalformedRows::Fail
        );
    }

    #[test]
    fn unreadable_and_invalid_files_are_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = ConfigLoader::new()
            .with_path(Some(dir.path().join("missing.toml")))
            .load_with(no_env, &ConfigOverrides::default())
            .unwrap_err();
        assert!(matches!(missing, ConfigLoadError::FileIo { .. }));

        let broken = write_config(dir.path(), "broken.toml", "[ranking\n");
        let parse = ConfigLoader::new()
            .with_path(Some(broken))
            .load_with(no_env, &ConfigOverrides::default())
            .unwrap_err();
        assert!(matches!(parse, ConfigLoadError::Parse { .. }));
    }

    #[test]
    fn merged_config_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::new()
            .with_search_dir(dir.path())
            .load_with(
                no_env,
                &ConfigOverrides {
                    list_size: Some(0),
                    ..ConfigOverrides::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Invalid(_)));
    }
}

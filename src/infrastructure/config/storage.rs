use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::app_config::AppConfig;
use crate::infrastructure::atomic::write_atomic;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// The `config.toml` signcopy runs with.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    /// Uses `path_override` when given, otherwise the per-user config
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigDirNotFound` when there is no override and no home
    /// directory to derive a default from.
    pub fn resolve(path_override: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path_override {
            Some(path) => path.to_path_buf(),
            None => AppConfig::default_config_path().ok_or(ConfigError::ConfigDirNotFound)?,
        };
        Ok(Self::at(path))
    }

    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration. A missing file is seeded with the defaults so
    /// operators have every limit to edit; a malformed one is left alone and
    /// the defaults are used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the defaults cannot
    /// be written.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "Config file not found, writing defaults");
                let config = AppConfig::default();
                self.save(&config)?;
                return Ok(config);
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => {
                debug!(path = %self.path.display(), "Loaded config");
                Ok(config)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Malformed config, using defaults");
                Ok(AppConfig::default())
            }
        }
    }

    fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config)?;
        write_atomic(&self.path, content.as_bytes()).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ImageSettings;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_seeded_with_defaults() {
        let dir = tempdir().unwrap();
        let file = ConfigFile::at(dir.path().join("signcopy/config.toml"));

        let config = file.load().unwrap();

        assert_eq!(config.image_settings(), ImageSettings::default());
        let seeded = std::fs::read_to_string(file.path()).unwrap();
        assert!(seeded.contains("[save]"));
        assert!(seeded.contains("[permissions]"));
        assert_eq!(file.load().unwrap().save.limit, 3);
    }

    #[test]
    fn test_malformed_file_falls_back_and_is_kept() {
        let dir = tempdir().unwrap();
        let file = ConfigFile::at(dir.path().join("config.toml"));
        std::fs::write(file.path(), "[save\nlimit = 9").unwrap();

        let config = file.load().unwrap();

        assert_eq!(config.paste.cooldown_secs, 60);
        assert_eq!(
            std::fs::read_to_string(file.path()).unwrap(),
            "[save\nlimit = 9"
        );
    }

    #[test]
    fn test_override_is_used() {
        let dir = tempdir().unwrap();
        let custom = dir.path().join("custom.toml");
        std::fs::write(&custom, "[submit]\nenabled = true\nlimit = 1\n").unwrap();

        let file = ConfigFile::resolve(Some(&custom)).unwrap();
        let config = file.load().unwrap();

        assert_eq!(file.path(), custom);
        assert!(config.submit.enabled);
        assert_eq!(config.submit.limit, 1);
    }
}

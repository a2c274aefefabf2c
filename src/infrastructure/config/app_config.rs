//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::application::{ImageSettings, QuotaSettings, SubmitSettings};
use crate::domain::canvas::{CanvasSpec, CanvasTable};
use crate::domain::entities::UserId;
use crate::domain::services::PurgePolicy;

pub(crate) const APP_NAME: &str = "signcopy";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "signcopy";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// World manifest path.
    #[serde(skip)]
    pub world: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Directory holding `images.json` and the image vault.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub save: SaveConfig,

    #[serde(default)]
    pub paste: PasteConfig,

    #[serde(default)]
    pub submit: SubmitConfig,

    #[serde(default)]
    pub purge: PurgeConfig,

    #[serde(default)]
    pub permissions: PermissionsConfig,

    /// Extra or overridden canvas sizes keyed by object type.
    #[serde(default)]
    pub canvases: HashMap<String, CanvasSpec>,
}

/// Save command options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveConfig {
    #[serde(default = "default_save_limit")]
    pub limit: usize,

    #[serde(default = "default_save_privileged_limit")]
    pub privileged_limit: usize,

    /// Seconds, 0 to disable.
    #[serde(default = "default_cooldown")]
    pub cooldown_secs: u64,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            limit: default_save_limit(),
            privileged_limit: default_save_privileged_limit(),
            cooldown_secs: default_cooldown(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasteConfig {
    /// Seconds, 0 to disable.
    #[serde(default = "default_paste_cooldown")]
    pub cooldown_secs: u64,
}

impl Default for PasteConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: default_paste_cooldown(),
        }
    }
}

/// Submit command options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Tell admins about pending submissions.
    #[serde(default)]
    pub notify_admins: bool,

    #[serde(default = "default_submit_limit")]
    pub limit: usize,

    #[serde(default = "default_submit_privileged_limit")]
    pub privileged_limit: usize,

    /// Seconds, 0 to disable.
    #[serde(default = "default_cooldown")]
    pub cooldown_secs: u64,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            notify_admins: false,
            limit: default_submit_limit(),
            privileged_limit: default_submit_privileged_limit(),
            cooldown_secs: default_cooldown(),
        }
    }
}

/// Inactivity purge thresholds in days, 0 to never purge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurgeConfig {
    #[serde(default = "default_purge_days")]
    pub standard_days: u32,

    #[serde(default)]
    pub privileged_days: u32,
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            standard_days: default_purge_days(),
            privileged_days: 0,
        }
    }
}

/// User grants and tiers. Anyone not listed is a standard user without
/// access; admins may do everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermissionsConfig {
    /// May save, paste, remove and list.
    #[serde(default)]
    pub users: Vec<UserId>,

    /// May submit images for review.
    #[serde(default)]
    pub submitters: Vec<UserId>,

    #[serde(default)]
    pub privileged: Vec<UserId>,

    #[serde(default)]
    pub admins: Vec<UserId>,
}

fn default_save_limit() -> usize {
    3
}

fn default_save_privileged_limit() -> usize {
    5
}

fn default_submit_limit() -> usize {
    2
}

fn default_submit_privileged_limit() -> usize {
    4
}

fn default_cooldown() -> u64 {
    120
}

fn default_paste_cooldown() -> u64 {
    60
}

fn default_purge_days() -> u32 {
    90
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(data_dir) = &args.data_dir {
            self.data_dir = Some(data_dir.clone());
        }
        if let Some(world) = &args.world {
            self.world = Some(world.clone());
        }
    }

    /// Limits the image service runs with.
    #[must_use]
    pub fn image_settings(&self) -> ImageSettings {
        ImageSettings {
            save: QuotaSettings {
                limit: self.save.limit,
                privileged_limit: self.save.privileged_limit,
                cooldown_secs: self.save.cooldown_secs,
            },
            paste_cooldown_secs: self.paste.cooldown_secs,
            submit: SubmitSettings {
                enabled: self.submit.enabled,
                notify_admins: self.submit.notify_admins,
                quota: QuotaSettings {
                    limit: self.submit.limit,
                    privileged_limit: self.submit.privileged_limit,
                    cooldown_secs: self.submit.cooldown_secs,
                },
            },
            purge: PurgePolicy::new(self.purge.standard_days, self.purge.privileged_days),
        }
    }

    /// Built-in canvases with configured entries layered on top.
    #[must_use]
    pub fn canvas_table(&self) -> CanvasTable {
        self.canvases
            .iter()
            .fold(CanvasTable::builtin(), |table, (kind, spec)| {
                table.with(kind.clone(), spec.clone())
            })
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default data directory.
    #[must_use]
    pub fn default_data_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        Self::default_data_dir().map(|dir| dir.join("signcopy.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns effective data directory.
    #[must_use]
    pub fn effective_data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(Self::default_data_dir)
    }

    /// Returns effective world manifest path, `world.toml` in the data
    /// directory unless overridden.
    #[must_use]
    pub fn effective_world_path(&self) -> Option<PathBuf> {
        self.world
            .clone()
            .or_else(|| self.effective_data_dir().map(|dir| dir.join("world.toml")))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            world: None,
            log_level: LogLevel::Info,
            data_dir: None,
            save: SaveConfig::default(),
            paste: PasteConfig::default(),
            submit: SubmitConfig::default(),
            purge: PurgeConfig::default(),
            permissions: PermissionsConfig::default(),
            canvases: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            log_level = "debug"

            [save]
            limit = 10

            [submit]
            enabled = true

            [purge]
            privileged_days = 365

            [permissions]
            users = [76561198000000001, 76561198000000002]
            admins = [76561198000000000]

            [canvases."sign.neon.xl"]
            width = 250
            height = 250
            label = "XL Neon Sign"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.save.limit, 10);
        assert_eq!(config.save.privileged_limit, 5);
        assert_eq!(config.save.cooldown_secs, 120);
        assert!(config.submit.enabled);
        assert!(!config.submit.notify_admins);
        assert_eq!(config.purge.standard_days, 90);
        assert_eq!(config.purge.privileged_days, 365);
        assert_eq!(config.permissions.admins, [UserId(76_561_198_000_000_000)]);
        assert_eq!(config.permissions.users.len(), 2);
        assert!(config.permissions.submitters.is_empty());

        let table = config.canvas_table();
        assert_eq!(table.dimensions("sign.neon.xl").unwrap().width, 250);
        assert!(table.dimensions("sign.large.wood").is_some());
    }

    #[test]
    fn test_default_settings_match_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.image_settings(), ImageSettings::default());
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let content = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&content).unwrap();

        assert_eq!(parsed.image_settings(), ImageSettings::default());
        assert!(parsed.canvases.is_empty());
    }

    #[test]
    fn test_canvas_override_replaces_builtin() {
        let mut config = AppConfig::default();
        config.canvases.insert(
            "sign.small.wood".to_string(),
            CanvasSpec::new(64, 32, "Tiny"),
        );

        let table = config.canvas_table();
        let spec = table.dimensions("sign.small.wood").unwrap();

        assert_eq!((spec.width, spec.height), (64, 32));
        assert_eq!(table.len(), CanvasTable::builtin().len());
    }

    #[test]
    fn test_world_defaults_to_data_dir() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("/srv/signcopy")),
            ..AppConfig::default()
        };

        assert_eq!(
            config.effective_world_path(),
            Some(PathBuf::from("/srv/signcopy/world.toml"))
        );
    }
}

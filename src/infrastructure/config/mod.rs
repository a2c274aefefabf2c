//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{
    AppConfig, LogLevel, PasteConfig, PermissionsConfig, PurgeConfig, SaveConfig, SubmitConfig,
};
pub use args::{CliArgs, Command};
pub use storage::{ConfigError, ConfigFile};

//! Infrastructure layer with adapters behind the domain ports.

mod atomic;

/// System clock.
pub mod clock;
/// Application configuration.
pub mod config;
/// Configured permission tiers.
pub mod permissions;
/// Image store persistence.
pub mod state_store;
/// On-disk image vault.
pub mod vault;
/// File-backed world objects and textures.
pub mod world;

pub use clock::SystemClock;
pub use config::{AppConfig, CliArgs, Command, ConfigError, ConfigFile, LogLevel};
pub use permissions::ConfigPermissionOracle;
pub use state_store::{StateError, StateStore};
pub use vault::DiskImageVault;
pub use world::FileWorld;

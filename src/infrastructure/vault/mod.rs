//! Backing storage for captured images.

mod disk_vault;

pub use disk_vault::DiskImageVault;

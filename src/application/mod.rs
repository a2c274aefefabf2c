//! Application layer orchestrating the domain through its ports.

/// Data transfer objects.
pub mod dto;
/// Services.
pub mod services;
/// Runtime limits.
pub mod settings;

pub use dto::{ListedImage, PasteOutcome, RemoveOutcome, SavedImage};
pub use services::{ImageService, PurgeReport, PurgeScheduler, ServicePorts};
pub use settings::{ImageSettings, QuotaSettings, SubmitSettings};

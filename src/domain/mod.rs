//! Domain layer with core business entities and port definitions.

/// Canvas size table.
pub mod canvas;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Persisted store of collections and submissions.
pub mod image_store;
/// Port definitions.
pub mod ports;
/// Pure domain services.
pub mod services;

pub use canvas::{CanvasSpec, CanvasTable};
pub use entities::{ImageRecord, OperationKind, SlotReference, Tier, UserId};
pub use errors::ImageError;
pub use image_store::ImageStore;
pub use ports::{Clock, ImageVault, ObjectLocator, PermissionOracle, TextureBackend};

//! Texture backend port definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::{TextureHandle, WorldObject};
use crate::domain::errors::WorldError;

/// Port for reading and writing the bitmap shown on a world object.
#[async_trait]
pub trait TextureBackend: Send + Sync {
    /// Reads the object's current bitmap, `None` when it shows nothing.
    async fn fetch(&self, object: &WorldObject) -> Result<Option<Bytes>, WorldError>;

    /// Replaces the object's bitmap.
    async fn store(&self, object: &WorldObject, data: Bytes) -> Result<TextureHandle, WorldError>;
}

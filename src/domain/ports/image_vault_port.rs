//! Image vault port definition.

use async_trait::async_trait;

use crate::domain::entities::{StoredImage, VaultBucket, VaultKey};
use crate::domain::errors::VaultError;

/// Port for the backing storage of captured bitmaps.
/// Implementations must be thread-safe.
#[async_trait]
pub trait ImageVault: Send + Sync {
    /// Writes `image` under `key`, replacing anything already there.
    async fn write(&self, key: &VaultKey, image: &StoredImage) -> Result<(), VaultError>;

    /// Reads the image under `key`.
    async fn read(&self, key: &VaultKey) -> Result<Option<StoredImage>, VaultError>;

    /// Clears the image under `key`. Clearing an absent key succeeds.
    async fn clear(&self, key: &VaultKey) -> Result<(), VaultError>;

    /// Flags an emptied bucket for removal by external cleanup.
    async fn mark_for_cleanup(&self, bucket: VaultBucket) -> Result<(), VaultError>;
}

//! File-backed image vault.
//!
//! Layout under the root directory:
//! - `<user>/image_<slot>.json` for personal slots
//! - `0_submitted/<user>_<slot>.json` for submissions
//! - `<bucket>_MARKED/` next to a bucket emptied by a remove or purge

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace, warn};

use crate::domain::entities::{StoredImage, VaultBucket, VaultKey};
use crate::domain::errors::VaultError;
use crate::domain::ports::ImageVault;

const SUBMISSIONS_DIR: &str = "0_submitted";
const FILE_PREFIX: &str = "image_";
const MARKER_SUFFIX: &str = "_MARKED";

/// Stores each image as a JSON document with base64 pixel data.
pub struct DiskImageVault {
    root: PathBuf,
}

impl DiskImageVault {
    /// Creates a vault rooted at `root`.
    ///
    /// # Errors
    /// Returns error if the root directory cannot be created.
    pub async fn new(root: PathBuf) -> Result<Self, VaultError> {
        fs::create_dir_all(&root)
            .await
            .map_err(|e| VaultError::WriteFailed(format!("Failed to create vault dir: {e}")))?;
        Ok(Self { root })
    }

    fn bucket_dir(&self, bucket: VaultBucket) -> PathBuf {
        match bucket {
            VaultBucket::User(user) => self.root.join(user.to_string()),
            VaultBucket::Submissions => self.root.join(SUBMISSIONS_DIR),
        }
    }

    fn image_path(&self, key: &VaultKey) -> PathBuf {
        let file_name = match key {
            VaultKey::Slot { slot_index, .. } => format!("{FILE_PREFIX}{slot_index}.json"),
            VaultKey::Submission { user, slot_index } => format!("{user}_{slot_index}.json"),
        };
        self.bucket_dir(key.bucket()).join(file_name)
    }
}

#[async_trait]
impl ImageVault for DiskImageVault {
    async fn write(&self, key: &VaultKey, image: &StoredImage) -> Result<(), VaultError> {
        let path = self.image_path(key);
        let content = serde_json::to_vec(image)
            .map_err(|e| VaultError::WriteFailed(format!("Failed to encode {key}: {e}")))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| VaultError::WriteFailed(format!("Failed to create dir: {e}")))?;
        }

        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| VaultError::WriteFailed(format!("Failed to create image file: {e}")))?;
        file.write_all(&content)
            .await
            .map_err(|e| VaultError::WriteFailed(format!("Failed to write image file: {e}")))?;
        file.flush()
            .await
            .map_err(|e| VaultError::WriteFailed(format!("Failed to flush image file: {e}")))?;

        debug!(key = %key, path = %path.display(), size = image.data.len(), "Stored image in vault");
        Ok(())
    }

    async fn read(&self, key: &VaultKey) -> Result<Option<StoredImage>, VaultError> {
        let path = self.image_path(key);
        let content = match fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(key = %key, "Vault miss");
                return Ok(None);
            }
            Err(e) => {
                return Err(VaultError::ReadFailed(format!(
                    "Failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        serde_json::from_slice(&content).map(Some).map_err(|e| {
            warn!(key = %key, error = %e, "Corrupt vault entry");
            VaultError::Corrupt(format!("{}: {e}", path.display()))
        })
    }

    async fn clear(&self, key: &VaultKey) -> Result<(), VaultError> {
        let path = self.image_path(key);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key = %key, "Cleared vault entry");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VaultError::ClearFailed(format!(
                "Failed to remove {}: {e}",
                path.display()
            ))),
        }
    }

    async fn mark_for_cleanup(&self, bucket: VaultBucket) -> Result<(), VaultError> {
        let dir = self.bucket_dir(bucket);
        let Some(name) = dir.file_name() else {
            return Err(VaultError::WriteFailed("Invalid bucket path".to_string()));
        };
        let mut marker_name = name.to_os_string();
        marker_name.push(MARKER_SUFFIX);
        let marker = dir.with_file_name(marker_name);

        fs::create_dir_all(&marker)
            .await
            .map_err(|e| VaultError::WriteFailed(format!("Failed to create marker: {e}")))?;
        debug!(marker = %marker.display(), "Marked bucket for cleanup");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserId;
    use tempfile::tempdir;

    fn image(name: &str) -> StoredImage {
        StoredImage {
            name: name.to_string(),
            submitter_id: UserId(42),
            object_kind: "sign.large.wood".to_string(),
            source_label: "Large Wooden Sign".to_string(),
            data: vec![0x89, b'P', b'N', b'G', 0, 1, 2],
        }
    }

    const SLOT: VaultKey = VaultKey::Slot {
        user: UserId(42),
        slot_index: 2,
    };

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let vault = DiskImageVault::new(dir.path().to_path_buf()).await.unwrap();

        vault.write(&SLOT, &image("barn")).await.unwrap();

        assert!(dir.path().join("42").join("image_2.json").exists());
        assert_eq!(vault.read(&SLOT).await.unwrap(), Some(image("barn")));
    }

    #[tokio::test]
    async fn test_submissions_share_one_folder() {
        let dir = tempdir().unwrap();
        let vault = DiskImageVault::new(dir.path().to_path_buf()).await.unwrap();
        let key = VaultKey::Submission {
            user: UserId(7),
            slot_index: 1,
        };

        vault.write(&key, &image("art")).await.unwrap();

        assert!(dir.path().join("0_submitted").join("7_1.json").exists());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let vault = DiskImageVault::new(dir.path().to_path_buf()).await.unwrap();
        vault.write(&SLOT, &image("barn")).await.unwrap();

        vault.clear(&SLOT).await.unwrap();
        vault.clear(&SLOT).await.unwrap();

        assert_eq!(vault.read(&SLOT).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_entry() {
        let dir = tempdir().unwrap();
        let vault = DiskImageVault::new(dir.path().to_path_buf()).await.unwrap();
        let path = vault.image_path(&SLOT);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"garbage").unwrap();

        let err = vault.read(&SLOT).await.unwrap_err();
        assert!(matches!(err, VaultError::Corrupt(_)));
    }

    #[tokio::test]
    async fn test_mark_creates_sibling_marker() {
        let dir = tempdir().unwrap();
        let vault = DiskImageVault::new(dir.path().to_path_buf()).await.unwrap();

        vault
            .mark_for_cleanup(VaultBucket::User(UserId(42)))
            .await
            .unwrap();

        assert!(dir.path().join("42_MARKED").is_dir());
    }
}

//! World described by a TOML manifest, with textures as files.
//!
//! ```toml
//! [[objects]]
//! id = "hall-door"
//! kind = "sign.large.wood"
//! owner = 42
//! editors = [7]
//! ```
//!
//! An object's texture lives at `textures/<id>.png` next to the manifest
//! unless `texture` gives another path. Objects without an owner can be
//! edited by anyone.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::domain::entities::{TargetRef, TextureHandle, UserId, WorldObject};
use crate::domain::errors::WorldError;
use crate::domain::ports::{ObjectLocator, TextureBackend};

const TEXTURES_DIR: &str = "textures";

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    objects: Vec<ObjectEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct ObjectEntry {
    id: String,
    kind: String,
    #[serde(default)]
    owner: Option<UserId>,
    #[serde(default)]
    editors: Vec<UserId>,
    #[serde(default)]
    texture: Option<PathBuf>,
}

impl ObjectEntry {
    fn can_edit(&self, user: UserId) -> bool {
        self.owner.is_none_or(|owner| owner == user) || self.editors.contains(&user)
    }
}

/// Locator and texture backend over a manifest file.
pub struct FileWorld {
    base_dir: PathBuf,
    objects: HashMap<String, ObjectEntry>,
}

impl FileWorld {
    /// Loads the manifest at `path`. A missing manifest is an empty world.
    ///
    /// # Errors
    /// Returns `Unavailable` if the manifest cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, WorldError> {
        let base_dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let manifest = match fs::read_to_string(path).await {
            Ok(content) => toml::from_str::<Manifest>(&content).map_err(|e| {
                WorldError::Unavailable(format!("Invalid world manifest {}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "World manifest not found, no objects available");
                Manifest::default()
            }
            Err(e) => {
                return Err(WorldError::Unavailable(format!(
                    "Failed to read world manifest {}: {e}",
                    path.display()
                )));
            }
        };

        info!(path = %path.display(), objects = manifest.objects.len(), "Loaded world");
        Ok(Self {
            base_dir,
            objects: manifest
                .objects
                .into_iter()
                .map(|entry| (entry.id.clone(), entry))
                .collect(),
        })
    }

    fn texture_path(&self, object: &WorldObject) -> PathBuf {
        let explicit = self
            .objects
            .get(object.id().as_str())
            .and_then(|entry| entry.texture.as_ref());
        match explicit {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.base_dir.join(path),
            None => self
                .base_dir
                .join(TEXTURES_DIR)
                .join(format!("{}.png", object.id())),
        }
    }
}

#[async_trait]
impl ObjectLocator for FileWorld {
    async fn find(
        &self,
        _user: UserId,
        target: &TargetRef,
    ) -> Result<Option<WorldObject>, WorldError> {
        Ok(self
            .objects
            .get(target.as_str())
            .map(|entry| WorldObject::new(entry.id.as_str(), entry.kind.as_str())))
    }

    async fn can_edit(&self, object: &WorldObject, user: UserId) -> bool {
        self.objects
            .get(object.id().as_str())
            .is_some_and(|entry| entry.can_edit(user))
    }
}

#[async_trait]
impl TextureBackend for FileWorld {
    async fn fetch(&self, object: &WorldObject) -> Result<Option<Bytes>, WorldError> {
        let path = self.texture_path(object);
        match fs::read(&path).await {
            Ok(data) if data.is_empty() => Ok(None),
            Ok(data) => {
                debug!(object = %object.id(), size = data.len(), "Read texture");
                Ok(Some(Bytes::from(data)))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WorldError::TextureRead(format!(
                "{}: {e}",
                path.display()
            ))),
        }
    }

    async fn store(&self, object: &WorldObject, data: Bytes) -> Result<TextureHandle, WorldError> {
        let path = self.texture_path(object);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| WorldError::TextureWrite(format!("{}: {e}", parent.display())))?;
        }
        fs::write(&path, &data)
            .await
            .map_err(|e| WorldError::TextureWrite(format!("{}: {e}", path.display())))?;

        debug!(object = %object.id(), path = %path.display(), size = data.len(), "Wrote texture");
        Ok(TextureHandle(path.display().to_string()))
    }
}

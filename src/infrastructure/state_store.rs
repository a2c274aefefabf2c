use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, error, info, warn};

use super::atomic::write_atomic;
use crate::domain::errors::IntegrityError;
use crate::domain::image_store::ImageStore;

const STATE_FILE_NAME: &str = "images.json";

#[derive(Debug, Error)]
pub enum StateError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("state file {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("state file {path} is inconsistent: {source}")]
    Inconsistent {
        path: PathBuf,
        source: IntegrityError,
    },
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("state write task failed: {0}")]
    Task(String),
}

impl StateError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Persists the image store as JSON in the data directory.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(STATE_FILE_NAME),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse or breaks
    /// a collection invariant. A missing file is an empty store and empty
    /// collections are dropped.
    pub async fn load(&self) -> Result<ImageStore, StateError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No state file, starting empty");
                return Ok(ImageStore::new());
            }
            Err(e) => return Err(StateError::io(&self.path, e)),
        };

        let mut store: ImageStore =
            serde_json::from_str(&content).map_err(|source| {
                error!(path = %self.path.display(), error = %source, "State file is malformed");
                StateError::Malformed {
                    path: self.path.clone(),
                    source,
                }
            })?;

        let report = store.repair().map_err(|source| {
            error!(path = %self.path.display(), error = %source, "State file is inconsistent");
            StateError::Inconsistent {
                path: self.path.clone(),
                source,
            }
        })?;
        if !report.is_clean() {
            warn!(
                collections = ?report.empty_collections,
                submissions = ?report.empty_submissions,
                "Dropped empty entries from state file"
            );
        }

        info!(
            path = %self.path.display(),
            users = store.slots.len(),
            pending = store.submissions.pending_count(),
            "Loaded image state"
        );
        Ok(store)
    }

    /// Saves the store, replacing the previous file atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file cannot
    /// be written.
    pub async fn save(&self, store: &ImageStore) -> Result<(), StateError> {
        let content = serde_json::to_vec_pretty(store)?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            write_atomic(&path, &content).map_err(|e| StateError::io(&path, e))
        })
        .await
        .map_err(|e| StateError::Task(e.to_string()))??;

        debug!(path = %self.path.display(), "Saved image state");
        Ok(())
    }
}

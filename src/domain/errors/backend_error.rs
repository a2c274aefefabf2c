//! Collaborator error types.

use thiserror::Error;

/// Image vault error variants.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("failed to read stored image: {0}")]
    ReadFailed(String),

    #[error("failed to write stored image: {0}")]
    WriteFailed(String),

    #[error("failed to clear stored image: {0}")]
    ClearFailed(String),

    #[error("stored image is corrupt: {0}")]
    Corrupt(String),
}

/// World (locator and texture backend) error variants.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("failed to read texture: {0}")]
    TextureRead(String),

    #[error("failed to write texture: {0}")]
    TextureWrite(String),

    #[error("world is unavailable: {0}")]
    Unavailable(String),
}

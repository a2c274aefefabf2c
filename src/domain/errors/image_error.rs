//! Image operation error types.

use thiserror::Error;

use crate::domain::entities::OperationKind;

/// Errors surfaced to the caller of an image operation.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ImageError {
    #[error("you do not have permission to use this command")]
    NoPermission,

    #[error("no sign found at the target")]
    NoTargetObject,

    #[error("you do not have permission to edit this sign")]
    NoEditPermission,

    #[error("{operation} can't be used for another {remaining_secs}s")]
    OnCooldown {
        operation: OperationKind,
        remaining_secs: u64,
    },

    #[error("you are already at your {operation} limit of {limit}")]
    QuotaExceeded { operation: OperationKind, limit: usize },

    #[error("an image named \"{name}\" already exists")]
    DuplicateName { name: String },

    #[error("no image matches {reference}")]
    NotFound { reference: String },

    #[error("you have no saved images")]
    NoCollection,

    #[error("failed to decode image: {message}")]
    DecodeError { message: String },

    #[error("the submit feature is disabled")]
    FeatureDisabled,

    #[error("image name must not be empty")]
    InvalidName,

    #[error("the sign has no image to copy")]
    NoTexture,

    #[error("images can't be pasted onto {kind}")]
    UnsupportedObject { kind: String },

    #[error("stored image data for \"{name}\" is missing")]
    MissingImageData { name: String },

    #[error("storage backend failure: {message}")]
    Backend { message: String },
}

impl ImageError {
    /// Creates not found error.
    #[must_use]
    pub fn not_found(reference: impl ToString) -> Self {
        Self::NotFound {
            reference: reference.to_string(),
        }
    }

    /// Creates duplicate name error.
    #[must_use]
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl ToString) -> Self {
        Self::DecodeError {
            message: message.to_string(),
        }
    }

    /// Creates backend error.
    #[must_use]
    pub fn backend(message: impl ToString) -> Self {
        Self::Backend {
            message: message.to_string(),
        }
    }

    /// Returns whether the request was rejected before any work was done.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NoPermission
                | Self::NoTargetObject
                | Self::NoEditPermission
                | Self::FeatureDisabled
                | Self::OnCooldown { .. }
                | Self::DecodeError { .. }
                | Self::InvalidName
                | Self::UnsupportedObject { .. }
        )
    }

    /// Returns whether the request conflicted with stored state.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::QuotaExceeded { .. }
                | Self::DuplicateName { .. }
                | Self::NotFound { .. }
                | Self::NoCollection
        )
    }

    /// Returns whether a collaborator failed.
    #[must_use]
    pub const fn is_backend(&self) -> bool {
        matches!(
            self,
            Self::Backend { .. } | Self::NoTexture | Self::MissingImageData { .. }
        )
    }
}

impl From<super::VaultError> for ImageError {
    fn from(err: super::VaultError) -> Self {
        Self::backend(err)
    }
}

impl From<super::WorldError> for ImageError {
    fn from(err: super::WorldError) -> Self {
        Self::backend(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_is_disjoint() {
        let errors = [
            ImageError::NoPermission,
            ImageError::NoTargetObject,
            ImageError::QuotaExceeded {
                operation: OperationKind::Save,
                limit: 3,
            },
            ImageError::backend("disk full"),
        ];

        for err in &errors {
            let classes = [err.is_validation(), err.is_conflict(), err.is_backend()];
            assert_eq!(classes.iter().filter(|c| **c).count(), 1, "{err}");
        }
    }

    #[test]
    fn test_cooldown_message_names_operation() {
        let err = ImageError::OnCooldown {
            operation: OperationKind::Paste,
            remaining_secs: 42,
        };
        assert_eq!(err.to_string(), "paste can't be used for another 42s");
    }
}

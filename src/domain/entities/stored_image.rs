//! Payload and addressing for images held in the vault.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Where a stored image lives in the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VaultKey {
    /// A slot of a user's personal collection.
    Slot { user: UserId, slot_index: u32 },
    /// A pending submission.
    Submission { user: UserId, slot_index: u32 },
}

impl VaultKey {
    #[must_use]
    pub const fn user(&self) -> UserId {
        match self {
            Self::Slot { user, .. } | Self::Submission { user, .. } => *user,
        }
    }

    #[must_use]
    pub const fn bucket(&self) -> VaultBucket {
        match self {
            Self::Slot { user, .. } => VaultBucket::User(*user),
            Self::Submission { .. } => VaultBucket::Submissions,
        }
    }
}

impl std::fmt::Display for VaultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slot { user, slot_index } => write!(f, "{user}/slot {slot_index}"),
            Self::Submission { user, slot_index } => {
                write!(f, "submissions/{user} {slot_index}")
            }
        }
    }
}

/// Group of vault entries that is cleaned up together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VaultBucket {
    User(UserId),
    Submissions,
}

/// A captured bitmap together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    /// Name the user gave the image.
    pub name: String,
    /// User that captured the image.
    pub submitter_id: UserId,
    /// Object type the image was captured from.
    pub object_kind: String,
    /// Human readable form of `object_kind`.
    pub source_label: String,
    /// Raw encoded bitmap.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

//! World object value types handed out by the locator.

use serde::{Deserialize, Serialize};

/// Identifier of an object in the host world.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub String);

impl ObjectId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host-provided hint the locator resolves into an object, such as the
/// object the user is looking at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetRef(pub String);

impl TargetRef {
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self(target.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// An image-bearing object located in the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldObject {
    id: ObjectId,
    kind: String,
}

impl WorldObject {
    #[must_use]
    pub fn new(id: impl Into<ObjectId>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ObjectId {
        &self.id
    }

    /// Object type identifier, e.g. `sign.large.wood`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ObjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Opaque handle returned after writing a texture to an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureHandle(pub String);

impl std::fmt::Display for TextureHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

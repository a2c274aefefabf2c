//! Object locator port definition.

use async_trait::async_trait;

use crate::domain::entities::{TargetRef, UserId, WorldObject};
use crate::domain::errors::WorldError;

/// Port for finding the image-bearing object a user is targeting.
#[async_trait]
pub trait ObjectLocator: Send + Sync {
    /// Resolves `target` for `user`. Returns `None` when nothing suitable is
    /// there.
    async fn find(&self, user: UserId, target: &TargetRef)
    -> Result<Option<WorldObject>, WorldError>;

    /// Checks whether `user` may change the image on `object`.
    async fn can_edit(&self, object: &WorldObject, user: UserId) -> bool;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};

    /// Locator over a fixed set of objects.
    #[derive(Default)]
    pub struct MockObjectLocator {
        objects: HashMap<String, WorldObject>,
        locked: HashSet<String>,
    }

    impl MockObjectLocator {
        pub fn new() -> Self {
            Self::default()
        }

        /// Adds an object reachable through `target`.
        pub fn with_object(mut self, target: &str, kind: &str) -> Self {
            self.objects
                .insert(target.to_string(), WorldObject::new(target, kind));
            self
        }

        /// Adds an object nobody may edit.
        pub fn with_locked_object(mut self, target: &str, kind: &str) -> Self {
            self.locked.insert(target.to_string());
            self.with_object(target, kind)
        }
    }

    #[async_trait]
    impl ObjectLocator for MockObjectLocator {
        async fn find(
            &self,
            _user: UserId,
            target: &TargetRef,
        ) -> Result<Option<WorldObject>, WorldError> {
            Ok(self.objects.get(target.as_str()).cloned())
        }

        async fn can_edit(&self, object: &WorldObject, _user: UserId) -> bool {
            !self.locked.contains(object.id().as_str())
        }
    }
}

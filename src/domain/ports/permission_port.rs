//! Permission oracle port definition.

use crate::domain::entities::{Tier, UserId};

/// Port for looking up what a user is allowed to do.
#[cfg_attr(test, mockall::automock)]
pub trait PermissionOracle: Send + Sync {
    /// Returns the tier of `user`.
    fn tier(&self, user: UserId) -> Tier;

    /// Whether `user` may save, paste, remove and list images.
    fn can_use(&self, user: UserId) -> bool;

    /// Whether `user` may submit images for review.
    fn can_submit(&self, user: UserId) -> bool;
}

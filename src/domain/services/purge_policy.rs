//! Inactivity rules for purging personal collections.

use chrono::{DateTime, Utc};

use super::SlotStore;
use crate::domain::entities::{UserCollection, UserId};

/// Day thresholds after which an inactive user's collection is purged.
/// Zero disables purging for that tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgePolicy {
    pub standard_days: u32,
    pub privileged_days: u32,
}

impl PurgePolicy {
    #[must_use]
    pub const fn new(standard_days: u32, privileged_days: u32) -> Self {
        Self {
            standard_days,
            privileged_days,
        }
    }

    /// Returns whether no tier is ever purged.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.standard_days == 0 && self.privileged_days == 0
    }

    #[must_use]
    pub const fn limit_for(&self, privileged: bool) -> u32 {
        if privileged {
            self.privileged_days
        } else {
            self.standard_days
        }
    }

    /// Returns whether `collection` has been inactive longer than allowed.
    #[must_use]
    pub fn is_expired(&self, collection: &UserCollection, now: DateTime<Utc>, privileged: bool) -> bool {
        let limit = self.limit_for(privileged);
        limit > 0 && collection.inactive_days(now) > i64::from(limit)
    }

    /// Users whose whole days of inactivity exceed their tier's limit,
    /// in ascending id order.
    pub fn expired_users(
        &self,
        slots: &SlotStore,
        now: DateTime<Utc>,
        is_privileged: impl Fn(UserId) -> bool,
    ) -> Vec<UserId> {
        let mut expired: Vec<UserId> = slots
            .iter()
            .filter(|(user, collection)| self.is_expired(collection, now, is_privileged(*user)))
            .map(|(user, _)| user)
            .collect();
        expired.sort_unstable();
        expired
    }
}

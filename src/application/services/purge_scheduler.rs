//! Inactivity sweep over personal collections.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::keyed_locks::{CollectionKind, KeyedLocks};
use crate::domain::entities::{UserId, VaultBucket, VaultKey};
use crate::domain::image_store::ImageStore;
use crate::domain::ports::{ImageVault, PermissionOracle};
use crate::domain::services::PurgePolicy;

/// What one sweep did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeReport {
    /// Users whose collections were deleted, in ascending id order.
    pub removed: Vec<UserId>,
    /// Vault entries that could not be cleared.
    pub failed_clears: usize,
}

/// Deletes collections of users inactive past their tier's threshold.
/// Submissions are never touched.
pub struct PurgeScheduler {
    store: Arc<RwLock<ImageStore>>,
    locks: Arc<KeyedLocks>,
    vault: Arc<dyn ImageVault>,
    permissions: Arc<dyn PermissionOracle>,
    policy: PurgePolicy,
}

impl PurgeScheduler {
    #[must_use]
    pub fn new(
        store: Arc<RwLock<ImageStore>>,
        locks: Arc<KeyedLocks>,
        vault: Arc<dyn ImageVault>,
        permissions: Arc<dyn PermissionOracle>,
        policy: PurgePolicy,
    ) -> Self {
        Self {
            store,
            locks,
            vault,
            permissions,
            policy,
        }
    }

    /// Removes every expired collection as of `now`.
    ///
    /// Backing data is cleared best-effort: failures are logged and counted
    /// but the record is gone either way.
    pub async fn sweep(&self, now: DateTime<Utc>) -> PurgeReport {
        let mut report = PurgeReport::default();
        if self.policy.is_disabled() {
            debug!("Purge disabled for all tiers");
            return report;
        }

        let candidates = {
            let store = self.store.read();
            self.policy
                .expired_users(&store.slots, now, |user| self.is_privileged(user))
        };
        info!(
            standard_days = self.policy.standard_days,
            privileged_days = self.policy.privileged_days,
            candidates = candidates.len(),
            "Purging inactive users"
        );

        for user in candidates {
            let _guard = self.locks.acquire(user, CollectionKind::Slots).await;

            let privileged = self.is_privileged(user);
            let collection = {
                let mut store = self.store.write();
                let still_expired = store
                    .slots
                    .collection(user)
                    .is_some_and(|c| self.policy.is_expired(c, now, privileged));
                if still_expired {
                    store.slots.remove_collection(user)
                } else {
                    None
                }
            };
            let Some(collection) = collection else {
                debug!(user = %user, "User no longer eligible for purge");
                continue;
            };

            for record in collection.records().iter() {
                let key = VaultKey::Slot {
                    user,
                    slot_index: record.slot_index(),
                };
                if let Err(e) = self.vault.clear(&key).await {
                    warn!(key = %key, error = %e, "Failed to clear purged image");
                    report.failed_clears += 1;
                }
            }
            if let Err(e) = self.vault.mark_for_cleanup(VaultBucket::User(user)).await {
                warn!(user = %user, error = %e, "Failed to mark purged user for cleanup");
            }

            debug!(
                user = %user,
                images = collection.records().len(),
                "Purged inactive user"
            );
            report.removed.push(user);
        }

        info!(
            removed = report.removed.len(),
            failed_clears = report.failed_clears,
            "Purge finished"
        );
        report
    }

    fn is_privileged(&self, user: UserId) -> bool {
        self.permissions.tier(user).is_privileged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{StoredImage, Tier};
    use crate::domain::ports::mocks::{MockImageVault, MockPermissionOracle};
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn image(name: &str) -> StoredImage {
        StoredImage {
            name: name.to_string(),
            submitter_id: UserId(0),
            object_kind: "sign.small.wood".to_string(),
            source_label: "Small Wooden Sign".to_string(),
            data: vec![1, 2, 3],
        }
    }

    struct Setup {
        scheduler: PurgeScheduler,
        store: Arc<RwLock<ImageStore>>,
        vault: Arc<MockImageVault>,
    }

    /// Users seen `days_ago`, each with `images` records backed in the vault.
    async fn setup(users: &[(u64, i64, usize)], policy: PurgePolicy) -> Setup {
        let vault = Arc::new(MockImageVault::new());
        let mut store = ImageStore::new();
        for &(user, days_ago, images) in users {
            let seen = now() - Duration::days(days_ago);
            for i in 0..images {
                let name = format!("img{i}");
                let record = store
                    .slots
                    .add(UserId(user), &name, "Small Wooden Sign", 10, seen)
                    .unwrap();
                let key = VaultKey::Slot {
                    user: UserId(user),
                    slot_index: record.slot_index(),
                };
                vault.write(&key, &image(&name)).await.unwrap();
            }
        }
        store
            .submissions
            .add(UserId(1), "pending", "Small Wooden Sign", 2)
            .unwrap();

        let mut permissions = MockPermissionOracle::new();
        permissions
            .expect_tier()
            .returning(|user| if user == UserId(7) { Tier::Privileged } else { Tier::Standard });

        let store = Arc::new(RwLock::new(store));
        let scheduler = PurgeScheduler::new(
            store.clone(),
            Arc::new(KeyedLocks::new()),
            vault.clone(),
            Arc::new(permissions),
            policy,
        );
        Setup {
            scheduler,
            store,
            vault,
        }
    }

    #[tokio::test]
    async fn test_sweep_removes_expired_and_clears_images() {
        let s = setup(&[(1, 120, 2), (2, 10, 1), (7, 500, 1)], PurgePolicy::new(90, 0)).await;

        let report = s.scheduler.sweep(now()).await;

        assert_eq!(report.removed, [UserId(1)]);
        assert_eq!(report.failed_clears, 0);
        assert_eq!(s.vault.clears().len(), 2);
        assert_eq!(s.vault.marked(), [VaultBucket::User(UserId(1))]);

        let store = s.store.read();
        assert!(store.slots.collection(UserId(1)).is_none());
        assert!(store.slots.collection(UserId(2)).is_some());
        assert!(store.slots.collection(UserId(7)).is_some());
        assert_eq!(store.submissions.pending_count(), 1);
    }

    #[tokio::test]
    async fn test_second_sweep_removes_nothing() {
        let s = setup(&[(1, 120, 1), (2, 200, 1)], PurgePolicy::new(90, 0)).await;

        let first = s.scheduler.sweep(now()).await;
        let second = s.scheduler.sweep(now()).await;

        assert_eq!(first.removed, [UserId(1), UserId(2)]);
        assert!(second.removed.is_empty());
        assert_eq!(s.vault.clears().len(), 2);
    }

    #[tokio::test]
    async fn test_clear_failure_is_counted_not_fatal() {
        let s = setup(&[(1, 120, 2), (2, 120, 1)], PurgePolicy::new(90, 0)).await;
        s.vault.fail_clear_of(VaultKey::Slot {
            user: UserId(1),
            slot_index: 1,
        });

        let report = s.scheduler.sweep(now()).await;

        assert_eq!(report.removed, [UserId(1), UserId(2)]);
        assert_eq!(report.failed_clears, 1);
        assert!(s.store.read().slots.is_empty());
    }

    #[tokio::test]
    async fn test_disabled_policy_is_noop() {
        let s = setup(&[(1, 10_000, 1)], PurgePolicy::new(0, 0)).await;

        let report = s.scheduler.sweep(now()).await;

        assert_eq!(report, PurgeReport::default());
        assert!(s.vault.clears().is_empty());
    }

    #[tokio::test]
    async fn test_privileged_threshold() {
        let s = setup(&[(7, 40, 1), (8, 40, 1)], PurgePolicy::new(30, 60)).await;

        let report = s.scheduler.sweep(now()).await;

        assert_eq!(report.removed, [UserId(8)]);
    }
}

//! Per-user async locks.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::entities::UserId;

/// Which of a user's collections an operation mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Slots,
    Submissions,
}

type LockKey = (UserId, CollectionKind);

/// Serializes mutations of the same user's collection while letting
/// different users proceed in parallel.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<LockKey, Arc<AsyncMutex<()>>>>,
}

impl KeyedLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `(user, kind)`.
    pub async fn acquire(&self, user: UserId, kind: CollectionKind) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock();
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry((user, kind)).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Number of keys currently held or waited on.
    #[must_use]
    pub fn active(&self) -> usize {
        self.locks
            .lock()
            .values()
            .filter(|lock| Arc::strong_count(lock) > 1)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_key_is_exclusive() {
        let locks = Arc::new(KeyedLocks::new());
        let guard = locks.acquire(UserId(1), CollectionKind::Slots).await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(UserId(1), CollectionKind::Slots).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let locks = KeyedLocks::new();
        let _slots = locks.acquire(UserId(1), CollectionKind::Slots).await;

        let other_kind = tokio::time::timeout(
            Duration::from_millis(100),
            locks.acquire(UserId(1), CollectionKind::Submissions),
        )
        .await;
        let other_user = tokio::time::timeout(
            Duration::from_millis(100),
            locks.acquire(UserId(2), CollectionKind::Slots),
        )
        .await;

        assert!(other_kind.is_ok());
        assert!(other_user.is_ok());
    }

    #[tokio::test]
    async fn test_released_keys_are_dropped() {
        let locks = KeyedLocks::new();
        {
            let _a = locks.acquire(UserId(1), CollectionKind::Slots).await;
            assert_eq!(locks.active(), 1);
        }
        let _b = locks.acquire(UserId(2), CollectionKind::Slots).await;

        assert_eq!(locks.active(), 1);
        assert_eq!(locks.locks.lock().len(), 1);
    }
}

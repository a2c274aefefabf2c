//! Persistable state owned by the image service.

use serde::{Deserialize, Serialize};

use super::entities::UserId;
use super::errors::IntegrityError;
use super::services::{CooldownTracker, SlotStore, SubmissionQueue};

/// Both record maps and the cooldown clock. Loaded once at startup and
/// handed back for persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageStore {
    /// Personal collections.
    #[serde(default)]
    pub slots: SlotStore,
    /// Pending submissions.
    #[serde(default)]
    pub submissions: SubmissionQueue,
    /// Last successful use of each rate-limited operation.
    #[serde(default)]
    pub cooldowns: CooldownTracker,
}

/// Entries dropped by [`ImageStore::repair`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub empty_collections: Vec<UserId>,
    pub empty_submissions: Vec<UserId>,
}

impl RepairReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.empty_collections.is_empty() && self.empty_submissions.is_empty()
    }
}

impl ImageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings a freshly loaded store in line with the collection invariants.
    /// Empty collections are dropped, anything else inconsistent is refused.
    ///
    /// # Errors
    /// Returns an [`IntegrityError`] when slots or names collide within a
    /// collection.
    pub fn repair(&mut self) -> Result<RepairReport, IntegrityError> {
        Ok(RepairReport {
            empty_collections: self.slots.repair()?,
            empty_submissions: self.submissions.repair()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{OperationKind, SlotReference};
    use chrono::DateTime;

    #[test]
    fn test_json_layout() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let mut store = ImageStore::new();
        store
            .slots
            .add(UserId(42), "Barn", "Wooden Sign", 3, now)
            .unwrap();
        store
            .submissions
            .add(UserId(7), "Flag", "Banner", 2)
            .unwrap();

        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["slots"]["42"]["records"][0]["slot_index"], 1);
        assert_eq!(json["submissions"]["7"][0]["name"], "Flag");

        let restored: ImageStore = serde_json::from_value(json).unwrap();
        assert_eq!(restored, store);
        assert!(
            restored
                .slots
                .find(UserId(42), &SlotReference::by_name("barn"))
                .is_ok()
        );
    }

    #[test]
    fn test_cooldowns_are_persisted() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let mut store = ImageStore::new();
        store.cooldowns.record_use(UserId(42), OperationKind::Save, 120, now);

        let json = serde_json::to_string(&store).unwrap();
        let restored: ImageStore = serde_json::from_str(&json).unwrap();

        assert_eq!(
            restored.cooldowns.remaining(UserId(42), OperationKind::Save, 120, now),
            120
        );
    }

    #[test]
    fn test_repair_reports_dropped_entries() {
        let mut store: ImageStore = serde_json::from_value(serde_json::json!({
            "slots": { "5": { "last_seen_at": "2023-11-14T22:13:20Z", "records": [] } },
            "submissions": { "9": [] }
        }))
        .unwrap();

        let report = store.repair().unwrap();

        assert_eq!(report.empty_collections, [UserId(5)]);
        assert_eq!(report.empty_submissions, [UserId(9)]);
        assert!(store.slots.is_empty());
        assert!(store.repair().unwrap().is_clean());
    }

    #[test]
    fn test_missing_sections_default() {
        let store: ImageStore = serde_json::from_str("{}").unwrap();
        assert!(store.slots.is_empty());
        assert_eq!(store.submissions.pending_count(), 0);
    }
}

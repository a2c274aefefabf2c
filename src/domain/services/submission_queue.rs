//! Images awaiting administrator review.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{ImageRecord, OperationKind, RecordSet, SlotReference, UserId};
use crate::domain::errors::{ImageError, IntegrityError};

/// Pending submissions per user. Separate namespace and quota from the
/// personal collections and never purged for inactivity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionQueue {
    pending: HashMap<UserId, RecordSet>,
}

impl SubmissionQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self, user: UserId) -> Option<&RecordSet> {
        self.pending.get(&user)
    }

    /// Total number of submissions waiting across all users.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.values().map(RecordSet::len).sum()
    }

    /// Validates a submission and returns the slot it would occupy.
    ///
    /// # Errors
    /// Returns `QuotaExceeded` or `DuplicateName`.
    pub fn check_add(&self, user: UserId, name: &str, limit: usize) -> Result<u32, ImageError> {
        match self.pending.get(&user) {
            Some(records) => records.check_add(name, limit, OperationKind::Submit),
            None => RecordSet::new().check_add(name, limit, OperationKind::Submit),
        }
    }

    pub fn insert(&mut self, user: UserId, record: ImageRecord) {
        self.pending.entry(user).or_default().insert(record);
    }

    /// Validates and inserts a submission in one step.
    ///
    /// # Errors
    /// Returns `QuotaExceeded` or `DuplicateName`.
    pub fn add(
        &mut self,
        user: UserId,
        name: &str,
        source_label: &str,
        limit: usize,
    ) -> Result<ImageRecord, ImageError> {
        let result = self
            .pending
            .entry(user)
            .or_default()
            .add(name, source_label, limit, OperationKind::Submit);
        if result.is_err() {
            self.drop_if_empty(user);
        }
        result
    }

    /// Resolves a reference among the user's submissions.
    ///
    /// # Errors
    /// Returns `NoCollection` or `NotFound`.
    pub fn find(&self, user: UserId, reference: &SlotReference) -> Result<&ImageRecord, ImageError> {
        self.pending
            .get(&user)
            .ok_or(ImageError::NoCollection)?
            .resolve(reference)
    }

    /// Removes a reviewed submission.
    ///
    /// # Errors
    /// Returns `NoCollection` or `NotFound`.
    pub fn remove(&mut self, user: UserId, reference: &SlotReference) -> Result<ImageRecord, ImageError> {
        let records = self.pending.get_mut(&user).ok_or(ImageError::NoCollection)?;
        let name = records.resolve(reference)?.name().to_string();
        let record = records.remove(&name)?;
        self.drop_if_empty(user);
        Ok(record)
    }

    /// Drops users with no pending records and validates the rest.
    ///
    /// # Errors
    /// Returns the first [`IntegrityError`] found.
    pub fn repair(&mut self) -> Result<Vec<UserId>, IntegrityError> {
        let empty: Vec<UserId> = self
            .pending
            .iter()
            .filter(|(_, records)| records.is_empty())
            .map(|(user, _)| *user)
            .collect();
        for user in &empty {
            self.pending.remove(user);
        }

        for (user, records) in &self.pending {
            records.validate("submissions", *user)?;
        }
        Ok(empty)
    }

    fn drop_if_empty(&mut self, user: UserId) {
        if self.pending.get(&user).is_some_and(RecordSet::is_empty) {
            self.pending.remove(&user);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_is_per_user() {
        let mut queue = SubmissionQueue::new();
        queue.add(UserId(1), "a", "Sign", 1).unwrap();

        assert!(matches!(
            queue.add(UserId(1), "b", "Sign", 1),
            Err(ImageError::QuotaExceeded {
                operation: OperationKind::Submit,
                limit: 1
            })
        ));
        assert!(queue.add(UserId(2), "a", "Sign", 1).is_ok());
        assert_eq!(queue.pending_count(), 2);
    }

    #[test]
    fn test_failed_add_leaves_no_empty_entry() {
        let mut queue = SubmissionQueue::new();
        assert!(queue.add(UserId(1), "a", "Sign", 0).is_err());
        assert!(queue.records(UserId(1)).is_none());
    }

    #[test]
    fn test_repair_rejects_duplicate_names() {
        let mut queue: SubmissionQueue = serde_json::from_value(serde_json::json!({
            "7": [
                { "slot_index": 1, "name": "Flag", "source_label": "Banner" },
                { "slot_index": 2, "name": "flag", "source_label": "Banner" }
            ],
            "8": []
        }))
        .unwrap();

        assert!(matches!(
            queue.repair(),
            Err(IntegrityError::DuplicateName { user: UserId(7), .. })
        ));
    }

    #[test]
    fn test_review_removes_submission() {
        let mut queue = SubmissionQueue::new();
        queue.add(UserId(1), "Flag", "Banner", 2).unwrap();

        let record = queue.remove(UserId(1), &SlotReference::by_name("flag")).unwrap();

        assert_eq!(record.name(), "Flag");
        assert_eq!(queue.pending_count(), 0);
        assert!(matches!(
            queue.find(UserId(1), &SlotReference::ByOrdinal(1)),
            Err(ImageError::NoCollection)
        ));
    }
}

//! Personal image collections keyed by user.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{ImageRecord, OperationKind, SlotReference, UserCollection, UserId};
use crate::domain::errors::{ImageError, IntegrityError};

/// Outcome of removing a record from a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// The record that was removed.
    pub record: ImageRecord,
    /// Whether the collection became empty and was deleted.
    pub collection_deleted: bool,
}

/// All users' personal collections.
///
/// A collection exists only while it holds at least one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotStore {
    collections: HashMap<UserId, UserCollection>,
}

impl SlotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn collection(&self, user: UserId) -> Option<&UserCollection> {
        self.collections.get(&user)
    }

    pub fn iter(&self) -> impl Iterator<Item = (UserId, &UserCollection)> {
        self.collections.iter().map(|(user, c)| (*user, c))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Validates a save for `user` and returns the slot it would occupy.
    ///
    /// # Errors
    /// Returns `QuotaExceeded` or `DuplicateName`.
    pub fn check_add(&self, user: UserId, name: &str, limit: usize) -> Result<u32, ImageError> {
        match self.collections.get(&user) {
            Some(collection) => collection
                .records()
                .check_add(name, limit, OperationKind::Save),
            None if limit == 0 => Err(ImageError::QuotaExceeded {
                operation: OperationKind::Save,
                limit,
            }),
            None => Ok(1),
        }
    }

    /// Inserts a validated record, creating the collection on first use.
    pub fn insert(&mut self, user: UserId, record: ImageRecord, now: DateTime<Utc>) {
        self.collections
            .entry(user)
            .or_insert_with(|| UserCollection::new(now))
            .records_mut()
            .insert(record);
    }

    /// Validates and inserts a new record in one step.
    ///
    /// # Errors
    /// Returns `QuotaExceeded` or `DuplicateName`.
    pub fn add(
        &mut self,
        user: UserId,
        name: &str,
        source_label: &str,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Result<ImageRecord, ImageError> {
        let slot_index = self.check_add(user, name, limit)?;
        let record = ImageRecord::new(slot_index, name, source_label);
        self.insert(user, record.clone(), now);
        Ok(record)
    }

    /// Resolves a reference within the user's collection.
    ///
    /// # Errors
    /// Returns `NoCollection` when the user has none, `NotFound` otherwise.
    pub fn find(&self, user: UserId, reference: &SlotReference) -> Result<&ImageRecord, ImageError> {
        self.collections
            .get(&user)
            .ok_or(ImageError::NoCollection)?
            .records()
            .resolve(reference)
    }

    /// Removes the referenced record, deleting the collection once empty.
    ///
    /// # Errors
    /// Returns `NoCollection` or `NotFound`.
    pub fn remove(&mut self, user: UserId, reference: &SlotReference) -> Result<Removal, ImageError> {
        let collection = self
            .collections
            .get_mut(&user)
            .ok_or(ImageError::NoCollection)?;

        let name = collection.records().resolve(reference)?.name().to_string();
        let record = collection.records_mut().remove(&name)?;

        let collection_deleted = collection.records().is_empty();
        if collection_deleted {
            self.collections.remove(&user);
        }

        Ok(Removal {
            record,
            collection_deleted,
        })
    }

    /// Refreshes the user's last-seen time. Returns false when the user has
    /// no collection.
    pub fn touch(&mut self, user: UserId, now: DateTime<Utc>) -> bool {
        let Some(collection) = self.collections.get_mut(&user) else {
            return false;
        };
        collection.touch(now);
        true
    }

    /// Drops collections that hold no records and validates the rest.
    /// Returns the users whose empty collections were dropped.
    ///
    /// # Errors
    /// Returns the first [`IntegrityError`] found.
    pub fn repair(&mut self) -> Result<Vec<UserId>, IntegrityError> {
        let empty: Vec<UserId> = self
            .collections
            .iter()
            .filter(|(_, c)| c.records().is_empty())
            .map(|(user, _)| *user)
            .collect();
        for user in &empty {
            self.collections.remove(user);
        }

        for (user, collection) in &self.collections {
            collection.records().validate("slots", *user)?;
        }
        Ok(empty)
    }

    /// Drops the user's whole collection.
    pub fn remove_collection(&mut self, user: UserId) -> Option<UserCollection> {
        self.collections.remove(&user)
    }
}

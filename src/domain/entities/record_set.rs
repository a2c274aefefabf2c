//! Ordered set of image records with first-fit slot reuse.

use serde::{Deserialize, Serialize};

use std::collections::HashSet;

use super::image_record::{name_key, names_equal};
use super::{ImageRecord, OperationKind, SlotReference, UserId};
use crate::domain::errors::{ImageError, IntegrityError};

/// Records of one collection, unique by case-insensitive name.
///
/// Slot indices are stable storage positions; ordinals are positions in the
/// alphabetical listing and are recomputed on every lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<ImageRecord>,
}

impl RecordSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageRecord> {
        self.records.iter()
    }

    /// Returns the smallest slot index not in use, at most `len + 1`.
    #[must_use]
    pub fn next_slot_index(&self) -> u32 {
        let mut slots: Vec<u32> = self.records.iter().map(ImageRecord::slot_index).collect();
        slots.sort_unstable();

        let mut candidate = 1u32;
        for slot in slots {
            if slot != candidate {
                break;
            }
            candidate += 1;
        }
        candidate
    }

    /// Validates that a record named `name` may be added and returns the slot
    /// it would occupy. Nothing is inserted.
    ///
    /// # Errors
    /// Returns `QuotaExceeded` when the set holds `limit` records or more and
    /// `DuplicateName` when the name is already taken.
    pub fn check_add(
        &self,
        name: &str,
        limit: usize,
        operation: OperationKind,
    ) -> Result<u32, ImageError> {
        if self.records.len() >= limit {
            return Err(ImageError::QuotaExceeded { operation, limit });
        }
        if self.find_by_name(name).is_some() {
            return Err(ImageError::duplicate(name));
        }
        Ok(self.next_slot_index())
    }

    /// Allocates a slot and inserts a new record.
    ///
    /// # Errors
    /// See [`RecordSet::check_add`].
    pub fn add(
        &mut self,
        name: &str,
        source_label: &str,
        limit: usize,
        operation: OperationKind,
    ) -> Result<ImageRecord, ImageError> {
        let slot_index = self.check_add(name, limit, operation)?;
        let record = ImageRecord::new(slot_index, name, source_label);
        self.records.push(record.clone());
        Ok(record)
    }

    /// Inserts a record whose slot was obtained from [`RecordSet::check_add`].
    pub(crate) fn insert(&mut self, record: ImageRecord) {
        debug_assert!(self.find_by_name(record.name()).is_none());
        self.records.push(record);
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&ImageRecord> {
        self.records.iter().find(|r| r.matches_name(name))
    }

    /// Returns the record at 1-based position `ordinal` of the alphabetical
    /// listing.
    #[must_use]
    pub fn find_by_ordinal(&self, ordinal: usize) -> Option<&ImageRecord> {
        if ordinal < 1 || ordinal > self.records.len() {
            return None;
        }
        self.sorted_by_name().into_iter().nth(ordinal - 1)
    }

    /// Resolves a reference to a record.
    ///
    /// # Errors
    /// Returns `NotFound` when nothing matches.
    pub fn resolve(&self, reference: &SlotReference) -> Result<&ImageRecord, ImageError> {
        let found = match reference {
            SlotReference::ByName(name) => self.find_by_name(name),
            SlotReference::ByOrdinal(n) => self.find_by_ordinal(*n),
        };
        found.ok_or_else(|| ImageError::not_found(reference))
    }

    /// Removes the record named `name`.
    ///
    /// # Errors
    /// Returns `NotFound` when no record has that name.
    pub fn remove(&mut self, name: &str) -> Result<ImageRecord, ImageError> {
        let position = self
            .records
            .iter()
            .position(|r| r.matches_name(name))
            .ok_or_else(|| ImageError::not_found(name))?;
        Ok(self.records.remove(position))
    }

    /// Checks that slots are positive and unique and names are unique
    /// ignoring case.
    ///
    /// # Errors
    /// Returns the first violation found, tagged with `section` and `user`.
    pub fn validate(&self, section: &'static str, user: UserId) -> Result<(), IntegrityError> {
        let mut slots = HashSet::with_capacity(self.records.len());
        for (i, record) in self.records.iter().enumerate() {
            if record.slot_index() == 0 {
                return Err(IntegrityError::ZeroSlot {
                    section,
                    user,
                    name: record.name().to_string(),
                });
            }
            if !slots.insert(record.slot_index()) {
                return Err(IntegrityError::DuplicateSlot {
                    section,
                    user,
                    slot_index: record.slot_index(),
                });
            }
            if self.records[..i]
                .iter()
                .any(|earlier| names_equal(earlier.name(), record.name()))
            {
                return Err(IntegrityError::DuplicateName {
                    section,
                    user,
                    name: record.name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Records in case-insensitive alphabetical order.
    #[must_use]
    pub fn sorted_by_name(&self) -> Vec<&ImageRecord> {
        let mut sorted: Vec<&ImageRecord> = self.records.iter().collect();
        sorted.sort_by_cached_key(|r| name_key(r.name()));
        sorted
    }
}

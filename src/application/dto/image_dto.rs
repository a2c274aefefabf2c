//! Results of image operations.

use crate::domain::entities::{ImageRecord, TextureHandle};

/// A record that was just created by save or submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    pub name: String,
    pub slot_index: u32,
    pub source_label: String,
}

impl From<ImageRecord> for SavedImage {
    fn from(record: ImageRecord) -> Self {
        Self {
            name: record.name().to_string(),
            slot_index: record.slot_index(),
            source_label: record.source_label().to_string(),
        }
    }
}

/// A stored image that was applied to an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteOutcome {
    pub name: String,
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub name: String,
    /// The user has no images left.
    pub collection_deleted: bool,
}

/// One line of a user's listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedImage {
    /// 1-based position in the alphabetical listing.
    pub ordinal: usize,
    pub name: String,
    pub source_label: String,
    pub slot_index: u32,
}

//! Stored image record and the reference used to look one up.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named image occupying one slot of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    slot_index: u32,
    name: String,
    source_label: String,
}

impl ImageRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(slot_index: u32, name: impl Into<String>, source_label: impl Into<String>) -> Self {
        Self {
            slot_index,
            name: name.into(),
            source_label: source_label.into(),
        }
    }

    /// Stable storage index within the owning collection (1-based).
    #[must_use]
    pub const fn slot_index(&self) -> u32 {
        self.slot_index
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human readable description of the object the image came from.
    #[must_use]
    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        names_equal(&self.name, name)
    }
}

/// Folds a name into its comparison key.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Case-insensitive equality over the full Unicode range.
#[must_use]
pub fn names_equal(a: &str, b: &str) -> bool {
    a == b || name_key(a) == name_key(b)
}

/// How a user refers to one of their records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotReference {
    /// Case-insensitive name match.
    ByName(String),
    /// 1-based position in the alphabetical listing.
    ByOrdinal(usize),
}

impl SlotReference {
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self::ByName(name.into())
    }

    #[must_use]
    pub const fn by_ordinal(ordinal: usize) -> Self {
        Self::ByOrdinal(ordinal)
    }
}

impl std::fmt::Display for SlotReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ByName(name) => write!(f, "{name}"),
            Self::ByOrdinal(n) => write!(f, "#{n}"),
        }
    }
}

impl FromStr for SlotReference {
    type Err = std::convert::Infallible;

    /// Input that parses as an integer is an ordinal, anything else is a name.
    /// Negative and zero ordinals are kept so lookup reports them as not found.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => Ok(Self::ByOrdinal(usize::try_from(n).unwrap_or(0))),
            Err(_) => Ok(Self::ByName(trimmed.to_string())),
        }
    }
}

//! Consistency errors found in a loaded image store.

use thiserror::Error;

use crate::domain::entities::UserId;

/// A loaded store that breaks a collection invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("{section} of user {user}: \"{name}\" has slot 0")]
    ZeroSlot {
        section: &'static str,
        user: UserId,
        name: String,
    },

    #[error("{section} of user {user}: slot {slot_index} is used twice")]
    DuplicateSlot {
        section: &'static str,
        user: UserId,
        slot_index: u32,
    },

    #[error("{section} of user {user}: name \"{name}\" is used twice")]
    DuplicateName {
        section: &'static str,
        user: UserId,
        name: String,
    },
}

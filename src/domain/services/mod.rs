//! Pure domain services over the image store.

mod cooldown_tracker;
mod purge_policy;
mod slot_store;
mod submission_queue;

pub use cooldown_tracker::CooldownTracker;
pub use purge_policy::PurgePolicy;
pub use slot_store::{Removal, SlotStore};
pub use submission_queue::SubmissionQueue;

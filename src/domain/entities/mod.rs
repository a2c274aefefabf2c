//! Domain entity definitions.

mod collection;
mod image_record;
mod operation;
mod record_set;
mod stored_image;
mod user;
mod world_object;

pub use collection::UserCollection;
pub use image_record::{ImageRecord, SlotReference, name_key, names_equal};
pub use operation::OperationKind;
pub use record_set::RecordSet;
pub use stored_image::{StoredImage, VaultBucket, VaultKey};
pub use user::{Tier, UserId};
pub use world_object::{ObjectId, TargetRef, TextureHandle, WorldObject};

//! Domain error types.

mod backend_error;
mod image_error;
mod integrity_error;

pub use backend_error::{VaultError, WorldError};
pub use image_error::ImageError;
pub use integrity_error::IntegrityError;

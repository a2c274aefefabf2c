//! Data transfer objects for the application layer.

mod image_dto;

pub use image_dto::{ListedImage, PasteOutcome, RemoveOutcome, SavedImage};

//! Host world adapters.

mod file_world;

pub use file_world::FileWorld;

mod image_resizer;
mod image_service;
mod keyed_locks;
mod purge_scheduler;

pub use image_resizer::ImageResizer;
pub use image_service::{ImageService, ServicePorts};
pub use keyed_locks::{CollectionKind, KeyedLocks};
pub use purge_scheduler::{PurgeReport, PurgeScheduler};

#[cfg(test)]
pub(crate) use image_resizer::sample_png;

//! signcopy - save, paste and share the images shown on in-world signs.
//!
//! Users capture the bitmap on a sign into named slots of a personal
//! collection, paste it onto other signs scaled to fit, or submit it for
//! admin review. Quotas and cooldowns depend on the user's tier, and
//! collections of inactive users are purged.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer orchestrating the domain.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for storage and the host world.
pub mod infrastructure;
/// Presentation layer turning commands into text.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "signcopy";

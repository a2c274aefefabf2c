//! Presentation layer turning commands into service calls and text.

/// Command dispatch.
pub mod commands;
/// User-facing messages.
pub mod messages;

pub use commands::{CommandOutput, execute};

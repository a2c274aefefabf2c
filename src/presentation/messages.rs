//! User-facing text for command results.

use std::fmt::Write;

use crate::application::{ListedImage, PurgeReport};
use crate::domain::errors::ImageError;

/// Formats a duration as `Xh Ymin`, `Xmin Ys` or `Xs`.
#[must_use]
pub fn readable_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = secs % 3600 / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{hours}h {minutes}min")
    } else if minutes > 0 {
        format!("{minutes}min {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// One line describing why an operation was refused.
#[must_use]
pub fn render_error(err: &ImageError) -> String {
    match err {
        ImageError::OnCooldown {
            operation,
            remaining_secs,
        } => format!(
            "{operation} can't be used for another {}.",
            readable_duration(*remaining_secs)
        ),
        ImageError::QuotaExceeded { operation, limit } => {
            format!("You are already at your {operation} limit ({limit}).")
        }
        ImageError::DuplicateName { .. } => "Saved image already exists with this name.".to_string(),
        ImageError::NotFound { reference } => format!("No match found with {reference}."),
        ImageError::NoTargetObject => "Didn't find a sign.".to_string(),
        ImageError::NoEditPermission => "You do not have permission for this sign.".to_string(),
        ImageError::NoTexture | ImageError::DecodeError { .. } => {
            "Error reading image.".to_string()
        }
        ImageError::FeatureDisabled => "Submit feature is disabled.".to_string(),
        other => format!("{}.", capitalize(&other.to_string())),
    }
}

#[must_use]
pub fn saved(name: &str) -> String {
    format!("Sign image \"{name}\" saved.")
}

#[must_use]
pub fn pasted(name: &str) -> String {
    format!("Sign image \"{name}\" pasted.")
}

#[must_use]
pub fn removed(name: &str) -> String {
    format!("Sign image \"{name}\" removed.")
}

#[must_use]
pub fn submitted(name: &str) -> String {
    format!("Sign image \"{name}\" submitted for admin review.")
}

/// Numbered listing with the source of each image.
#[must_use]
pub fn listing(images: &[ListedImage]) -> String {
    let mut out = String::from("Saved Signs\n------------------");
    for image in images {
        let _ = write!(
            out,
            "\n{}.  {} - {}",
            image.ordinal, image.name, image.source_label
        );
    }
    out
}

#[must_use]
pub fn pending(count: usize) -> String {
    format!("{count} pending submissions.")
}

#[must_use]
pub fn seen(touched: bool) -> String {
    if touched {
        "Activity recorded.".to_string()
    } else {
        "No saved images to keep.".to_string()
    }
}

#[must_use]
pub fn purged(report: &PurgeReport) -> String {
    let mut out = format!("Purged {} user's data.", report.removed.len());
    if report.failed_clears > 0 {
        let _ = write!(out, " {} images could not be cleared.", report.failed_clears);
    }
    out
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

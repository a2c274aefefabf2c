//! Limits and switches the image service runs with.

use crate::domain::entities::Tier;
use crate::domain::services::PurgePolicy;

/// Per-tier quota plus cooldown of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaSettings {
    /// Maximum records for standard users.
    pub limit: usize,
    /// Maximum records for privileged users and admins.
    pub privileged_limit: usize,
    /// Seconds between successful uses, 0 disables the cooldown.
    pub cooldown_secs: u64,
}

impl QuotaSettings {
    #[must_use]
    pub const fn limit_for(&self, tier: Tier) -> usize {
        if tier.is_privileged() {
            self.privileged_limit
        } else {
            self.limit
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitSettings {
    pub enabled: bool,
    /// Whether admins are told about pending submissions.
    pub notify_admins: bool,
    pub quota: QuotaSettings,
}

/// Everything [`ImageService`](super::services::ImageService) needs from
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSettings {
    pub save: QuotaSettings,
    pub paste_cooldown_secs: u64,
    pub submit: SubmitSettings,
    pub purge: PurgePolicy,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            save: QuotaSettings {
                limit: 3,
                privileged_limit: 5,
                cooldown_secs: 120,
            },
            paste_cooldown_secs: 60,
            submit: SubmitSettings {
                enabled: false,
                notify_admins: false,
                quota: QuotaSettings {
                    limit: 2,
                    privileged_limit: 4,
                    cooldown_secs: 120,
                },
            },
            purge: PurgePolicy::new(90, 0),
        }
    }
}

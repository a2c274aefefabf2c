//! User identity and permission tier.

use serde::{Deserialize, Serialize};

/// Numeric identity of a user as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Permission tier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Regular user.
    #[default]
    Standard,
    /// User with raised quotas and a longer inactivity allowance.
    Privileged,
    /// Administrator. Gets privileged quotas and submission notices.
    Admin,
}

impl Tier {
    /// Returns whether the tier uses the privileged limits.
    #[must_use]
    pub const fn is_privileged(self) -> bool {
        matches!(self, Self::Privileged | Self::Admin)
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Privileged => write!(f, "privileged"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

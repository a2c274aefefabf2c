//! Permission tiers from the configuration file.

use std::collections::HashSet;

use crate::domain::entities::{Tier, UserId};
use crate::domain::ports::PermissionOracle;
use crate::infrastructure::config::PermissionsConfig;

/// Resolves tiers and grants from the configured user lists. Admins hold
/// every grant.
#[derive(Debug, Clone, Default)]
pub struct ConfigPermissionOracle {
    users: HashSet<UserId>,
    submitters: HashSet<UserId>,
    privileged: HashSet<UserId>,
    admins: HashSet<UserId>,
}

impl ConfigPermissionOracle {
    #[must_use]
    pub fn new(config: &PermissionsConfig) -> Self {
        Self {
            users: config.users.iter().copied().collect(),
            submitters: config.submitters.iter().copied().collect(),
            privileged: config.privileged.iter().copied().collect(),
            admins: config.admins.iter().copied().collect(),
        }
    }
}

impl PermissionOracle for ConfigPermissionOracle {
    fn tier(&self, user: UserId) -> Tier {
        if self.admins.contains(&user) {
            Tier::Admin
        } else if self.privileged.contains(&user) {
            Tier::Privileged
        } else {
            Tier::Standard
        }
    }

    fn can_use(&self, user: UserId) -> bool {
        self.users.contains(&user) || self.admins.contains(&user)
    }

    fn can_submit(&self, user: UserId) -> bool {
        self.submitters.contains(&user) || self.admins.contains(&user)
    }
}

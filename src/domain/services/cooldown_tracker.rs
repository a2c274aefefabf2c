//! Per-user, per-operation cooldown bookkeeping.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{OperationKind, UserId};

/// Remembers when each user last used each operation successfully.
///
/// Persisted with the rest of the store so cooldowns outlive the process.
/// A cooldown of zero seconds disables tracking for that call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CooldownTracker {
    last_use: HashMap<UserId, HashMap<OperationKind, DateTime<Utc>>>,
}

impl CooldownTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful use at `now`.
    pub fn record_use(
        &mut self,
        user: UserId,
        operation: OperationKind,
        cooldown_secs: u64,
        now: DateTime<Utc>,
    ) {
        if cooldown_secs == 0 {
            return;
        }
        self.last_use.entry(user).or_default().insert(operation, now);
    }

    /// Seconds left before `operation` may be used again, zero when ready.
    #[must_use]
    pub fn remaining(
        &self,
        user: UserId,
        operation: OperationKind,
        cooldown_secs: u64,
        now: DateTime<Utc>,
    ) -> u64 {
        if cooldown_secs == 0 {
            return 0;
        }
        let Some(last) = self.last_use.get(&user).and_then(|ops| ops.get(&operation)) else {
            return 0;
        };

        let elapsed = (now - *last).num_seconds().max(0).unsigned_abs();
        cooldown_secs.saturating_sub(elapsed)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RecordSet;

/// A user's personal image collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCollection {
    last_seen_at: DateTime<Utc>,
    records: RecordSet,
}

impl UserCollection {
    #[must_use]
    pub fn new(last_seen_at: DateTime<Utc>) -> Self {
        Self {
            last_seen_at,
            records: RecordSet::new(),
        }
    }

    #[must_use]
    pub const fn last_seen_at(&self) -> DateTime<Utc> {
        self.last_seen_at
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_seen_at = now;
    }

    #[must_use]
    pub const fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut RecordSet {
        &mut self.records
    }

    /// Whole days elapsed since the user was last seen.
    #[must_use]
    pub fn inactive_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.last_seen_at).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_inactive_days_floors() {
        let seen = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let collection = UserCollection::new(seen);

        let almost_two = seen + Duration::days(2) - Duration::seconds(1);
        assert_eq!(collection.inactive_days(almost_two), 1);
        assert_eq!(collection.inactive_days(seen + Duration::days(2)), 2);
    }
}

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::types::UserId;

/// Composite key for one user's withdrawals within one ISO-8601 week.
///
/// An explicit (year, week, user) triple rather than a concatenated string,
/// so keys cannot collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekKey {
    iso_year: i32,
    iso_week: u32,
    user_id: UserId
}

impl WeekKey {
    pub fn new(date: NaiveDate, user_id: UserId) -> Self {
        let week = date.iso_week();

        Self {
            iso_year: week.year(),
            iso_week: week.week(),
            user_id
        }
    }
}

/// Running withdrawal totals for one user in one ISO week.
///
/// Both fields only ever grow; the allowance "resets" by the next week
/// mapping to a different key, never by clearing a bucket.
#[derive(Debug, Default)]
pub struct WeeklyBucket {
    total_eur: Decimal,
    count: u32
}

impl WeeklyBucket {
    pub fn count(&self) -> u32 {
        self.count
    }

    /// How much of the free amount is still unused this week.
    pub fn remaining_free(&self, free_limit_eur: Decimal) -> Decimal {
        (free_limit_eur - self.total_eur).max(Decimal::ZERO)
    }

    /// Accounts for one withdrawal. The full EUR amount is added exactly
    /// once per transaction, whether or not any of it was free.
    pub fn record(&mut self, amount_eur: Decimal) {
        self.total_eur += amount_eur;
        self.count += 1;
    }
}

/// Per-(user, ISO week) withdrawal buckets, created lazily and kept for the
/// duration of the batch run.
#[derive(Debug, Default)]
pub struct WeeklyAllowanceTracker {
    buckets: HashMap<WeekKey, WeeklyBucket>
}

impl WeeklyAllowanceTracker {
    pub fn bucket_mut(&mut self, key: WeekKey) -> &mut WeeklyBucket {
        self.buckets.entry(key).or_default()
    }
}

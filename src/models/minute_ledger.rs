//! Per-date minute ledgers.
//!
//! A [`MinuteBucketSet`] holds, for one duty date, the standby minutes that
//! remain after subtracting actual work. A [`MinuteLedger`] collects them for
//! a whole duty period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Names the minute buckets tracked per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    /// Night plus evening standby.
    Night,
    /// Daytime standby.
    Day,
    /// Bands outside ordinary hours on weekdays.
    Work,
    /// Whole-day weekend/holiday standby.
    Weekend,
}

impl std::fmt::Display for BucketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BucketKind::Night => write!(f, "night"),
            BucketKind::Day => write!(f, "day"),
            BucketKind::Work => write!(f, "work"),
            BucketKind::Weekend => write!(f, "weekend"),
        }
    }
}

/// Remaining standby minutes for one duty date.
///
/// Weekday dates carry `work_minutes`; weekend and holiday dates carry
/// `weekend_minutes`. Never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteBucketSet {
    /// Night and evening standby minutes.
    pub night_minutes: u32,
    /// Daytime standby minutes.
    pub day_minutes: u32,
    /// Minutes outside ordinary hours (weekdays only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_minutes: Option<u32>,
    /// Whole-day weekend/holiday minutes (weekends and holidays only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekend_minutes: Option<u32>,
    /// True on Saturdays, Sundays and holidays.
    #[serde(rename = "helgetillegg")]
    pub is_weekend_tariff: bool,
}

impl MinuteBucketSet {
    /// Returns the minutes left in a bucket, or `None` if the day has no such bucket.
    pub fn minutes(&self, kind: BucketKind) -> Option<u32> {
        match kind {
            BucketKind::Night => Some(self.night_minutes),
            BucketKind::Day => Some(self.day_minutes),
            BucketKind::Work => self.work_minutes,
            BucketKind::Weekend => self.weekend_minutes,
        }
    }

    /// Sum of every bucket present on the day.
    pub fn total_minutes(&self) -> u32 {
        self.night_minutes
            + self.day_minutes
            + self.work_minutes.unwrap_or(0)
            + self.weekend_minutes.unwrap_or(0)
    }
}

/// The bucket sets for every date of a duty period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinuteLedger {
    days: BTreeMap<NaiveDate, MinuteBucketSet>,
}

impl MinuteLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the bucket set for a date.
    pub fn insert(&mut self, date: NaiveDate, buckets: MinuteBucketSet) {
        self.days.insert(date, buckets);
    }

    /// Returns the bucket set for a date.
    pub fn get(&self, date: NaiveDate) -> Option<&MinuteBucketSet> {
        self.days.get(&date)
    }

    /// Iterates bucket sets in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &MinuteBucketSet)> {
        self.days.iter().map(|(date, buckets)| (*date, buckets))
    }

    /// Sums a bucket across all dates, counting absent buckets as zero.
    ///
    /// # Example
    ///
    /// ```
    /// use standby_engine::models::{BucketKind, MinuteBucketSet, MinuteLedger};
    /// use chrono::NaiveDate;
    ///
    /// let mut ledger = MinuteLedger::new();
    /// ledger.insert(
    ///     NaiveDate::from_ymd_opt(2022, 3, 18).unwrap(),
    ///     MinuteBucketSet {
    ///         night_minutes: 600,
    ///         day_minutes: 311,
    ///         work_minutes: Some(240),
    ///         weekend_minutes: None,
    ///         is_weekend_tariff: false,
    ///     },
    /// );
    /// ledger.insert(
    ///     NaiveDate::from_ymd_opt(2022, 3, 19).unwrap(),
    ///     MinuteBucketSet {
    ///         night_minutes: 600,
    ///         day_minutes: 840,
    ///         work_minutes: None,
    ///         weekend_minutes: Some(1440),
    ///         is_weekend_tariff: true,
    ///     },
    /// );
    ///
    /// assert_eq!(ledger.sum(BucketKind::Day), 1151);
    /// assert_eq!(ledger.sum(BucketKind::Work), 240);
    /// assert_eq!(ledger.sum(BucketKind::Weekend), 1440);
    /// ```
    pub fn sum(&self, kind: BucketKind) -> u64 {
        self.sum_where(kind, |_| true)
    }

    /// Sums a bucket across the dates matching `filter`.
    pub fn sum_where<F>(&self, kind: BucketKind, filter: F) -> u64
    where
        F: Fn(&MinuteBucketSet) -> bool,
    {
        self.days
            .values()
            .filter(|buckets| filter(buckets))
            .filter_map(|buckets| buckets.minutes(kind))
            .map(u64::from)
            .sum()
    }

    /// Returns the number of dates in the ledger.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if the ledger holds no dates.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

//! Worked interval models.
//!
//! A [`WorkedInterval`] is one actually-worked span on a duty date, taken from
//! clock-in/clock-out records. [`WorkedIntervals`] groups them per date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::calculation::{MINUTES_PER_DAY, MinuteInterval, parse_clock_time};
use crate::error::{EngineError, EngineResult};

/// One actually-worked span within a day, `from < to`.
///
/// # Example
///
/// ```
/// use standby_engine::models::WorkedInterval;
///
/// let worked = WorkedInterval::parse("07:15-15:33").unwrap();
/// assert_eq!(worked.from, 435);
/// assert_eq!(worked.to, 933);
/// assert_eq!(worked.len(), 498);
/// assert_eq!(worked.to_string(), "07:15-15:33");
/// ```
///
/// Serialized as its `"HH:MM-HH:MM"` string; deserialization goes through
/// [`WorkedInterval::parse`], so reversed or out-of-day spans are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkedInterval {
    /// Minute work started.
    pub from: u32,
    /// Minute work ended.
    pub to: u32,
}

impl WorkedInterval {
    /// Creates a worked interval from minute bounds, enforcing `from < to <= 1440`.
    pub fn new(from: u32, to: u32) -> EngineResult<Self> {
        let interval = Self { from, to };
        if from >= to {
            return Err(EngineError::MalformedInterval {
                value: interval.to_string(),
                message: "start must be before end".to_string(),
            });
        }
        if to > MINUTES_PER_DAY {
            return Err(EngineError::MalformedInterval {
                value: interval.to_string(),
                message: "end is past the end of the day".to_string(),
            });
        }
        Ok(interval)
    }

    /// Parses a `"HH:MM-HH:MM"` string (either side may also be `HHMM`).
    pub fn parse(value: &str) -> EngineResult<Self> {
        let (from, to) = value
            .split_once('-')
            .ok_or_else(|| EngineError::MalformedInterval {
                value: value.to_string(),
                message: "expected FROM-TO".to_string(),
            })?;

        let from = parse_clock_time(from)?;
        let to = parse_clock_time(to)?;

        Self::new(from, to).map_err(|err| match err {
            EngineError::MalformedInterval { message, .. } => EngineError::MalformedInterval {
                value: value.to_string(),
                message,
            },
            other => other,
        })
    }

    /// Returns the worked span as an interval.
    pub fn interval(&self) -> MinuteInterval {
        MinuteInterval::new(self.from, self.to)
    }

    /// Returns the number of minutes worked.
    pub fn len(&self) -> u32 {
        self.interval().len()
    }

    /// Always false for a valid interval.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromStr for WorkedInterval {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WorkedInterval {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WorkedInterval> for String {
    fn from(worked: WorkedInterval) -> Self {
        worked.to_string()
    }
}

impl std::fmt::Display for WorkedInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.from / 60,
            self.from % 60,
            self.to / 60,
            self.to % 60
        )
    }
}

/// Worked intervals keyed by duty date.
///
/// A date with no entry is treated as "no work", the same as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkedIntervals {
    days: BTreeMap<NaiveDate, Vec<WorkedInterval>>,
}

impl WorkedIntervals {
    /// Creates an empty set of worked intervals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a worked interval to a date.
    pub fn push(&mut self, date: NaiveDate, interval: WorkedInterval) {
        self.days.entry(date).or_default().push(interval);
    }

    /// Sets all worked intervals for a date.
    pub fn insert(&mut self, date: NaiveDate, intervals: Vec<WorkedInterval>) {
        self.days.insert(date, intervals);
    }

    /// Returns the intervals worked on a date; empty if none were recorded.
    pub fn for_date(&self, date: NaiveDate) -> &[WorkedInterval] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates the dates that have an entry, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Returns the total number of intervals across all dates.
    pub fn interval_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

impl FromIterator<(NaiveDate, Vec<WorkedInterval>)> for WorkedIntervals {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Vec<WorkedInterval>)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

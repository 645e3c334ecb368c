//! Minute-interval arithmetic over a 24-hour clock.
//!
//! All intervals are half-open `[start, end)` and measured in minutes from
//! midnight, so `0..1440` covers a whole day and `1440` ("2400") is a valid
//! upper bound meaning end of day.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of minutes in a calendar day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// A half-open interval of minutes within one day.
///
/// # Example
///
/// ```
/// use standby_engine::calculation::MinuteInterval;
///
/// let morning = MinuteInterval::new(360, 420);
/// assert_eq!(morning.len(), 60);
/// assert!(morning.overlaps(&MinuteInterval::new(400, 500)));
/// assert!(!morning.overlaps(&MinuteInterval::new(420, 500)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MinuteInterval {
    /// First minute covered by the interval.
    pub start: u32,
    /// First minute after the interval.
    pub end: u32,
}

impl MinuteInterval {
    /// Creates an interval from raw minute bounds.
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns the number of minutes covered; empty or inverted intervals are zero.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the interval covers no minutes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the two intervals share at least one minute.
    pub fn overlaps(&self, other: &MinuteInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns true if `other` lies entirely within this interval.
    pub fn contains(&self, other: &MinuteInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns the number of minutes shared with `other`.
    ///
    /// When this interval fully contains `other`, that is simply `other`'s length.
    pub fn overlap_minutes(&self, other: &MinuteInterval) -> u32 {
        if self.contains(other) {
            return other.len();
        }
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        end.saturating_sub(start)
    }
}

impl std::fmt::Display for MinuteInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Returns true iff `a` and `b` share at least one minute.
pub fn overlaps(a: &MinuteInterval, b: &MinuteInterval) -> bool {
    a.overlaps(b)
}

/// Returns the number of minutes shared by `a` and `b`.
pub fn overlap_minutes(a: &MinuteInterval, b: &MinuteInterval) -> u32 {
    a.overlap_minutes(b)
}

/// Converts a clock time (`"HH:MM"` or `"HHMM"`) to minutes since midnight.
///
/// `"24:00"`/`"2400"` is accepted as end of day and yields `1440`.
///
/// # Example
///
/// ```
/// use standby_engine::calculation::parse_clock_time;
///
/// assert_eq!(parse_clock_time("07:15").unwrap(), 435);
/// assert_eq!(parse_clock_time("0000").unwrap(), 0);
/// assert_eq!(parse_clock_time("2400").unwrap(), 1440);
/// assert!(parse_clock_time("24:01").is_err());
/// ```
pub fn parse_clock_time(value: &str) -> EngineResult<u32> {
    let malformed = |message: &str| EngineError::MalformedInterval {
        value: value.to_string(),
        message: message.to_string(),
    };

    let trimmed = value.trim();
    let (hours, minutes) = match trimmed.split_once(':') {
        Some((h, m)) => (h, m),
        None if trimmed.len() == 4 && trimmed.is_ascii() => trimmed.split_at(2),
        None => return Err(malformed("expected HH:MM or HHMM")),
    };

    if hours.is_empty()
        || hours.len() > 2
        || minutes.len() != 2
        || !hours.chars().chain(minutes.chars()).all(|c| c.is_ascii_digit())
    {
        return Err(malformed("expected HH:MM or HHMM"));
    }

    let hours: u32 = hours.parse().map_err(|_| malformed("invalid hour"))?;
    let minutes: u32 = minutes.parse().map_err(|_| malformed("invalid minute"))?;

    if minutes > 59 {
        return Err(malformed("minute out of range"));
    }
    if hours > 24 || (hours == 24 && minutes != 0) {
        return Err(malformed("hour out of range"));
    }

    Ok(hours * 60 + minutes)
}

//! Duty period models.
//!
//! This module contains the [`DutyDay`] and [`DutyPeriod`] types describing
//! the scheduled standby calendar a calculation runs over.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::calculation::{MINUTES_PER_DAY, MinuteInterval};
use crate::error::{EngineError, EngineResult};

/// Date formats accepted for duty dates, tried in order.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d.%m.%Y"];

/// Parses a duty date in either `YYYY-MM-DD` or `DD.MM.YYYY` form.
///
/// # Example
///
/// ```
/// use standby_engine::models::parse_duty_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2022, 3, 14).unwrap();
/// assert_eq!(parse_duty_date("2022-03-14").unwrap(), expected);
/// assert_eq!(parse_duty_date("14.03.2022").unwrap(), expected);
/// assert!(parse_duty_date("14/03/2022").is_err());
/// ```
pub fn parse_duty_date(value: &str) -> EngineResult<NaiveDate> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| EngineError::InvalidDate {
            value: value.to_string(),
        })
}

/// One scheduled duty day.
///
/// Start and end are minutes since midnight; a 24-hour duty is `0..1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyDay {
    /// Minute the duty starts.
    pub start: u32,
    /// Minute the duty ends.
    pub end: u32,
    /// Whether the day is a public holiday.
    #[serde(default)]
    pub is_holiday: bool,
}

impl DutyDay {
    /// A full 24-hour duty day.
    pub fn full_day(is_holiday: bool) -> Self {
        Self {
            start: 0,
            end: MINUTES_PER_DAY,
            is_holiday,
        }
    }

    /// Returns the scheduled span as an interval.
    pub fn interval(&self) -> MinuteInterval {
        MinuteInterval::new(self.start, self.end)
    }

    /// Returns true if the duty covers the whole day.
    pub fn is_full_day(&self) -> bool {
        self.start == 0 && self.end == MINUTES_PER_DAY
    }

    /// Checks `start <= end` and that both lie within the day.
    pub fn validate(&self, date: NaiveDate) -> EngineResult<()> {
        if self.end > MINUTES_PER_DAY {
            return Err(EngineError::InvalidDutyDay {
                date,
                message: format!("end {} is past the end of the day", self.end),
            });
        }
        if self.start > self.end {
            return Err(EngineError::InvalidDutyDay {
                date,
                message: format!("start {} is after end {}", self.start, self.end),
            });
        }
        Ok(())
    }

    /// Returns true if the weekend/holiday tariff applies on `date`.
    ///
    /// # Example
    ///
    /// ```
    /// use standby_engine::models::DutyDay;
    /// use chrono::NaiveDate;
    ///
    /// let thursday = NaiveDate::from_ymd_opt(2022, 3, 17).unwrap();
    /// let saturday = NaiveDate::from_ymd_opt(2022, 3, 19).unwrap();
    ///
    /// assert!(!DutyDay::full_day(false).is_weekend_tariff(thursday));
    /// assert!(DutyDay::full_day(true).is_weekend_tariff(thursday));
    /// assert!(DutyDay::full_day(false).is_weekend_tariff(saturday));
    /// ```
    pub fn is_weekend_tariff(&self, date: NaiveDate) -> bool {
        self.is_holiday || matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

/// The scheduled duty calendar: one [`DutyDay`] per date.
///
/// Dates need not be contiguous; the engine processes exactly the dates present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DutyPeriod {
    days: BTreeMap<NaiveDate, DutyDay>,
}

impl DutyPeriod {
    /// Creates an empty duty period.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the duty for a date.
    pub fn insert(&mut self, date: NaiveDate, day: DutyDay) {
        self.days.insert(date, day);
    }

    /// Returns the duty for a date, if scheduled.
    pub fn get(&self, date: NaiveDate) -> Option<&DutyDay> {
        self.days.get(&date)
    }

    /// Returns true if the date is scheduled.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    /// Iterates duty days in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &DutyDay)> {
        self.days.iter().map(|(date, day)| (*date, day))
    }

    /// Returns the earliest scheduled date.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    /// Returns the number of scheduled days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if no days are scheduled.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl FromIterator<(NaiveDate, DutyDay)> for DutyPeriod {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, DutyDay)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

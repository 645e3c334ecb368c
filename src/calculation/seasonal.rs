//! Seasonal calibration of the standby buckets.
//!
//! The night bucket gains an hour on the day clocks spring forward (last
//! Sunday of March) and loses one on the day they fall back (last Sunday of
//! October). All other buckets are fixed.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::SeasonalMode;

use super::interval::{MINUTES_PER_DAY, MinuteInterval};

/// Default night band, 00:00-06:00.
pub const NIGHT: MinuteInterval = MinuteInterval::new(0, 360);
/// Night band on the spring-forward day, 00:00-07:00.
pub const NIGHT_SUMMER_TRANSITION: MinuteInterval = MinuteInterval::new(0, 420);
/// Night band on the fall-back day, 00:00-05:00.
pub const NIGHT_WINTER_TRANSITION: MinuteInterval = MinuteInterval::new(0, 300);
/// Daytime standby, 06:00-20:00.
pub const DAY: MinuteInterval = MinuteInterval::new(360, 1200);
/// Evening standby, 20:00-24:00.
pub const EVENING: MinuteInterval = MinuteInterval::new(1200, MINUTES_PER_DAY);
/// Band before ordinary hours, 06:00-07:00.
pub const PRE_WORK: MinuteInterval = MinuteInterval::new(360, 420);
/// Band after ordinary hours, 17:00-20:00.
pub const POST_WORK: MinuteInterval = MinuteInterval::new(1020, 1200);
/// A whole weekend or holiday day.
pub const WEEKEND_FULL: MinuteInterval = MinuteInterval::new(0, MINUTES_PER_DAY);

/// The calibrated bucket boundaries used to classify one duty day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSet {
    /// Night standby; shifts with the season.
    pub night: MinuteInterval,
    /// Daytime standby.
    pub day: MinuteInterval,
    /// Evening standby, paid at the night rate.
    pub evening: MinuteInterval,
    /// Band before ordinary hours on weekdays.
    pub pre_work: MinuteInterval,
    /// Band after ordinary hours on weekdays.
    pub post_work: MinuteInterval,
    /// Whole-day band for weekends and holidays.
    pub weekend_full: MinuteInterval,
}

impl BucketSet {
    /// Buckets for an ordinary (non-transition) day.
    pub const fn standard() -> Self {
        Self {
            night: NIGHT,
            day: DAY,
            evening: EVENING,
            pre_work: PRE_WORK,
            post_work: POST_WORK,
            weekend_full: WEEKEND_FULL,
        }
    }
}

impl Default for BucketSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Chooses which date drives calibration for each duty day.
///
/// # Example
///
/// ```
/// use standby_engine::calculation::SeasonalPolicy;
/// use standby_engine::config::SeasonalMode;
/// use chrono::NaiveDate;
///
/// let as_of = NaiveDate::from_ymd_opt(2022, 4, 1).unwrap();
/// let duty = NaiveDate::from_ymd_opt(2022, 3, 27).unwrap();
///
/// let run = SeasonalPolicy::new(SeasonalMode::RunDate, as_of);
/// assert_eq!(run.reference_date(duty), as_of);
///
/// let per_day = SeasonalPolicy::new(SeasonalMode::DutyDate, as_of);
/// assert_eq!(per_day.reference_date(duty), duty);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalPolicy {
    /// Whether calibration follows the run date or each duty date.
    pub mode: SeasonalMode,
    /// The calculation's as-of date.
    pub as_of: NaiveDate,
}

impl SeasonalPolicy {
    /// Creates a policy.
    pub fn new(mode: SeasonalMode, as_of: NaiveDate) -> Self {
        Self { mode, as_of }
    }

    /// Returns the date whose season decides the buckets for `duty_date`.
    pub fn reference_date(&self, duty_date: NaiveDate) -> NaiveDate {
        match self.mode {
            SeasonalMode::RunDate => self.as_of,
            SeasonalMode::DutyDate => duty_date,
        }
    }

    /// Returns the buckets that apply to `duty_date` under this policy.
    pub fn buckets_for(&self, duty_date: NaiveDate) -> BucketSet {
        calibrate_buckets(self.reference_date(duty_date))
    }
}

/// Returns the last Sunday on or before `date`.
pub fn last_sunday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Returns the day clocks spring forward: the last Sunday on/before March 31.
pub fn summer_time_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 3, 31).map(last_sunday_on_or_before)
}

/// Returns the day clocks fall back: the last Sunday on/before October 31.
pub fn winter_time_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 10, 31).map(last_sunday_on_or_before)
}

/// Produces the bucket boundaries for the given reference date.
///
/// # Example
///
/// ```
/// use standby_engine::calculation::calibrate_buckets;
/// use chrono::NaiveDate;
///
/// // 2022-03-27 is the last Sunday of March 2022
/// let spring = calibrate_buckets(NaiveDate::from_ymd_opt(2022, 3, 27).unwrap());
/// assert_eq!(spring.night.len(), 420);
///
/// let ordinary = calibrate_buckets(NaiveDate::from_ymd_opt(2022, 3, 28).unwrap());
/// assert_eq!(ordinary.night.len(), 360);
/// ```
pub fn calibrate_buckets(reference: NaiveDate) -> BucketSet {
    let mut buckets = BucketSet::standard();
    let year = reference.year();

    if summer_time_start(year) == Some(reference) {
        buckets.night = NIGHT_SUMMER_TRANSITION;
    } else if winter_time_start(year) == Some(reference) {
        buckets.night = NIGHT_WINTER_TRANSITION;
    }

    buckets
}

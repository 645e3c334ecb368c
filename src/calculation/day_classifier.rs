//! Day classification.
//!
//! Initializes the standby minute buckets for one duty date and subtracts the
//! minutes actually worked, producing that date's [`MinuteBucketSet`].
//!
//! Worked intervals must not overlap each other: each one is subtracted
//! independently, so overlapping intervals are counted twice.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{BucketKind, DutyDay, MinuteBucketSet, WorkedInterval};

use super::interval::MinuteInterval;
use super::seasonal::BucketSet;

/// Returns the bucket set for a date before any work is subtracted.
///
/// # Example
///
/// ```
/// use standby_engine::calculation::{BucketSet, initial_buckets};
/// use standby_engine::models::DutyDay;
/// use chrono::NaiveDate;
///
/// // 2022-03-14 is a Monday
/// let monday = NaiveDate::from_ymd_opt(2022, 3, 14).unwrap();
/// let buckets = initial_buckets(monday, &DutyDay::full_day(false), &BucketSet::standard());
///
/// assert_eq!(buckets.night_minutes, 600);
/// assert_eq!(buckets.day_minutes, 840);
/// assert_eq!(buckets.work_minutes, Some(240));
/// assert_eq!(buckets.weekend_minutes, None);
/// assert!(!buckets.is_weekend_tariff);
/// ```
pub fn initial_buckets(date: NaiveDate, duty_day: &DutyDay, buckets: &BucketSet) -> MinuteBucketSet {
    let is_weekend_tariff = duty_day.is_weekend_tariff(date);

    let (work_minutes, weekend_minutes) = if is_weekend_tariff {
        (None, Some(buckets.weekend_full.len()))
    } else {
        (Some(buckets.pre_work.len() + buckets.post_work.len()), None)
    };

    MinuteBucketSet {
        night_minutes: buckets.night.len() + buckets.evening.len(),
        day_minutes: buckets.day.len(),
        work_minutes,
        weekend_minutes,
        is_weekend_tariff,
    }
}

/// Classifies one duty date: initial buckets minus the minutes worked.
///
/// Worked time is subtracted from the night and evening bands (into the night
/// bucket) and the day band. On weekend/holiday dates the full length of every
/// worked interval comes off the weekend bucket; on weekdays only the overlap
/// with the pre- and post-work bands comes off the work bucket.
///
/// # Errors
///
/// Returns [`EngineError::NegativeBucket`] if a subtraction would drive any
/// bucket below zero, which means the worked intervals overlap or are
/// otherwise inconsistent.
///
/// # Example
///
/// ```
/// use standby_engine::calculation::{BucketSet, classify_day};
/// use standby_engine::models::{DutyDay, WorkedInterval};
/// use chrono::NaiveDate;
///
/// // 2022-03-19 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2022, 3, 19).unwrap();
/// let worked = [WorkedInterval::parse("08:00-12:00").unwrap()];
///
/// let buckets = classify_day(
///     saturday,
///     &DutyDay::full_day(false),
///     &worked,
///     &BucketSet::standard(),
/// ).unwrap();
///
/// assert_eq!(buckets.weekend_minutes, Some(1200));
/// assert_eq!(buckets.day_minutes, 600);
/// assert!(buckets.is_weekend_tariff);
/// ```
pub fn classify_day(
    date: NaiveDate,
    duty_day: &DutyDay,
    worked: &[WorkedInterval],
    buckets: &BucketSet,
) -> EngineResult<MinuteBucketSet> {
    let mut ledger = initial_buckets(date, duty_day, buckets);

    for interval in worked {
        let work = interval.interval();

        ledger.night_minutes = deduct(
            date,
            BucketKind::Night,
            ledger.night_minutes,
            overlap(&buckets.night, &work),
        )?;
        ledger.night_minutes = deduct(
            date,
            BucketKind::Night,
            ledger.night_minutes,
            overlap(&buckets.evening, &work),
        )?;
        ledger.day_minutes = deduct(
            date,
            BucketKind::Day,
            ledger.day_minutes,
            overlap(&buckets.day, &work),
        )?;

        if let Some(weekend) = ledger.weekend_minutes {
            ledger.weekend_minutes = Some(deduct(date, BucketKind::Weekend, weekend, work.len())?);
        }

        if let Some(work_minutes) = ledger.work_minutes {
            let remaining = deduct(
                date,
                BucketKind::Work,
                work_minutes,
                overlap(&buckets.pre_work, &work),
            )?;
            ledger.work_minutes = Some(deduct(
                date,
                BucketKind::Work,
                remaining,
                overlap(&buckets.post_work, &work),
            )?);
        }
    }

    Ok(ledger)
}

fn overlap(bucket: &MinuteInterval, work: &MinuteInterval) -> u32 {
    if bucket.overlaps(work) {
        bucket.overlap_minutes(work)
    } else {
        0
    }
}

fn deduct(date: NaiveDate, bucket: BucketKind, remaining: u32, requested: u32) -> EngineResult<u32> {
    remaining
        .checked_sub(requested)
        .ok_or_else(|| EngineError::NegativeBucket {
            date,
            bucket: bucket.to_string(),
            remaining,
            requested,
        })
}

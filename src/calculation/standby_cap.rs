//! Daily ceiling on weekday standby.
//!
//! A weekday may carry at most 16h15m of day and night standby, or 17h in the
//! summer window (after 15 May and before 15 September). Weekends, holidays,
//! the Wednesday before Maundy Thursday, Christmas Eve, the days between
//! Christmas and New Year and New Year's Eve are not capped.

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::DutyDay;

/// Ceiling outside the summer window, 16h15m.
pub const WINTER_CAP_MINUTES: u32 = 16 * 60 + 15;
/// Ceiling inside the summer window, 17h.
pub const SUMMER_CAP_MINUTES: u32 = 17 * 60;

/// Returns Easter Sunday of the Gregorian calendar for `year`.
///
/// # Example
///
/// ```
/// use standby_engine::calculation::easter_sunday;
/// use chrono::NaiveDate;
///
/// assert_eq!(easter_sunday(2022), NaiveDate::from_ymd_opt(2022, 4, 17));
/// assert_eq!(easter_sunday(2024), NaiveDate::from_ymd_opt(2024, 3, 31));
/// ```
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    // Anonymous Gregorian algorithm (Meeus/Jones/Butcher).
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b.div_euclid(4);
    let e = b.rem_euclid(4);
    let f = (b + 8).div_euclid(25);
    let g = (b - f + 1).div_euclid(3);
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c.div_euclid(4);
    let k = c.rem_euclid(4);
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l).div_euclid(451);
    let n = h + l - 7 * m + 114;

    NaiveDate::from_ymd_opt(year, (n / 31) as u32, (n % 31 + 1) as u32)
}

/// True for the fixed and Easter-based dates that are never capped.
fn is_exempt_date(date: NaiveDate) -> bool {
    if date.month() == 12 && date.day() >= 24 {
        return true;
    }
    easter_sunday(date.year())
        .map(|easter| date == easter - Duration::days(4))
        .unwrap_or(false)
}

/// Returns true if the daily standby ceiling applies to the date.
///
/// # Example
///
/// ```
/// use standby_engine::calculation::cap_applies;
/// use standby_engine::models::DutyDay;
/// use chrono::NaiveDate;
///
/// let monday = NaiveDate::from_ymd_opt(2022, 3, 14).unwrap();
/// let christmas_eve = NaiveDate::from_ymd_opt(2022, 12, 24).unwrap();
///
/// assert!(cap_applies(monday, &DutyDay::full_day(false)));
/// assert!(!cap_applies(monday, &DutyDay::full_day(true)));
/// assert!(!cap_applies(christmas_eve, &DutyDay::full_day(false)));
/// ```
pub fn cap_applies(date: NaiveDate, duty_day: &DutyDay) -> bool {
    !duty_day.is_weekend_tariff(date) && !is_exempt_date(date)
}

/// Returns the day and night standby ceiling for the date, in minutes.
pub fn daily_cap_minutes(date: NaiveDate) -> u32 {
    let in_summer = NaiveDate::from_ymd_opt(date.year(), 5, 15)
        .zip(NaiveDate::from_ymd_opt(date.year(), 9, 15))
        .map(|(begin, end)| date > begin && date < end)
        .unwrap_or(false);

    if in_summer {
        SUMMER_CAP_MINUTES
    } else {
        WINTER_CAP_MINUTES
    }
}

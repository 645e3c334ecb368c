//! Period aggregation.
//!
//! Runs the day classifier over every date of a duty period and collects the
//! resulting bucket sets into a [`MinuteLedger`].

use tracing::{debug, warn};

use crate::config::SeasonalMode;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditWarning, BucketKind, DutyPeriod, MinuteLedger, WorkedIntervals,
};

use super::day_classifier::classify_day;
use super::seasonal::{SeasonalPolicy, calibrate_buckets};
use super::standby_cap::{cap_applies, daily_cap_minutes};

/// The ledger for a duty period plus what was noticed while building it.
#[derive(Debug, Clone)]
pub struct LedgerResult {
    /// Remaining standby minutes per duty date.
    pub ledger: MinuteLedger,
    /// Warnings about data the engine accepted but could not fully honour.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording the aggregation.
    pub audit_step: AuditStep,
}

/// Builds the minute ledger for every date in the duty period.
///
/// Dates missing from `worked` are treated as days with no work. Dates in
/// `worked` that are not part of the duty period fail fast. A capped weekday
/// whose remaining day and night minutes exceed the daily ceiling gets a
/// `STANDBY_CAP_EXCEEDED` warning; its minutes are kept as classified.
///
/// # Errors
///
/// - [`EngineError::MissingPeriodData`] if work is recorded on an unscheduled date
/// - [`EngineError::InvalidDutyDay`] if a duty day has inconsistent bounds
/// - [`EngineError::NegativeBucket`] if worked intervals overlap
///
/// # Example
///
/// ```
/// use standby_engine::calculation::{SeasonalPolicy, build_ledger};
/// use standby_engine::config::SeasonalMode;
/// use standby_engine::models::{DutyDay, DutyPeriod, WorkedInterval, WorkedIntervals};
/// use chrono::NaiveDate;
///
/// let monday = NaiveDate::from_ymd_opt(2022, 3, 14).unwrap();
/// let tuesday = NaiveDate::from_ymd_opt(2022, 3, 15).unwrap();
///
/// let mut period = DutyPeriod::new();
/// period.insert(monday, DutyDay::full_day(false));
/// period.insert(tuesday, DutyDay::full_day(false));
///
/// let mut worked = WorkedIntervals::new();
/// worked.push(monday, WorkedInterval::parse("07:15-15:33").unwrap());
///
/// let policy = SeasonalPolicy::new(SeasonalMode::RunDate, monday);
/// let result = build_ledger(&period, &worked, &policy, 1).unwrap();
///
/// assert_eq!(result.ledger.len(), 2);
/// assert_eq!(result.ledger.get(monday).unwrap().day_minutes, 342);
/// assert_eq!(result.ledger.get(tuesday).unwrap().day_minutes, 840);
/// ```
pub fn build_ledger(
    duty_period: &DutyPeriod,
    worked: &WorkedIntervals,
    policy: &SeasonalPolicy,
    step_number: u32,
) -> EngineResult<LedgerResult> {
    if let Some(date) = worked.dates().find(|date| !duty_period.contains_date(*date)) {
        return Err(EngineError::MissingPeriodData { date });
    }

    let run_buckets = calibrate_buckets(policy.as_of);
    let mut ledger = MinuteLedger::new();
    let mut warnings = Vec::new();

    for (date, duty_day) in duty_period.iter() {
        duty_day.validate(date)?;

        if !duty_day.is_full_day() {
            warnings.push(AuditWarning {
                code: "PARTIAL_DUTY_DAY".to_string(),
                message: format!(
                    "Duty on {} spans {}; classified as a full 24-hour duty",
                    date,
                    duty_day.interval()
                ),
                severity: "low".to_string(),
            });
        }

        let buckets = match policy.mode {
            SeasonalMode::RunDate => {
                let own = calibrate_buckets(date);
                if own != run_buckets {
                    warn!(
                        %date,
                        as_of = %policy.as_of,
                        "Seasonal calibration differs between run date and duty date"
                    );
                    warnings.push(AuditWarning {
                        code: "SEASONAL_REFERENCE_MISMATCH".to_string(),
                        message: format!(
                            "Night bucket for {} follows run date {} ({} minutes) instead of the duty date ({} minutes)",
                            date,
                            policy.as_of,
                            run_buckets.night.len(),
                            own.night.len()
                        ),
                        severity: "medium".to_string(),
                    });
                }
                run_buckets
            }
            SeasonalMode::DutyDate => policy.buckets_for(date),
        };

        let intervals = worked.for_date(date);
        let classified = classify_day(date, duty_day, intervals, &buckets)?;
        debug!(
            %date,
            intervals = intervals.len(),
            night_minutes = classified.night_minutes,
            day_minutes = classified.day_minutes,
            helgetillegg = classified.is_weekend_tariff,
            "Classified duty day"
        );

        let standby_minutes = classified.day_minutes + classified.night_minutes;
        let cap = daily_cap_minutes(date);
        if cap_applies(date, duty_day) && standby_minutes > cap {
            warn!(%date, standby_minutes, cap, "Daily standby ceiling exceeded");
            warnings.push(AuditWarning {
                code: "STANDBY_CAP_EXCEEDED".to_string(),
                message: format!(
                    "Standby on {} is {} minutes, above the daily ceiling of {} minutes",
                    date, standby_minutes, cap
                ),
                severity: "medium".to_string(),
            });
        }

        ledger.insert(date, classified);
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "standby_minute_ledger".to_string(),
        rule_name: "Standby Minute Ledger".to_string(),
        input: serde_json::json!({
            "duty_days": duty_period.len(),
            "worked_intervals": worked.interval_count(),
            "seasonal_mode": policy.mode,
            "as_of": policy.as_of.to_string()
        }),
        output: serde_json::json!({
            "night_minutes": ledger.sum(BucketKind::Night),
            "day_minutes": ledger.sum(BucketKind::Day),
            "work_minutes": ledger.sum(BucketKind::Work),
            "weekend_minutes": ledger.sum(BucketKind::Weekend)
        }),
        reasoning: format!(
            "Classified {} duty days and subtracted {} worked intervals from the standby buckets",
            duty_period.len(),
            worked.interval_count()
        ),
    };

    Ok(LedgerResult {
        ledger,
        warnings,
        audit_step,
    })
}

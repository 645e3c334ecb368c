//! Standby compensation.
//!
//! Sums the ledger per category, converts each sum to whole hours and applies
//! the rate table. The work and weekend rates are weekly figures and are
//! divided by the table's weekly divisor before use.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::error::EngineResult;
use crate::models::{AuditStep, BucketKind, CompensationBreakdown, MinuteLedger, StandbyHours};

use super::rounding::{divide_by, minutes_to_whole_hours};

/// Hours, amounts and audit step for the standby compensation.
#[derive(Debug, Clone)]
pub struct CompensationResult {
    /// Whole hours per category.
    pub hours: StandbyHours,
    /// Amount per category plus the unrounded total.
    pub breakdown: CompensationBreakdown,
    /// The audit step recording the calculation.
    pub audit_step: AuditStep,
}

/// Sums the ledger into whole standby hours per category.
pub fn standby_hours(ledger: &MinuteLedger) -> StandbyHours {
    StandbyHours {
        day: minutes_to_whole_hours(ledger.sum(BucketKind::Day)),
        night: minutes_to_whole_hours(ledger.sum(BucketKind::Night)),
        work: minutes_to_whole_hours(ledger.sum(BucketKind::Work)),
        weekend: minutes_to_whole_hours(ledger.sum(BucketKind::Weekend)),
    }
}

/// Calculates the standby compensation for a ledger.
///
/// `day * rate.day + night * rate.night + work * rate.work / divisor
/// + weekend * rate.weekend / divisor`. The total is not rounded.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::CalculationError`] if the rate
/// table's weekly divisor is zero.
///
/// # Example
///
/// ```
/// use standby_engine::calculation::calculate_compensation;
/// use standby_engine::config::RateTable;
/// use standby_engine::models::{MinuteBucketSet, MinuteLedger};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut ledger = MinuteLedger::new();
/// ledger.insert(
///     NaiveDate::from_ymd_opt(2022, 3, 14).unwrap(),
///     MinuteBucketSet {
///         night_minutes: 600,
///         day_minutes: 360,
///         work_minutes: Some(240),
///         weekend_minutes: None,
///         is_weekend_tariff: false,
///     },
/// );
///
/// let rates = RateTable::new(
///     Decimal::from(20),
///     Decimal::from(10),
///     Decimal::from(15),
///     Decimal::from(55),
/// );
///
/// let result = calculate_compensation(&ledger, &rates, 1).unwrap();
/// // 6h * 10 + 10h * 20 + 4h * 15 / 5
/// assert_eq!(result.breakdown.total, Decimal::from(272));
/// ```
pub fn calculate_compensation(
    ledger: &MinuteLedger,
    rates: &RateTable,
    step_number: u32,
) -> EngineResult<CompensationResult> {
    let hours = standby_hours(ledger);

    let day = hours.day * rates.day;
    let night = hours.night * rates.night;
    let work = divide_by(hours.work * rates.work, rates.weekly_divisor, "weekly_divisor")?;
    let weekend = divide_by(
        hours.weekend * rates.weekend,
        rates.weekly_divisor,
        "weekly_divisor",
    )?;
    let total: Decimal = day + night + work + weekend;

    let breakdown = CompensationBreakdown {
        day,
        night,
        work,
        weekend,
        total,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "standby_compensation".to_string(),
        rule_name: "Standby Compensation".to_string(),
        input: serde_json::json!({
            "hours": hours,
            "rates": rates
        }),
        output: serde_json::json!({
            "day": day.normalize().to_string(),
            "night": night.normalize().to_string(),
            "work": work.normalize().to_string(),
            "weekend": weekend.normalize().to_string(),
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "{}h day x {} + {}h night x {} + {}h work x {} / {} + {}h weekend x {} / {} = {}",
            hours.day,
            rates.day,
            hours.night,
            rates.night,
            hours.work,
            rates.work,
            rates.weekly_divisor,
            hours.weekend,
            rates.weekend,
            rates.weekly_divisor,
            total.normalize()
        ),
    };

    Ok(CompensationResult {
        hours,
        breakdown,
        audit_step,
    })
}

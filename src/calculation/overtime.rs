//! Overtime pay for standby duty.
//!
//! Standby hours count as overtime at a fraction of the salary-derived hourly
//! rates: weekday daytime hours at the 50% rate, weekday night hours and all
//! weekend/holiday hours at the 100% rate, each divided by the weekly divisor.

use crate::config::OvertimeRules;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, BucketKind, MinuteBucketSet, MinuteLedger, OvertimeBreakdown, OvertimeHours,
    OvertimeRates, Salary,
};

use super::rounding::{divide_by, minutes_to_whole_hours, round_money};

/// Hours, rates, amounts and audit step for the overtime calculation.
#[derive(Debug, Clone)]
pub struct OvertimeResult {
    /// Whole hours feeding the formula.
    pub hours: OvertimeHours,
    /// The salary-derived hourly rates.
    pub rates: OvertimeRates,
    /// Weekday and weekend amounts plus the rounded total.
    pub breakdown: OvertimeBreakdown,
    /// The audit step recording the calculation.
    pub audit_step: AuditStep,
}

/// Derives the hourly overtime rates from an annual salary.
///
/// Each rate is `salary / annual_norm_hours * factor`, rounded to two decimals.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::CalculationError`] if the configured
/// annual norm is zero.
///
/// # Example
///
/// ```
/// use standby_engine::calculation::overtime_rates;
/// use standby_engine::config::OvertimeRules;
/// use standby_engine::models::Salary;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = overtime_rates(&Salary::from_annual(500_000), &OvertimeRules::default()).unwrap();
/// assert_eq!(rates.ots50, Decimal::from_str("405.41").unwrap());
/// assert_eq!(rates.ots100, Decimal::from_str("540.54").unwrap());
/// ```
pub fn overtime_rates(salary: &Salary, rules: &OvertimeRules) -> EngineResult<OvertimeRates> {
    let hourly = divide_by(salary.annual, rules.annual_norm_hours, "annual_norm_hours")?;

    Ok(OvertimeRates {
        ots50: round_money(hourly * rules.ots50_factor),
        ots100: round_money(hourly * rules.ots100_factor),
    })
}

/// Splits the ledger into the whole hours used for overtime.
///
/// Weekend hours are the day plus night minutes of weekend/holiday dates.
/// Day-work and night hours come from the remaining dates only.
pub fn overtime_hours(ledger: &MinuteLedger) -> OvertimeHours {
    let on_weekend = |set: &MinuteBucketSet| set.is_weekend_tariff;
    let on_weekday = |set: &MinuteBucketSet| !set.is_weekend_tariff;

    let weekend_minutes = ledger.sum_where(BucketKind::Day, on_weekend)
        + ledger.sum_where(BucketKind::Night, on_weekend);

    OvertimeHours {
        weekend: minutes_to_whole_hours(weekend_minutes),
        day_work: minutes_to_whole_hours(ledger.sum_where(BucketKind::Day, on_weekday)),
        night: minutes_to_whole_hours(ledger.sum_where(BucketKind::Night, on_weekday)),
    }
}

/// Calculates the overtime pay for a ledger.
///
/// ```text
/// work    = (day_work * ots50 + night * ots100) / weekly_divisor
/// weekend = weekend * ots100 / weekly_divisor
/// total   = round(work + weekend, 2)
/// ```
///
/// # Errors
///
/// Returns [`crate::error::EngineError::CalculationError`] if the annual norm
/// or weekly divisor is zero.
pub fn calculate_overtime(
    ledger: &MinuteLedger,
    salary: &Salary,
    rules: &OvertimeRules,
    step_number: u32,
) -> EngineResult<OvertimeResult> {
    let hours = overtime_hours(ledger);
    let rates = overtime_rates(salary, rules)?;

    let work = divide_by(
        hours.day_work * rates.ots50 + hours.night * rates.ots100,
        rules.weekly_divisor,
        "weekly_divisor",
    )?;
    let weekend = divide_by(
        hours.weekend * rates.ots100,
        rules.weekly_divisor,
        "weekly_divisor",
    )?;
    let total = round_money(work + weekend);

    let audit_step = AuditStep {
        step_number,
        rule_id: "standby_overtime".to_string(),
        rule_name: "Standby Overtime".to_string(),
        input: serde_json::json!({
            "salary": salary.annual.to_string(),
            "hours": hours,
            "annual_norm_hours": rules.annual_norm_hours.to_string()
        }),
        output: serde_json::json!({
            "ots50": rates.ots50.to_string(),
            "ots100": rates.ots100.to_string(),
            "work": work.normalize().to_string(),
            "weekend": weekend.normalize().to_string(),
            "total": total.to_string()
        }),
        reasoning: format!(
            "({}h x {} + {}h x {}) / {} + {}h x {} / {} = {}",
            hours.day_work,
            rates.ots50,
            hours.night,
            rates.ots100,
            rules.weekly_divisor,
            hours.weekend,
            rates.ots100,
            rules.weekly_divisor,
            total
        ),
    };

    Ok(OvertimeResult {
        hours,
        rates,
        breakdown: OvertimeBreakdown {
            work,
            weekend,
            total,
        },
        audit_step,
    })
}

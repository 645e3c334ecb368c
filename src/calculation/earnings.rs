//! Earnings aggregation and the end-to-end calculation pipeline.

use std::time::Instant;

use chrono::{Local, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::config::{EngineSettings, RateTable, SeasonalMode};
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, CalculationReport, DutyPeriod, EarningsResult, Salary, WorkedIntervals,
};

use super::compensation::calculate_compensation;
use super::overtime::calculate_overtime;
use super::period::build_ledger;
use super::rounding::round_money;
use super::seasonal::SeasonalPolicy;

/// Combines compensation and overtime into the final payout.
///
/// # Example
///
/// ```
/// use standby_engine::calculation::aggregate_earnings;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let earnings = aggregate_earnings(
///     Decimal::from(2672),
///     Decimal::from_str("12810.82").unwrap(),
/// );
/// assert_eq!(earnings.total, Decimal::from_str("15482.82").unwrap());
/// ```
pub fn aggregate_earnings(compensation: Decimal, overtime: Decimal) -> EarningsResult {
    EarningsResult {
        compensation,
        overtime,
        total: round_money(compensation + overtime),
    }
}

/// Everything a single calculation needs besides the engine settings.
#[derive(Debug, Clone)]
pub struct CalculationInput {
    /// Identifier of the employee, carried through to the report.
    pub ident: Option<String>,
    /// Scheduled duty per date.
    pub duty_period: DutyPeriod,
    /// Worked intervals per date.
    pub worked_intervals: WorkedIntervals,
    /// Annual salary.
    pub salary: Salary,
    /// Standby rates.
    pub rates: RateTable,
    /// The as-of date for seasonal calibration.
    pub as_of: NaiveDate,
}

/// Runs the full pipeline and returns a report with the ledger, intermediate
/// figures and an audit trace.
///
/// # Errors
///
/// Propagates any error from ledger construction, compensation or overtime.
pub fn calculate_report(
    input: &CalculationInput,
    settings: &EngineSettings,
) -> EngineResult<CalculationReport> {
    let start_time = Instant::now();
    let policy = SeasonalPolicy::new(settings.seasonal_mode, input.as_of);
    let mut steps: Vec<AuditStep> = Vec::new();

    let ledger_result = build_ledger(&input.duty_period, &input.worked_intervals, &policy, 1)?;
    steps.push(ledger_result.audit_step);

    let compensation = calculate_compensation(&ledger_result.ledger, &input.rates, 2)?;
    steps.push(compensation.audit_step);

    let overtime = calculate_overtime(
        &ledger_result.ledger,
        &input.salary,
        &settings.overtime,
        3,
    )?;
    steps.push(overtime.audit_step);

    let earnings = aggregate_earnings(compensation.breakdown.total, overtime.breakdown.total);
    steps.push(AuditStep {
        step_number: 4,
        rule_id: "standby_earnings".to_string(),
        rule_name: "Standby Earnings".to_string(),
        input: serde_json::json!({
            "compensation": earnings.compensation.normalize().to_string(),
            "overtime": earnings.overtime.to_string()
        }),
        output: serde_json::json!({
            "total": earnings.total.to_string()
        }),
        reasoning: format!(
            "{} compensation + {} overtime = {}",
            earnings.compensation.normalize(),
            earnings.overtime,
            earnings.total
        ),
    });

    let duration = start_time.elapsed();
    info!(
        ident = input.ident.as_deref().unwrap_or("-"),
        duty_days = input.duty_period.len(),
        total = %earnings.total,
        duration_us = duration.as_micros() as u64,
        "Standby calculation completed"
    );

    Ok(CalculationReport {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        ident: input.ident.clone(),
        as_of: input.as_of,
        seasonal_mode: settings.seasonal_mode,
        ledger: ledger_result.ledger,
        standby_hours: compensation.hours,
        overtime_hours: overtime.hours,
        overtime_rates: overtime.rates,
        compensation: compensation.breakdown,
        overtime: overtime.breakdown,
        earnings,
        audit_trace: AuditTrace {
            steps,
            warnings: ledger_result.warnings,
            duration_us: duration.as_micros() as u64,
        },
    })
}

/// Computes the earnings for a duty period.
///
/// Seasonal calibration follows today's local date and the default overtime
/// rules apply. Use [`calculate_report`] to pin the as-of date, pick the
/// seasonal mode or get the full report.
///
/// # Errors
///
/// - [`crate::error::EngineError::MissingPeriodData`] if work is recorded on an unscheduled date
/// - [`crate::error::EngineError::NegativeBucket`] if worked intervals overlap
/// - [`crate::error::EngineError::InvalidDutyDay`] if a duty day has inconsistent bounds
/// - [`crate::error::EngineError::CalculationError`] if a configured divisor is zero
pub fn compute_earnings(
    duty_period: &DutyPeriod,
    worked: &WorkedIntervals,
    rates: &RateTable,
    salary: Salary,
) -> EngineResult<EarningsResult> {
    let input = CalculationInput {
        ident: None,
        duty_period: duty_period.clone(),
        worked_intervals: worked.clone(),
        salary,
        rates: rates.clone(),
        as_of: Local::now().date_naive(),
    };
    let settings = EngineSettings {
        seasonal_mode: SeasonalMode::RunDate,
        ..EngineSettings::default()
    };

    calculate_report(&input, &settings).map(|report| report.earnings)
}

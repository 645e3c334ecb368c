//! Calculation result models for the standby engine.
//!
//! This module contains the [`EarningsResult`] returned by the core entry point
//! and the [`CalculationReport`] that carries the full ledger, intermediate
//! hours and rates, and an audit trace.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SeasonalMode;

use super::MinuteLedger;

/// Whole standby hours per category, after rounding the minute sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandbyHours {
    /// Daytime standby hours.
    pub day: Decimal,
    /// Night and evening standby hours.
    pub night: Decimal,
    /// Hours outside ordinary hours on weekdays.
    pub work: Decimal,
    /// Weekend and holiday hours.
    pub weekend: Decimal,
}

/// Standby compensation per category.
///
/// # Example
///
/// ```
/// use standby_engine::models::CompensationBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = CompensationBreakdown {
///     day: Decimal::from(560),
///     night: Decimal::from(1360),
///     work: Decimal::from(48),
///     weekend: Decimal::from(704),
///     total: Decimal::from(2672),
/// };
/// assert_eq!(
///     breakdown.day + breakdown.night + breakdown.work + breakdown.weekend,
///     breakdown.total
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationBreakdown {
    /// Daytime standby amount.
    pub day: Decimal,
    /// Night and evening standby amount.
    pub night: Decimal,
    /// Amount for the bands outside ordinary hours.
    pub work: Decimal,
    /// Weekend and holiday amount.
    pub weekend: Decimal,
    /// Sum of the above, unrounded.
    pub total: Decimal,
}

/// Whole hours feeding the overtime formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeHours {
    /// Day plus night standby hours on weekend/holiday dates.
    pub weekend: Decimal,
    /// Daytime standby hours on weekdays.
    pub day_work: Decimal,
    /// Night standby hours on weekdays.
    pub night: Decimal,
}

/// Hourly overtime rates derived from salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRates {
    /// Hourly rate at 50% premium.
    pub ots50: Decimal,
    /// Hourly rate at 100% premium.
    pub ots100: Decimal,
}

/// Overtime pay split into weekday and weekend parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeBreakdown {
    /// Overtime from weekday standby.
    pub work: Decimal,
    /// Overtime from weekend/holiday standby.
    pub weekend: Decimal,
    /// Sum rounded to two decimals.
    pub total: Decimal,
}

/// The final payout of one calculation.
///
/// A pure function of the duty period, worked intervals, rate table and salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsResult {
    /// Standby compensation.
    pub compensation: Decimal,
    /// Overtime pay.
    pub overtime: Decimal,
    /// `compensation + overtime`, rounded to two decimals.
    pub total: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a standby calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the report.
    pub engine_version: String,
    /// Identifier of the employee, if supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ident: Option<String>,
    /// The as-of date used for seasonal calibration.
    pub as_of: NaiveDate,
    /// How seasonal calibration was evaluated.
    pub seasonal_mode: SeasonalMode,
    /// Remaining standby minutes per duty date.
    pub ledger: MinuteLedger,
    /// Rounded standby hours per category.
    pub standby_hours: StandbyHours,
    /// Rounded hours used for overtime.
    pub overtime_hours: OvertimeHours,
    /// Hourly overtime rates.
    pub overtime_rates: OvertimeRates,
    /// Compensation per category.
    pub compensation: CompensationBreakdown,
    /// Overtime per part.
    pub overtime: OvertimeBreakdown,
    /// The final payout.
    pub earnings: EarningsResult,
    /// Steps and warnings recorded during the calculation.
    pub audit_trace: AuditTrace,
}

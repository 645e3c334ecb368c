//! Core data models for the standby engine.
//!
//! All models are value objects built fresh for each calculation.

mod calculation_result;
mod duty_period;
mod minute_ledger;
mod salary;
mod worked_interval;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, CalculationReport, CompensationBreakdown, EarningsResult,
    OvertimeBreakdown, OvertimeHours, OvertimeRates, StandbyHours,
};
pub use duty_period::{DutyDay, DutyPeriod, parse_duty_date};
pub use minute_ledger::{BucketKind, MinuteBucketSet, MinuteLedger};
pub use salary::Salary;
pub use worked_interval::{WorkedInterval, WorkedIntervals};

//! Calculation logic for the standby engine.
//!
//! The pipeline runs bottom-up: interval arithmetic and seasonal calibration
//! feed the day classifier, the period aggregator builds a minute ledger from
//! the classified days, and the compensation and overtime calculators turn
//! that ledger into money which the earnings aggregator combines.

mod compensation;
mod day_classifier;
mod earnings;
mod interval;
mod overtime;
mod period;
mod rounding;
mod seasonal;
mod standby_cap;

pub use compensation::{CompensationResult, calculate_compensation, standby_hours};
pub use day_classifier::{classify_day, initial_buckets};
pub use earnings::{CalculationInput, aggregate_earnings, calculate_report, compute_earnings};
pub use interval::{MINUTES_PER_DAY, MinuteInterval, overlap_minutes, overlaps, parse_clock_time};
pub use overtime::{OvertimeResult, calculate_overtime, overtime_hours, overtime_rates};
pub use period::{LedgerResult, build_ledger};
pub use rounding::{minutes_to_whole_hours, round_money};
pub use seasonal::{
    BucketSet, SeasonalPolicy, calibrate_buckets, last_sunday_on_or_before, summer_time_start,
    winter_time_start,
};
pub use standby_cap::{
    SUMMER_CAP_MINUTES, WINTER_CAP_MINUTES, cap_applies, daily_cap_minutes, easter_sunday,
};

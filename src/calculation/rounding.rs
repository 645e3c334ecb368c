//! Rounding helpers shared by the compensation and overtime calculators.
//!
//! Rounding is always half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

const MINUTES_PER_HOUR: i64 = 60;

/// Converts a minute total to whole hours, rounding half away from zero.
///
/// # Example
///
/// ```
/// use standby_engine::calculation::minutes_to_whole_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(minutes_to_whole_hours(3354), Decimal::from(56)); // 55.9
/// assert_eq!(minutes_to_whole_hours(3825), Decimal::from(64)); // 63.75
/// assert_eq!(minutes_to_whole_hours(90), Decimal::from(2));    // 1.5
/// assert_eq!(minutes_to_whole_hours(1329), Decimal::from(22)); // 22.15
/// ```
pub fn minutes_to_whole_hours(minutes: u64) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(MINUTES_PER_HOUR))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a monetary amount to two decimals, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Divides by a configured divisor, rejecting zero instead of panicking.
pub fn divide_by(amount: Decimal, divisor: Decimal, what: &str) -> EngineResult<Decimal> {
    amount
        .checked_div(divisor)
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("{} must be a non-zero divisor, got {}", what, divisor),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_zero_minutes_is_zero_hours() {
        assert_eq!(minutes_to_whole_hours(0), Decimal::ZERO);
    }

    #[test]
    fn test_half_hour_rounds_up() {
        assert_eq!(minutes_to_whole_hours(30), dec("1"));
        assert_eq!(minutes_to_whole_hours(150), dec("3"));
    }

    #[test]
    fn test_just_under_half_rounds_down() {
        assert_eq!(minutes_to_whole_hours(29), dec("0"));
    }

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec("405.405")), dec("405.41"));
        assert_eq!(round_money(dec("0.125")), dec("0.13"));
        assert_eq!(round_money(dec("13567.576")), dec("13567.58"));
    }

    #[test]
    fn test_divide_by_zero_is_an_error() {
        assert!(matches!(
            divide_by(dec("10"), Decimal::ZERO, "weekly_divisor"),
            Err(EngineError::CalculationError { .. })
        ));
        assert_eq!(divide_by(dec("10"), dec("5"), "weekly_divisor").unwrap(), dec("2"));
    }
}

//! Salary model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An employee's annual salary, the basis for overtime rates.
///
/// # Example
///
/// ```
/// use standby_engine::models::Salary;
/// use rust_decimal::Decimal;
///
/// let salary = Salary::from_annual(500_000);
/// assert_eq!(salary.annual, Decimal::from(500_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Salary {
    /// Annual salary.
    pub annual: Decimal,
}

impl Salary {
    /// Creates a salary from an annual amount.
    pub fn new(annual: Decimal) -> Self {
        Self { annual }
    }

    /// Creates a salary from a whole annual figure.
    pub fn from_annual(annual: i64) -> Self {
        Self::new(Decimal::from(annual))
    }
}

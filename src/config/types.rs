//! Configuration types for standby compensation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata about the standby agreement the rates belong to.
#[derive(Debug, Clone, Deserialize)]
pub struct AgreementMetadata {
    /// Short identifier for the agreement.
    pub code: String,
    /// The human-readable name of the agreement.
    pub name: String,
    /// The version or effective date of the agreement.
    pub version: String,
}

/// Which date decides seasonal calibration of the night bucket.
///
/// `RunDate` evaluates the summer/winter rule once per run against the
/// calculation's as-of date. `DutyDate` evaluates it for every duty date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalMode {
    /// Calibrate once from the as-of date.
    #[default]
    RunDate,
    /// Calibrate per duty date.
    DutyDate,
}

fn default_weekly_divisor() -> Decimal {
    Decimal::from(5)
}

/// Per-hour standby rates.
///
/// Work and weekend rates are denominated per five-day equivalent, so their
/// amounts are divided by `weekly_divisor`.
///
/// The keys used by the source timecard system (`0620`, `2006`, `utvidet`,
/// `lørsøn`) are accepted as aliases.
///
/// # Example
///
/// ```
/// use standby_engine::config::RateTable;
/// use rust_decimal::Decimal;
///
/// let json = r#"{"2006": 20, "0620": 10, "utvidet": 15, "lørsøn": 55}"#;
/// let rates: RateTable = serde_json::from_str(json).unwrap();
/// assert_eq!(rates.night, Decimal::from(20));
/// assert_eq!(rates.weekly_divisor, Decimal::from(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Rate for night and evening standby (20-06).
    #[serde(alias = "2006")]
    pub night: Decimal,
    /// Rate for daytime standby (06-20).
    #[serde(alias = "0620")]
    pub day: Decimal,
    /// Rate for the bands outside ordinary hours on weekdays.
    #[serde(alias = "utvidet")]
    pub work: Decimal,
    /// Rate for weekend and holiday standby.
    #[serde(alias = "lørsøn")]
    pub weekend: Decimal,
    /// Divisor applied to the work and weekend amounts.
    #[serde(default = "default_weekly_divisor")]
    pub weekly_divisor: Decimal,
}

impl RateTable {
    /// Creates a rate table with the standard divisor of 5.
    pub fn new(night: Decimal, day: Decimal, work: Decimal, weekend: Decimal) -> Self {
        Self {
            night,
            day,
            work,
            weekend,
            weekly_divisor: default_weekly_divisor(),
        }
    }

    /// Checks that every rate is non-negative and the divisor is positive.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRate`] naming the first offending field.
    pub fn validate(&self) -> EngineResult<()> {
        let rates = [
            ("night", self.night),
            ("day", self.day),
            ("work", self.work),
            ("weekend", self.weekend),
        ];
        if let Some((field, value)) = rates.iter().find(|(_, value)| *value < Decimal::ZERO) {
            return Err(EngineError::InvalidRate {
                field: field.to_string(),
                message: format!("must not be negative, got {}", value),
            });
        }
        if self.weekly_divisor <= Decimal::ZERO {
            return Err(EngineError::InvalidRate {
                field: "weekly_divisor".to_string(),
                message: format!("must be greater than zero, got {}", self.weekly_divisor),
            });
        }
        Ok(())
    }
}

/// A rate table together with the date it takes effect.
#[derive(Debug, Clone, Deserialize)]
pub struct RateConfig {
    /// The effective date for these rates.
    pub effective_date: NaiveDate,
    /// The rates.
    pub rates: RateTable,
}

/// Constants used to derive overtime pay from an annual salary.
///
/// The hourly base is `salary / annual_norm_hours`; `ots50` and `ots100`
/// multiply that base by their factors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRules {
    /// Annual normal-rate divisor.
    pub annual_norm_hours: Decimal,
    /// Factor for overtime at 50% premium.
    pub ots50_factor: Decimal,
    /// Factor for overtime at 100% premium.
    pub ots100_factor: Decimal,
    /// Divisor applied to overtime amounts.
    pub weekly_divisor: Decimal,
}

impl Default for OvertimeRules {
    fn default() -> Self {
        Self {
            annual_norm_hours: Decimal::from(1850),
            ots50_factor: Decimal::new(15, 1),
            ots100_factor: Decimal::from(2),
            weekly_divisor: Decimal::from(5),
        }
    }
}

/// Engine settings from engine.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineSettings {
    /// How the seasonal rule is evaluated.
    #[serde(default)]
    pub seasonal_mode: SeasonalMode,
    /// Overtime constants.
    #[serde(default)]
    pub overtime: OvertimeRules,
}

/// The complete standby configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct StandbyConfig {
    /// Agreement metadata.
    metadata: AgreementMetadata,
    /// Engine settings.
    settings: EngineSettings,
    /// Rate tables by effective date (sorted oldest first).
    rates: Vec<RateConfig>,
}

impl StandbyConfig {
    /// Creates a new StandbyConfig from its component parts.
    pub fn new(metadata: AgreementMetadata, settings: EngineSettings, rates: Vec<RateConfig>) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            settings,
            rates: sorted_rates,
        }
    }

    /// Returns the agreement metadata.
    pub fn agreement(&self) -> &AgreementMetadata {
        &self.metadata
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns all rate configurations.
    pub fn rates(&self) -> &[RateConfig] {
        &self.rates
    }
}

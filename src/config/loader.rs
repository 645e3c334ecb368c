//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading standby
//! configurations from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    AgreementMetadata, EngineSettings, OvertimeRules, RateConfig, RateTable, SeasonalMode,
    StandbyConfig,
};

/// Loads and provides access to standby configuration.
///
/// # Directory Structure
///
/// ```text
/// config/standby/
/// ├── agreement.yaml   # Agreement metadata
/// ├── engine.yaml      # Seasonal mode and overtime rules
/// └── rates/
///     └── 2022-01-01.yaml  # Rate table effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use standby_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/standby").unwrap();
/// let date = NaiveDate::from_ymd_opt(2022, 3, 14).unwrap();
/// let rates = loader.get_rate_table(date).unwrap();
/// println!("Night rate: {}", rates.night);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: StandbyConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails if any required file is missing, contains invalid YAML, or if
    /// the rates directory holds no rate files.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<AgreementMetadata>(&path.join("agreement.yaml"))?;
        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let rates = Self::load_rates(&path.join("rates"))?;

        Ok(Self {
            config: StandbyConfig::new(metadata, settings, rates),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: StandbyConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateConfig>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                rates.push(Self::load_yaml::<RateConfig>(&path)?);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &StandbyConfig {
        &self.config
    }

    /// Returns the agreement metadata.
    pub fn agreement(&self) -> &AgreementMetadata {
        self.config.agreement()
    }

    /// Returns the configured seasonal mode.
    pub fn seasonal_mode(&self) -> SeasonalMode {
        self.config.settings().seasonal_mode
    }

    /// Returns the configured overtime rules.
    pub fn overtime_rules(&self) -> &OvertimeRules {
        &self.config.settings().overtime
    }

    /// Gets the rate table in effect on a given date.
    ///
    /// Picks the most recent rate configuration effective on or before the date.
    pub fn get_rate_table(&self, date: NaiveDate) -> EngineResult<&RateTable> {
        self.config
            .rates()
            .iter()
            .rev()
            .find(|rc| rc.effective_date <= date)
            .map(|rc| &rc.rates)
            .ok_or(EngineError::RateNotFound { date })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/standby"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.agreement().code, "standby-24h");
    }

    #[test]
    fn test_settings_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.seasonal_mode(), SeasonalMode::RunDate);
        assert_eq!(loader.overtime_rules(), &OvertimeRules::default());
    }

    #[test]
    fn test_get_rate_table() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let rates = loader.get_rate_table(make_date("2022-03-14")).unwrap();

        assert_eq!(rates.night, dec("20"));
        assert_eq!(rates.day, dec("10"));
        assert_eq!(rates.work, dec("15"));
        assert_eq!(rates.weekend, dec("55"));
        assert_eq!(rates.weekly_divisor, dec("5"));
    }

    #[test]
    fn test_rate_not_found_for_date_before_effective() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let date = make_date("2020-01-01");

        match loader.get_rate_table(date) {
            Err(EngineError::RateNotFound { date: d }) => assert_eq!(d, date),
            other => panic!("Expected RateNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        match ConfigLoader::load("/nonexistent/path") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("agreement.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_config_picks_latest_effective_table() {
        let table = |night: &str| RateTable::new(dec(night), dec("10"), dec("15"), dec("55"));
        let config = StandbyConfig::new(
            AgreementMetadata {
                code: "standby-24h".to_string(),
                name: "24-hour standby duty".to_string(),
                version: "2023-01-01".to_string(),
            },
            EngineSettings::default(),
            vec![
                RateConfig {
                    effective_date: make_date("2022-01-01"),
                    rates: table("20"),
                },
                RateConfig {
                    effective_date: make_date("2023-01-01"),
                    rates: table("22"),
                },
            ],
        );
        let loader = ConfigLoader::from_config(config);

        assert_eq!(loader.get_rate_table(make_date("2022-12-31")).unwrap().night, dec("20"));
        assert_eq!(loader.get_rate_table(make_date("2023-01-01")).unwrap().night, dec("22"));
    }
}

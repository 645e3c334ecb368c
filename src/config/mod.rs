//! Configuration loading and management for the standby engine.
//!
//! This module provides functionality to load standby configuration from
//! YAML files: agreement metadata, effective-dated rate tables, overtime
//! rules and the seasonal calibration mode.
//!
//! # Example
//!
//! ```no_run
//! use standby_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standby").unwrap();
//! println!("Loaded agreement: {}", config.agreement().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AgreementMetadata, EngineSettings, OvertimeRules, RateConfig, RateTable, SeasonalMode,
    StandbyConfig,
};

//! Error types for the standby engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while classifying duty minutes
//! and computing compensation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the standby engine.
///
/// Every error is local to a single calculation and aborts it; no partial
/// result is ever returned.
///
/// # Example
///
/// ```
/// use standby_engine::error::EngineError;
///
/// let error = EngineError::MalformedInterval {
///     value: "25:00-26:00".to_string(),
///     message: "hour out of range".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Malformed interval '25:00-26:00': hour out of range"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A clock-time or worked interval could not be parsed, or `from >= to`.
    #[error("Malformed interval '{value}': {message}")]
    MalformedInterval {
        /// The offending input.
        value: String,
        /// A description of what made the interval invalid.
        message: String,
    },

    /// Worked time would drive a minute bucket below zero.
    #[error(
        "Negative bucket on {date}: {bucket} has {remaining} minutes left, cannot subtract {requested}"
    )]
    NegativeBucket {
        /// The duty date being classified.
        date: NaiveDate,
        /// The name of the bucket.
        bucket: String,
        /// Minutes remaining in the bucket before the subtraction.
        remaining: u32,
        /// Minutes the worked interval tried to subtract.
        requested: u32,
    },

    /// Worked intervals were supplied for a date outside the duty period.
    #[error("No duty period entry for worked date {date}")]
    MissingPeriodData {
        /// The date that has worked intervals but no duty entry.
        date: NaiveDate,
    },

    /// A duty day carried an inconsistent start/end.
    #[error("Invalid duty day {date}: {message}")]
    InvalidDutyDay {
        /// The duty date.
        date: NaiveDate,
        /// A description of what made the duty day invalid.
        message: String,
    },

    /// A date string could not be parsed.
    #[error("Invalid date '{value}'")]
    InvalidDate {
        /// The offending input.
        value: String,
    },

    /// Two date keys in one input map resolve to the same calendar date.
    #[error("Date {date} appears more than once")]
    DuplicateDate {
        /// The date that was given twice.
        date: NaiveDate,
    },

    /// A rate table value cannot be used.
    #[error("Invalid rate '{field}': {message}")]
    InvalidRate {
        /// The rate table field.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No rate table is effective on the given date.
    #[error("No rate table effective on {date}")]
    RateNotFound {
        /// The date for which the rate table was requested.
        date: NaiveDate,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

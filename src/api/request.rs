//! Request types for the standby engine API.
//!
//! This module defines the JSON request structures for the `/calculate`
//! endpoint. Dates are keyed as strings (`YYYY-MM-DD` or `DD.MM.YYYY`) and
//! times as clock strings, and are converted into domain types here.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::parse_clock_time;
use crate::config::{RateTable, SeasonalMode};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DutyDay, DutyPeriod, Salary, WorkedInterval, WorkedIntervals, parse_duty_date,
};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Identifier of the employee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ident: Option<String>,
    /// Annual salary.
    pub salary: Decimal,
    /// Date driving seasonal calibration; defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<String>,
    /// Overrides the configured seasonal mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonal_mode: Option<SeasonalMode>,
    /// Rates to use instead of the configured table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rates: Option<RateTable>,
    /// Scheduled duty keyed by date.
    #[serde(alias = "periodes")]
    pub duty_period: BTreeMap<String, DutyDayRequest>,
    /// Worked intervals (`HH:MM-HH:MM`) keyed by date.
    #[serde(default, alias = "timecard")]
    pub worked_intervals: BTreeMap<String, Vec<String>>,
}

/// One scheduled duty day in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyDayRequest {
    /// Duty start, e.g. `"0000"`.
    #[serde(alias = "fra")]
    pub start: String,
    /// Duty end, e.g. `"2400"`.
    #[serde(alias = "til")]
    pub end: String,
    /// Whether the date is a public holiday.
    #[serde(default, alias = "helligdag")]
    pub is_holiday: bool,
}

impl DutyDayRequest {
    /// Parses the clock strings into a [`DutyDay`].
    pub fn to_duty_day(&self) -> EngineResult<DutyDay> {
        Ok(DutyDay {
            start: parse_clock_time(&self.start)?,
            end: parse_clock_time(&self.end)?,
            is_holiday: self.is_holiday,
        })
    }
}

impl CalculationRequest {
    /// Builds the duty period, parsing every date key and clock string.
    ///
    /// Two keys naming the same date in different formats are rejected with
    /// [`EngineError::DuplicateDate`].
    pub fn duty_period(&self) -> EngineResult<DutyPeriod> {
        let mut period = DutyPeriod::new();
        for (date, day) in &self.duty_period {
            let date = parse_duty_date(date)?;
            if period.contains_date(date) {
                return Err(EngineError::DuplicateDate { date });
            }
            period.insert(date, day.to_duty_day()?);
        }
        Ok(period)
    }

    /// Builds the worked intervals, parsing every date key and interval string.
    ///
    /// Two keys naming the same date in different formats are rejected with
    /// [`EngineError::DuplicateDate`].
    pub fn worked_intervals(&self) -> EngineResult<WorkedIntervals> {
        let mut seen = BTreeSet::new();
        let mut worked = WorkedIntervals::new();
        for (date, intervals) in &self.worked_intervals {
            let date = parse_duty_date(date)?;
            if !seen.insert(date) {
                return Err(EngineError::DuplicateDate { date });
            }
            let parsed = intervals
                .iter()
                .map(|interval| WorkedInterval::parse(interval))
                .collect::<EngineResult<Vec<_>>>()?;
            worked.insert(date, parsed);
        }
        Ok(worked)
    }

    /// Parses the as-of date, if one was supplied.
    pub fn as_of_date(&self) -> EngineResult<Option<NaiveDate>> {
        self.as_of.as_deref().map(parse_duty_date).transpose()
    }

    /// Returns the salary as a domain value.
    pub fn salary(&self) -> Salary {
        Salary::new(self.salary)
    }
}

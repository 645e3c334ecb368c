//! Standby Engine for 24-hour on-call duty
//!
//! This crate turns a duty period and the intervals actually worked during it
//! into standby compensation and overtime pay, using a per-date minute ledger
//! of night, day, work and weekend standby buckets.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

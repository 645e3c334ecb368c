//! HTTP API module for the standby engine.
//!
//! This module exposes `POST /calculate`, which normalizes the request keys,
//! converts the body into a duty period and worked intervals, and returns
//! the calculation report.

mod handlers;
mod normalize;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use normalize::normalize_keys;
pub use request::{CalculationRequest, DutyDayRequest};
pub use response::ApiError;
pub use state::AppState;

//! HTTP request handlers for the standby engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Local;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{CalculationInput, calculate_report};
use crate::config::{ConfigLoader, EngineSettings};
use crate::error::EngineError;
use crate::models::CalculationReport;

use super::normalize::normalize_keys;
use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a duty period with worked intervals and returns the full
/// calculation report.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let raw = match payload {
        Ok(Json(value)) => value,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::malformed_json(body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    let request: CalculationRequest = match serde_json::from_value(normalize_keys(raw)) {
        Ok(request) => request,
        Err(err) => {
            let message = err.to_string();
            warn!(
                correlation_id = %correlation_id,
                error = %message,
                "Request does not match the calculation schema"
            );
            let error = if message.contains("missing field") {
                ApiError::validation_error(message)
            } else {
                ApiError::malformed_json(message)
            };
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    let start_time = Instant::now();
    match perform_calculation(request, state.config()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                calculation_id = %report.calculation_id,
                duty_days = report.ledger.len(),
                warnings = report.audit_trace.warnings.len(),
                total = %report.earnings.total,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, report)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Converts the request into domain values and runs the calculation.
///
/// Rates missing from the request fall back to the configured table in
/// effect on the first duty date, and the seasonal mode falls back to the
/// configured one.
fn perform_calculation(
    request: CalculationRequest,
    config: &ConfigLoader,
) -> Result<CalculationReport, EngineError> {
    let duty_period = request.duty_period()?;
    let worked_intervals = request.worked_intervals()?;
    let as_of = request
        .as_of_date()?
        .unwrap_or_else(|| Local::now().date_naive());

    let rates = match &request.rates {
        Some(rates) => {
            rates.validate()?;
            rates.clone()
        }
        None => config
            .get_rate_table(duty_period.first_date().unwrap_or(as_of))?
            .clone(),
    };

    let settings = EngineSettings {
        seasonal_mode: request.seasonal_mode.unwrap_or(config.seasonal_mode()),
        overtime: config.overtime_rules().clone(),
    };

    let input = CalculationInput {
        ident: request.ident.clone(),
        duty_period,
        worked_intervals,
        salary: request.salary(),
        rates,
        as_of,
    };

    calculate_report(&input, &settings)
}

//! Integration tests for the standby engine.
//!
//! This test suite covers:
//! - The 14.03-20.03.2022 sample week end to end
//! - Seasonal calibration by run date and by duty date
//! - Weekday, weekend and holiday classification
//! - Key normalization and date formats on the HTTP surface
//! - Error cases and their status codes

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use standby_engine::api::{AppState, create_router};
use standby_engine::calculation::{CalculationInput, calculate_report};
use standby_engine::config::{ConfigLoader, EngineSettings, RateTable, SeasonalMode};
use standby_engine::error::EngineError;
use standby_engine::models::{DutyDay, DutyPeriod, Salary, WorkedInterval, WorkedIntervals};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/standby").expect("Failed to load config");
    create_router(AppState::new(config))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn make_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn assert_decimal(value: &Value, expected: &str) {
    let actual = value
        .as_str()
        .unwrap_or_else(|| panic!("Expected decimal string, got {}", value));
    assert_eq!(
        decimal(actual),
        decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

/// The sample week exactly as the upstream system sends it: capitalized keys,
/// `DD.MM.YYYY` dates and the short rate names.
fn sample_week_request(as_of: &str) -> Value {
    json!({
        "Ident": "1234",
        "Salary": "500000",
        "As_Of": as_of,
        "Rates": {"2006": "20", "0620": "10", "Utvidet": "15", "LørSøn": "55"},
        "Periodes": {
            "14.03.2022": {"Fra": "0000", "Til": "2400", "Helligdag": false},
            "15.03.2022": {"Fra": "0000", "Til": "2400", "Helligdag": false},
            "16.03.2022": {"Fra": "0000", "Til": "2400", "Helligdag": false},
            "17.03.2022": {"Fra": "0000", "Til": "2400", "Helligdag": true},
            "18.03.2022": {"Fra": "0000", "Til": "2400", "Helligdag": false},
            "19.03.2022": {"Fra": "0000", "Til": "2400", "Helligdag": false},
            "20.03.2022": {"Fra": "0000", "Til": "2400", "Helligdag": false}
        },
        "Timecard": {
            "14.03.2022": ["07:15-15:33"],
            "15.03.2022": ["07:15-15:57"],
            "16.03.2022": ["01:00-03:00", "07:31-15:33"],
            "17.03.2022": ["07:55-16:10"],
            "18.03.2022": ["07:30-16:19"],
            "19.03.2022": [],
            "20.03.2022": []
        }
    })
}

fn single_day_request(date: &str, holiday: bool, worked: &[&str]) -> Value {
    json!({
        "salary": "500000",
        "as_of": "2022-03-14",
        "duty_period": {date: {"start": "00:00", "end": "24:00", "is_holiday": holiday}},
        "worked_intervals": {date: worked}
    })
}

fn sample_week_input(as_of: &str) -> CalculationInput {
    let duty_period: DutyPeriod = (14..=20)
        .map(|day| {
            (
                NaiveDate::from_ymd_opt(2022, 3, day).unwrap(),
                DutyDay::full_day(day == 17),
            )
        })
        .collect();

    let mut worked_intervals = WorkedIntervals::new();
    for (date, interval) in [
        ("2022-03-14", "07:15-15:33"),
        ("2022-03-15", "07:15-15:57"),
        ("2022-03-16", "01:00-03:00"),
        ("2022-03-16", "07:31-15:33"),
        ("2022-03-17", "07:55-16:10"),
        ("2022-03-18", "07:30-16:19"),
    ] {
        worked_intervals.push(make_date(date), WorkedInterval::parse(interval).unwrap());
    }

    CalculationInput {
        ident: None,
        duty_period,
        worked_intervals,
        salary: Salary::from_annual(500_000),
        rates: RateTable::new(decimal("20"), decimal("10"), decimal("15"), decimal("55")),
        as_of: make_date(as_of),
    }
}

// =============================================================================
// Sample Week
// =============================================================================

#[tokio::test]
async fn test_sample_week_totals() {
    let (status, result) =
        post_calculate(create_router_for_test(), sample_week_request("2022-03-14")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["ident"], "1234");
    assert_decimal(&result["earnings"]["compensation"], "2672");
    assert_decimal(&result["earnings"]["overtime"], "12810.82");
    assert_decimal(&result["earnings"]["total"], "15482.82");
}

#[tokio::test]
async fn test_sample_week_ledger() {
    let (_, result) =
        post_calculate(create_router_for_test(), sample_week_request("2022-03-14")).await;
    let ledger = &result["ledger"];

    let expected: [(&str, u64, u64, Option<u64>, Option<u64>); 7] = [
        ("2022-03-14", 600, 342, Some(240), None),
        ("2022-03-15", 600, 318, Some(240), None),
        ("2022-03-16", 480, 358, Some(240), None),
        ("2022-03-17", 600, 345, None, Some(945)),
        ("2022-03-18", 600, 311, Some(240), None),
        ("2022-03-19", 600, 840, None, Some(1440)),
        ("2022-03-20", 600, 840, None, Some(1440)),
    ];

    for (date, night, day, work, weekend) in expected {
        let buckets = &ledger[date];
        assert_eq!(buckets["night_minutes"], night, "night on {}", date);
        assert_eq!(buckets["day_minutes"], day, "day on {}", date);
        assert_eq!(buckets["work_minutes"].as_u64(), work, "work on {}", date);
        assert_eq!(buckets["weekend_minutes"].as_u64(), weekend, "weekend on {}", date);
        assert_eq!(buckets["helgetillegg"], weekend.is_some(), "tariff on {}", date);
    }
}

#[tokio::test]
async fn test_sample_week_intermediate_figures() {
    let (_, result) =
        post_calculate(create_router_for_test(), sample_week_request("2022-03-14")).await;

    assert_decimal(&result["standby_hours"]["day"], "56");
    assert_decimal(&result["standby_hours"]["night"], "68");
    assert_decimal(&result["standby_hours"]["work"], "16");
    assert_decimal(&result["standby_hours"]["weekend"], "64");

    assert_decimal(&result["overtime_hours"]["weekend"], "64");
    assert_decimal(&result["overtime_hours"]["day_work"], "22");
    assert_decimal(&result["overtime_hours"]["night"], "38");

    assert_decimal(&result["overtime_rates"]["ots50"], "405.41");
    assert_decimal(&result["overtime_rates"]["ots100"], "540.54");

    assert_decimal(&result["overtime"]["work"], "5891.908");
    assert_decimal(&result["overtime"]["weekend"], "6918.912");
}

#[tokio::test]
async fn test_sample_week_audit_trace() {
    let (_, result) =
        post_calculate(create_router_for_test(), sample_week_request("2022-03-14")).await;

    let rule_ids: Vec<&str> = result["audit_trace"]["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|step| step["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(
        rule_ids,
        vec![
            "standby_minute_ledger",
            "standby_compensation",
            "standby_overtime",
            "standby_earnings"
        ]
    );
    assert!(result["audit_trace"]["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_repeated_requests_give_identical_earnings() {
    let (_, first) =
        post_calculate(create_router_for_test(), sample_week_request("2022-03-14")).await;
    let (_, second) =
        post_calculate(create_router_for_test(), sample_week_request("2022-03-14")).await;

    assert_eq!(first["earnings"], second["earnings"]);
    assert_eq!(first["ledger"], second["ledger"]);
    assert_ne!(first["calculation_id"], second["calculation_id"]);
}

// =============================================================================
// Seasonal Calibration
// =============================================================================

#[tokio::test]
async fn test_spring_forward_run_date_lengthens_every_night() {
    let (status, result) =
        post_calculate(create_router_for_test(), sample_week_request("2022-03-27")).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["standby_hours"]["night"], "75");
    assert_decimal(&result["earnings"]["compensation"], "2812");
    assert_decimal(&result["earnings"]["overtime"], "13567.58");
    assert_decimal(&result["earnings"]["total"], "16379.58");

    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    let mismatches = warnings
        .iter()
        .filter(|w| w["code"] == "SEASONAL_REFERENCE_MISMATCH")
        .count();
    assert_eq!(mismatches, 7);

    let capped: Vec<&str> = warnings
        .iter()
        .filter(|w| w["code"] == "STANDBY_CAP_EXCEEDED")
        .map(|w| w["message"].as_str().unwrap())
        .collect();
    assert_eq!(capped.len(), 2);
    assert!(capped[0].contains("2022-03-14"));
    assert!(capped[1].contains("2022-03-15"));
}

#[tokio::test]
async fn test_duty_date_mode_ignores_run_date() {
    let mut request = sample_week_request("2022-03-27");
    request["seasonal_mode"] = json!("duty_date");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["seasonal_mode"], "duty_date");
    assert_decimal(&result["earnings"]["total"], "15482.82");
}

#[tokio::test]
async fn test_duty_date_mode_on_transition_sunday() {
    let mut request = single_day_request("2022-10-30", false, &[]);
    request["seasonal_mode"] = json!("duty_date");

    let (_, result) = post_calculate(create_router_for_test(), request).await;

    // fall back: night is 00:00-05:00 plus the evening
    assert_eq!(result["ledger"]["2022-10-30"]["night_minutes"], 540);
}

#[test]
fn test_library_run_date_and_duty_date_agree_off_transition() {
    let input = sample_week_input("2022-03-14");
    let run_date = calculate_report(&input, &EngineSettings::default()).unwrap();
    let duty_date = calculate_report(
        &input,
        &EngineSettings {
            seasonal_mode: SeasonalMode::DutyDate,
            ..EngineSettings::default()
        },
    )
    .unwrap();

    assert_eq!(run_date.earnings, duty_date.earnings);
    assert_eq!(run_date.earnings.total, decimal("15482.82"));
}

// =============================================================================
// Day Classification
// =============================================================================

#[tokio::test]
async fn test_weekday_ordinary_work() {
    let (_, result) = post_calculate(
        create_router_for_test(),
        single_day_request("2022-03-14", false, &["07:00-15:00"]),
    )
    .await;

    let buckets = &result["ledger"]["2022-03-14"];
    assert_eq!(buckets["night_minutes"], 600);
    assert_eq!(buckets["day_minutes"], 360);
    assert_eq!(buckets["work_minutes"], 240);
    assert!(buckets.get("weekend_minutes").is_none());
    assert_eq!(buckets["helgetillegg"], false);
}

#[tokio::test]
async fn test_saturday_work() {
    let (_, result) = post_calculate(
        create_router_for_test(),
        single_day_request("2022-03-19", false, &["08:00-12:00"]),
    )
    .await;

    let buckets = &result["ledger"]["2022-03-19"];
    assert_eq!(buckets["weekend_minutes"], 1200);
    assert_eq!(buckets["day_minutes"], 600);
    assert!(buckets.get("work_minutes").is_none());
    assert_eq!(buckets["helgetillegg"], true);
}

#[tokio::test]
async fn test_holiday_weekday_uses_weekend_tariff() {
    let (_, result) = post_calculate(
        create_router_for_test(),
        single_day_request("2022-03-17", true, &["07:55-16:10"]),
    )
    .await;

    let buckets = &result["ledger"]["2022-03-17"];
    assert_eq!(buckets["weekend_minutes"], 945);
    assert_eq!(buckets["day_minutes"], 345);
    assert_eq!(buckets["helgetillegg"], true);
}

#[tokio::test]
async fn test_work_in_evening_and_post_work_band() {
    let (_, result) = post_calculate(
        create_router_for_test(),
        single_day_request("2022-03-14", false, &["16:00-22:00"]),
    )
    .await;

    let buckets = &result["ledger"]["2022-03-14"];
    // 20:00-22:00 comes off the evening part of the night bucket
    assert_eq!(buckets["night_minutes"], 480);
    assert_eq!(buckets["day_minutes"], 600);
    // 17:00-20:00 is the whole post-work band
    assert_eq!(buckets["work_minutes"], 60);
}

#[tokio::test]
async fn test_partial_duty_day_warns() {
    let request = json!({
        "salary": "500000",
        "as_of": "2022-03-14",
        "duty_period": {"2022-03-14": {"start": "1600", "end": "2400"}}
    });

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["ledger"]["2022-03-14"]["day_minutes"], 840);
    assert_eq!(result["audit_trace"]["warnings"][0]["code"], "PARTIAL_DUTY_DAY");
}

#[tokio::test]
async fn test_unworked_weekday_exceeds_daily_standby_ceiling() {
    let (status, result) = post_calculate(
        create_router_for_test(),
        single_day_request("2022-03-14", false, &[]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // the ceiling is reported, not applied
    assert_eq!(result["ledger"]["2022-03-14"]["day_minutes"], 840);
    assert_eq!(result["ledger"]["2022-03-14"]["night_minutes"], 600);
    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["code"], "STANDBY_CAP_EXCEEDED");
}

#[tokio::test]
async fn test_days_between_christmas_and_new_year_are_not_capped() {
    let mut request = single_day_request("2022-12-27", false, &[]);
    request["as_of"] = json!("2022-12-27");

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["audit_trace"]["warnings"].as_array().unwrap().is_empty());
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_worked_date_outside_duty_period_returns_400() {
    let mut request = single_day_request("2022-03-14", false, &[]);
    request["worked_intervals"]["2022-03-15"] = json!(["07:00-15:00"]);

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "MISSING_PERIOD_DATA");
    assert!(result["message"].as_str().unwrap().contains("2022-03-15"));
}

#[tokio::test]
async fn test_malformed_interval_returns_400() {
    for interval in ["7-15", "25:00-26:00", "15:00-07:00", "08:60-09:00"] {
        let (status, result) = post_calculate(
            create_router_for_test(),
            single_day_request("2022-03-14", false, &[interval]),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "interval {}", interval);
        assert_eq!(result["code"], "MALFORMED_INTERVAL", "interval {}", interval);
    }
}

#[tokio::test]
async fn test_invalid_date_returns_400() {
    let (status, result) = post_calculate(
        create_router_for_test(),
        single_day_request("2022/03/14", false, &[]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_DATE");
}

#[tokio::test]
async fn test_same_date_in_both_formats_returns_400() {
    let request = json!({
        "salary": "500000",
        "as_of": "2022-03-14",
        "duty_period": {"2022-03-14": {"start": "0000", "end": "2400"}},
        "worked_intervals": {
            "14.03.2022": ["07:00-15:00"],
            "2022-03-14": ["01:00-02:00"]
        }
    });

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "DUPLICATE_DATE");
    assert!(result["message"].as_str().unwrap().contains("2022-03-14"));
}

#[tokio::test]
async fn test_zero_weekly_divisor_returns_400() {
    let mut request = single_day_request("2022-03-14", false, &["07:00-15:00"]);
    request["rates"] = json!({
        "night": "20",
        "day": "10",
        "work": "15",
        "weekend": "55",
        "weekly_divisor": "0"
    });

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_inverted_duty_day_returns_400() {
    let request = json!({
        "salary": "500000",
        "duty_period": {"2022-03-14": {"start": "2000", "end": "0800"}}
    });

    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_DUTY_DAY");
}

#[tokio::test]
async fn test_overlapping_night_work_returns_422() {
    let (status, result) = post_calculate(
        create_router_for_test(),
        single_day_request("2022-03-14", false, &["00:00-06:00", "00:00-06:00"]),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["code"], "NEGATIVE_BUCKET");
}

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .body(Body::from(sample_week_request("2022-03-14").to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_library_error_for_unscheduled_work() {
    let mut input = sample_week_input("2022-03-14");
    input
        .worked_intervals
        .push(make_date("2022-03-21"), WorkedInterval::parse("07:00-15:00").unwrap());

    match calculate_report(&input, &EngineSettings::default()) {
        Err(EngineError::MissingPeriodData { date }) => assert_eq!(date, make_date("2022-03-21")),
        other => panic!("Expected MissingPeriodData, got {:?}", other.map(|r| r.earnings)),
    }
}

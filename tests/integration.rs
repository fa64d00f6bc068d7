//! Integration tests for the Teller Shift Engine HTTP API.
//!
//! This test suite covers:
//! - Shift opening, including the one-open-shift-per-teller rule
//! - Deposits and withdrawals with their sign conventions
//! - Closing reconciliation with and without a discrepancy alert
//! - Read endpoints: shift, summary, ledgers, teller status, register shifts
//! - Error mapping to 400/404/409

use std::str::FromStr;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use teller_shift_engine::api::{AppState, create_router};
use teller_shift_engine::config::ConfigLoader;
use teller_shift_engine::engine::InMemoryEngine;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/engine.yaml").expect("Failed to load config");
    let engine = InMemoryEngine::in_memory(&config).expect("Failed to build engine");
    create_router(AppState::new(engine))
}

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).unwrap(),
        other => panic!("Expected a decimal, got {}", other),
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, body)
}

async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

async fn open(router: &Router, register: &str, teller: &str, breakdown: Value) -> Value {
    let (status, body) = post(
        router,
        "/shifts/open",
        json!({
            "register_code": register,
            "teller_code": teller,
            "initial_breakdown": breakdown
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "open failed: {}", body);
    body
}

async fn transact(router: &Router, shift_code: &str, kind: &str, breakdown: Value) -> (StatusCode, Value) {
    post(
        router,
        "/transactions",
        json!({
            "shift_code": shift_code,
            "kind": kind,
            "breakdown": breakdown
        }),
    )
    .await
}

async fn close(router: &Router, shift_code: &str, breakdown: Value) -> (StatusCode, Value) {
    post(
        router,
        "/shifts/close",
        json!({
            "shift_code": shift_code,
            "final_breakdown": breakdown
        }),
    )
    .await
}

fn shift_code_of(shift: &Value) -> String {
    shift["shift_code"].as_str().unwrap().to_string()
}

// =============================================================================
// Opening
// =============================================================================

#[tokio::test]
async fn test_open_shift_returns_created() {
    let router = create_router_for_test();
    let shift = open(&router, "CAJ01", "USU01", json!([{"value": 100, "count": 10}])).await;

    let code = shift_code_of(&shift);
    assert!(code.starts_with("CAJ01-USU01-"));
    assert_eq!(code.len(), "CAJ01-USU01-20250709".len());
    assert_eq!(shift["state"], "OPEN");
    assert_eq!(decimal(&shift["initial_amount"]), Decimal::from(1000));
    assert_eq!(shift["discrepancy_alert"], false);
    assert!(shift["closed_at"].is_null());
}

#[tokio::test]
async fn test_second_open_for_teller_conflicts() {
    let router = create_router_for_test();
    open(&router, "CAJ01", "USU01", json!([{"value": 100, "count": 1}])).await;

    let (status, body) = post(
        &router,
        "/shifts/open",
        json!({
            "register_code": "CAJ02",
            "teller_code": "USU01",
            "initial_breakdown": [{"value": 100, "count": 1}]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "SHIFT_ALREADY_OPEN");
}

#[tokio::test]
async fn test_open_with_invalid_codes_is_bad_request() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/shifts/open",
        json!({
            "register_code": "REG01",
            "teller_code": "USU01",
            "initial_breakdown": [{"value": 100, "count": 1}]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"], "register_code");
}

#[tokio::test]
async fn test_open_with_non_ascii_digits_is_bad_request() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/shifts/open",
        json!({
            "register_code": "CAJ\u{0661}\u{0662}",
            "teller_code": "USU01",
            "initial_breakdown": [{"value": 100, "count": 1}]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "register_code");

    let (status, _) = get(&router, "/tellers/USU01/status").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_open_with_unknown_denomination_is_bad_request() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/shifts/open",
        json!({
            "register_code": "CAJ01",
            "teller_code": "USU01",
            "initial_breakdown": [{"value": 3, "count": 1}]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "initial_breakdown");
}

// =============================================================================
// Transactions
// =============================================================================

#[tokio::test]
async fn test_deposit_and_withdrawal_signs() {
    let router = create_router_for_test();
    let shift = open(&router, "CAJ01", "USU01", json!([{"value": 100, "count": 10}])).await;
    let code = shift_code_of(&shift);
    let bills = json!([{"value": 100, "count": 3}, {"value": 50, "count": 4}]);

    let (status, deposit) = transact(&router, &code, "DEPOSIT", bills.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deposit["kind"], "DEPOSIT");
    assert_eq!(decimal(&deposit["amount"]), Decimal::from(500));

    let (status, withdrawal) = transact(&router, &code, "withdrawal", bills).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(withdrawal["kind"], "WITHDRAWAL");
    assert_eq!(decimal(&withdrawal["amount"]), Decimal::from(-500));
}

#[tokio::test]
async fn test_declared_amount_mismatch_is_bad_request() {
    let router = create_router_for_test();
    let shift = open(&router, "CAJ01", "USU01", json!([{"value": 100, "count": 1}])).await;

    let (status, body) = post(
        &router,
        "/transactions",
        json!({
            "shift_code": shift_code_of(&shift),
            "kind": "DEPOSIT",
            "breakdown": [{"value": 20, "count": 1}],
            "declared_amount": "25"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "declared_amount");
}

#[tokio::test]
async fn test_declared_amount_must_match_exactly() {
    let router = create_router_for_test();
    let shift = open(&router, "CAJ01", "USU01", json!([{"value": 100, "count": 10}])).await;
    let code = shift_code_of(&shift);

    let (status, body) = post(
        &router,
        "/transactions",
        json!({
            "shift_code": code,
            "kind": "DEPOSIT",
            "breakdown": [{"value": 20, "count": 1}],
            "declared_amount": "20.01"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "declared_amount");

    let (status, entry) = post(
        &router,
        "/transactions",
        json!({
            "shift_code": code,
            "kind": "DEPOSIT",
            "breakdown": [{"value": 20, "count": 1}],
            "declared_amount": "20"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&entry["amount"]), Decimal::from(20));

    let (status, body) = close(&router, &code, json!([{"value": 100, "count": 10}, {"value": 20, "count": 1}])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Shift closed successfully");
    assert_eq!(body["shift"]["discrepancy_alert"], false);
}

#[tokio::test]
async fn test_transaction_on_unknown_shift_is_not_found() {
    let router = create_router_for_test();
    let (status, body) = transact(
        &router,
        "CAJ01-USU01-20250709",
        "DEPOSIT",
        json!([{"value": 10, "count": 1}]),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SHIFT_NOT_FOUND");
}

#[tokio::test]
async fn test_transaction_with_unknown_kind_is_bad_request() {
    let router = create_router_for_test();
    let shift = open(&router, "CAJ01", "USU01", json!([{"value": 100, "count": 1}])).await;

    let (status, body) = transact(
        &router,
        &shift_code_of(&shift),
        "TRANSFER",
        json!([{"value": 10, "count": 1}]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "kind");
}

// =============================================================================
// Closing
// =============================================================================

#[tokio::test]
async fn test_close_balanced_shift() {
    let router = create_router_for_test();
    let shift = open(&router, "CAJ01", "USU01", json!([{"value": 100, "count": 10}])).await;
    let code = shift_code_of(&shift);
    transact(&router, &code, "DEPOSIT", json!([{"value": 100, "count": 5}])).await;
    transact(&router, &code, "WITHDRAWAL", json!([{"value": 100, "count": 2}])).await;

    let (status, body) = close(&router, &code, json!([{"value": 100, "count": 13}])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Shift closed successfully");
    assert_eq!(body["shift"]["state"], "CLOSED");
    assert_eq!(decimal(&body["shift"]["final_amount"]), Decimal::from(1300));
    assert_eq!(decimal(&body["shift"]["discrepancy"]), Decimal::ZERO);
    assert_eq!(body["shift"]["discrepancy_alert"], false);
}

#[tokio::test]
async fn test_close_short_shift_raises_alert() {
    let router = create_router_for_test();
    let shift = open(&router, "CAJ01", "USU01", json!([{"value": 100, "count": 10}])).await;
    let code = shift_code_of(&shift);
    transact(&router, &code, "DEPOSIT", json!([{"value": 100, "count": 5}])).await;
    transact(&router, &code, "WITHDRAWAL", json!([{"value": 100, "count": 2}])).await;

    let (status, body) = close(
        &router,
        &code,
        json!([{"value": 100, "count": 12}, {"value": 50, "count": 1}]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["shift"]["discrepancy"]), Decimal::from(-50));
    assert_eq!(body["shift"]["discrepancy_alert"], true);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Shift closed with discrepancy alert")
    );
}

#[tokio::test]
async fn test_closed_shift_rejects_writes() {
    let router = create_router_for_test();
    let shift = open(&router, "CAJ01", "USU01", json!([{"value": 100, "count": 1}])).await;
    let code = shift_code_of(&shift);
    let (status, _) = close(&router, &code, json!([{"value": 100, "count": 1}])).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = close(&router, &code, json!([{"value": 100, "count": 2}])).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "SHIFT_ALREADY_CLOSED");

    let (status, body) = transact(&router, &code, "DEPOSIT", json!([{"value": 1, "count": 1}])).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "SHIFT_NOT_OPEN");

    let (_, stored) = get(&router, &format!("/shifts/{}", code)).await;
    assert_eq!(decimal(&stored["final_amount"]), Decimal::from(100));
}

#[tokio::test]
async fn test_close_unknown_shift_is_not_found() {
    let router = create_router_for_test();
    let (status, _) = close(
        &router,
        "CAJ01-USU01-20250709",
        json!([{"value": 100, "count": 1}]),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Read endpoints
// =============================================================================

#[tokio::test]
async fn test_summary_and_ledgers() {
    let router = create_router_for_test();
    let shift = open(&router, "CAJ01", "USU01", json!([{"value": 100, "count": 10}])).await;
    let code = shift_code_of(&shift);
    transact(&router, &code, "DEPOSIT", json!([{"value": 50, "count": 2}])).await;
    transact(&router, &code, "WITHDRAWAL", json!([{"value": 20, "count": 1}])).await;

    let (status, summary) = get(&router, &format!("/shifts/{}/summary", code)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&summary["theoretical_amount"]), Decimal::from(1080));
    assert_eq!(summary["transaction_count"], 3);
    assert_eq!(summary["state"], "OPEN");
    assert!(summary["declared_amount"].is_null());

    let (_, again) = get(&router, &format!("/shifts/{}/summary", code)).await;
    assert_eq!(summary, again);

    let (status, deposits) = get(&router, &format!("/shifts/{}/transactions?kind=deposit", code)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deposits.as_array().unwrap().len(), 1);

    let (_, all) = get(&router, &format!("/shifts/{}/transactions", code)).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
    assert_eq!(all[0]["kind"], "OPENING");

    let (status, _) = get(&router, &format!("/shifts/{}/transactions?kind=REFUND", code)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, by_teller) = get(&router, "/tellers/USU01/transactions").await;
    assert_eq!(by_teller.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_teller_status() {
    let router = create_router_for_test();

    let (status, idle) = get(&router, "/tellers/USU05/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(idle["has_open_shift"], false);
    assert!(idle["active_shift"].is_null());
    assert_eq!(idle["total_transactions"], 0);

    let shift = open(&router, "CAJ03", "USU05", json!([{"value": 10, "count": 5}])).await;
    let (_, busy) = get(&router, "/tellers/USU05/status").await;
    assert_eq!(busy["has_open_shift"], true);
    assert_eq!(busy["active_shift"]["shift_code"], shift["shift_code"]);
    assert_eq!(busy["total_transactions"], 1);
    assert!(!busy["last_activity"].is_null());

    let (status, _) = get(&router, "/tellers/BOGUS/status").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_shifts_and_active_shift() {
    let router = create_router_for_test();
    let first = open(&router, "CAJ01", "USU01", json!([{"value": 100, "count": 1}])).await;
    close(&router, &shift_code_of(&first), json!([{"value": 100, "count": 1}])).await;
    let second = open(&router, "CAJ01", "USU02", json!([{"value": 100, "count": 1}])).await;

    let (status, shifts) = get(&router, "/registers/CAJ01/shifts").await;
    assert_eq!(status, StatusCode::OK);
    let shifts = shifts.as_array().unwrap();
    assert_eq!(shifts.len(), 2);
    assert_eq!(shifts[0]["shift_code"], second["shift_code"]);
    assert_eq!(shifts[1]["state"], "CLOSED");

    let (status, active) = get(&router, "/registers/CAJ01/tellers/USU02/active-shift").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active["shift_code"], second["shift_code"]);

    let (status, body) = get(&router, "/registers/CAJ01/tellers/USU01/active-shift").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NO_ACTIVE_SHIFT");
}

#[tokio::test]
async fn test_ledgers_reject_malformed_codes() {
    let router = create_router_for_test();

    let (status, body) = get(&router, "/shifts/BAD/transactions").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "shift_code");

    let (status, _) = get(&router, "/shifts/BAD/transactions?kind=DEPOSIT").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&router, "/tellers/BOGUS/transactions").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "teller_code");
}

#[tokio::test]
async fn test_get_unknown_shift_is_not_found() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/shifts/CAJ01-USU01-20250709").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SHIFT_NOT_FOUND");
}

#[tokio::test]
async fn test_denominations_endpoint() {
    let router = create_router_for_test();
    let (status, body) = get(&router, "/denominations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["denominations"], json!([1, 5, 10, 20, 50, 100]));
    assert_eq!(
        body["kinds"],
        json!(["OPENING", "DEPOSIT", "WITHDRAWAL", "CLOSING"])
    );
    assert_eq!(body["states"], json!(["OPEN", "CLOSED"]));
}

// =============================================================================
// Request errors
// =============================================================================

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let router = create_router_for_test();
    let request = Request::builder()
        .method("POST")
        .uri("/shifts/open")
        .header("Content-Type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_field_is_validation_error() {
    let router = create_router_for_test();
    let (status, body) = post(
        &router,
        "/shifts/close",
        json!({"shift_code": "CAJ01-USU01-20250709"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

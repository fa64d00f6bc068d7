//! HTTP request handlers for the Teller Shift Engine API.
//!
//! Every handler tags its log lines with a fresh correlation id.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{EntryKind, LedgerEntry, Shift, ShiftState, ShiftSummary, TellerStatus};

use super::request::{CloseShiftRequest, EntryFilter, OpenShiftRequest, TransactionRequest};
use super::response::{ApiError, ApiErrorResponse, CloseShiftResponse, DomainConstants};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/shifts/open", post(open_shift))
        .route("/shifts/close", post(close_shift))
        .route("/shifts/:shift_code", get(get_shift))
        .route("/shifts/:shift_code/summary", get(shift_summary))
        .route("/shifts/:shift_code/transactions", get(shift_transactions))
        .route("/transactions", post(process_transaction))
        .route("/tellers/:teller_code/status", get(teller_status))
        .route("/tellers/:teller_code/transactions", get(teller_transactions))
        .route("/registers/:register_code/shifts", get(register_shifts))
        .route(
            "/registers/:register_code/tellers/:teller_code/active-shift",
            get(active_shift),
        )
        .route("/denominations", get(denominations))
        .with_state(state)
}

/// Unwraps a JSON body, turning rejections into 400 responses.
fn parse_body<T>(payload: Result<Json<T>, JsonRejection>, correlation_id: Uuid) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Logs an engine failure against the request and converts it.
fn reject(correlation_id: Uuid, err: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    err.into()
}

/// Handler for POST /shifts/open.
async fn open_shift(
    State(state): State<AppState>,
    payload: Result<Json<OpenShiftRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Shift>)> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        register_code = %request.register_code,
        teller_code = %request.teller_code,
        "Opening shift"
    );

    let shift = state
        .engine()
        .lifecycle()
        .open_shift(
            &request.register_code,
            &request.teller_code,
            request.initial_breakdown,
        )
        .await
        .map_err(|e| reject(correlation_id, e))?;

    Ok((StatusCode::CREATED, Json(shift)))
}

/// Handler for POST /transactions.
async fn process_transaction(
    State(state): State<AppState>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> ApiResult<Json<LedgerEntry>> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        shift_code = %request.shift_code,
        kind = %request.kind,
        "Processing transaction"
    );

    let entry = state
        .engine()
        .processor()
        .process(
            &request.shift_code,
            &request.kind,
            request.breakdown,
            request.declared_amount,
        )
        .await
        .map_err(|e| reject(correlation_id, e))?;

    Ok(Json(entry))
}

/// Handler for POST /shifts/close.
async fn close_shift(
    State(state): State<AppState>,
    payload: Result<Json<CloseShiftRequest>, JsonRejection>,
) -> ApiResult<Json<CloseShiftResponse>> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, shift_code = %request.shift_code, "Closing shift");

    let shift = state
        .engine()
        .lifecycle()
        .close_shift(&request.shift_code, request.final_breakdown)
        .await
        .map_err(|e| reject(correlation_id, e))?;

    Ok(Json(CloseShiftResponse::from(shift)))
}

/// Handler for GET /shifts/:shift_code.
async fn get_shift(
    State(state): State<AppState>,
    Path(shift_code): Path<String>,
) -> ApiResult<Json<Shift>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, shift_code = %shift_code, "Fetching shift");

    let shift = state
        .engine()
        .lifecycle()
        .find_shift(&shift_code)
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(Json(shift))
}

/// Handler for GET /shifts/:shift_code/summary.
async fn shift_summary(
    State(state): State<AppState>,
    Path(shift_code): Path<String>,
) -> ApiResult<Json<ShiftSummary>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, shift_code = %shift_code, "Summarizing shift");

    let summary = state
        .engine()
        .reports()
        .summarize(&shift_code)
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(Json(summary))
}

/// Handler for GET /shifts/:shift_code/transactions.
async fn shift_transactions(
    State(state): State<AppState>,
    Path(shift_code): Path<String>,
    Query(filter): Query<EntryFilter>,
) -> ApiResult<Json<Vec<LedgerEntry>>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, shift_code = %shift_code, "Listing shift transactions");

    let processor = state.engine().processor();
    let entries = match filter.kind {
        Some(kind) => {
            let kind: EntryKind = kind.parse().map_err(|e| reject(correlation_id, e))?;
            processor.entries_for_shift_by_kind(&shift_code, kind).await
        }
        None => processor.entries_for_shift(&shift_code).await,
    }
    .map_err(|e| reject(correlation_id, e))?;

    Ok(Json(entries))
}

/// Handler for GET /tellers/:teller_code/status.
async fn teller_status(
    State(state): State<AppState>,
    Path(teller_code): Path<String>,
) -> ApiResult<Json<TellerStatus>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, teller_code = %teller_code, "Fetching teller status");

    let status = state
        .engine()
        .reports()
        .teller_status(&teller_code)
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(Json(status))
}

/// Handler for GET /tellers/:teller_code/transactions.
async fn teller_transactions(
    State(state): State<AppState>,
    Path(teller_code): Path<String>,
) -> ApiResult<Json<Vec<LedgerEntry>>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, teller_code = %teller_code, "Listing teller transactions");

    let entries = state
        .engine()
        .processor()
        .entries_for_teller(&teller_code)
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(Json(entries))
}

/// Handler for GET /registers/:register_code/shifts.
async fn register_shifts(
    State(state): State<AppState>,
    Path(register_code): Path<String>,
) -> ApiResult<Json<Vec<Shift>>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, register_code = %register_code, "Listing register shifts");

    let shifts = state
        .engine()
        .lifecycle()
        .shifts_for_register(&register_code)
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(Json(shifts))
}

/// Handler for GET /registers/:register_code/tellers/:teller_code/active-shift.
async fn active_shift(
    State(state): State<AppState>,
    Path((register_code, teller_code)): Path<(String, String)>,
) -> ApiResult<Json<Shift>> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        register_code = %register_code,
        teller_code = %teller_code,
        "Fetching active shift"
    );

    let shift = state
        .engine()
        .lifecycle()
        .find_active_shift(&register_code, &teller_code)
        .await
        .map_err(|e| reject(correlation_id, e))?;
    Ok(Json(shift))
}

/// Handler for GET /denominations.
async fn denominations(State(state): State<AppState>) -> Json<DomainConstants> {
    Json(DomainConstants {
        denominations: state.engine().validator().denominations().to_vec(),
        kinds: EntryKind::ALL.to_vec(),
        states: ShiftState::ALL.to_vec(),
    })
}

//! HTTP request handlers for the fee engine API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler parses its body, runs one engine operation, and serialises the
//! result; no handler keeps anything between requests.

use std::borrow::Cow;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    FeeScheduleIndex, academic_months, build_submission_payload, compute_month,
    compute_total_for_months, filter_rows, partition_months, reconcile_student, summarize,
    summarize_by_month,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AcademicMonth, FeeLineItemRecord, MonthlyBreakdown, PaymentDraft, PaymentStatus, ReconciledRow,
};

use super::request::{
    MonthFeeRequest, ReconcileRequest, SelectedMonthsRequest, SummaryRequest, parse_months,
};
use super::response::{
    ApiError, ApiErrorResponse, ReconcileResponse, SummaryResponse, TotalResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/fees/month", post(month_fee_handler))
        .route("/fees/total", post(total_fee_handler))
        .route("/fees/payload", post(payload_handler))
        .route("/payments/reconcile", post(reconcile_handler))
        .route("/reports/summary", post(summary_handler))
        .with_state(state)
}

/// Handler for POST /fees/month.
async fn month_fee_handler(
    State(state): State<AppState>,
    payload: Result<Json<MonthFeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing monthly fee request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match price_month(&state, request) {
        Ok(breakdown) => {
            info!(
                correlation_id = %correlation_id,
                student_id = %breakdown.student_id,
                month = %breakdown.month,
                month_total = %breakdown.month_total,
                duration_us = start_time.elapsed().as_micros(),
                "Monthly fee computed"
            );
            ok(breakdown)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /fees/total.
async fn total_fee_handler(
    State(state): State<AppState>,
    payload: Result<Json<SelectedMonthsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing fee total request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match total_for_selection(&state, request) {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                months = body.months.len(),
                total = %body.total,
                "Fee total computed"
            );
            ok(body)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /fees/payload.
async fn payload_handler(
    State(state): State<AppState>,
    payload: Result<Json<SelectedMonthsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing submission payload request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match payload_for_selection(&state, request) {
        Ok(drafts) => {
            info!(
                correlation_id = %correlation_id,
                drafts = drafts.len(),
                "Submission payload built"
            );
            ok(drafts)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /payments/reconcile.
async fn reconcile_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReconcileRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing reconciliation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match reconcile(&state, request) {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                paid = body.paid_months.len(),
                due = body.due_months.len(),
                "Reconciliation completed"
            );
            ok(body)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /reports/summary.
async fn summary_handler(payload: Result<Json<SummaryRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let rows: Vec<ReconciledRow> = filter_rows(&request.rows, &request.filter)
        .into_iter()
        .cloned()
        .collect();
    let body = SummaryResponse {
        summary: summarize(&rows),
        by_month: summarize_by_month(&rows),
    };

    info!(
        correlation_id = %correlation_id,
        rows = body.summary.total_students,
        total_collected = %body.summary.total_collected,
        total_due = %body.summary.total_due,
        "Report summary computed"
    );
    ok(body)
}

fn price_month(state: &AppState, request: MonthFeeRequest) -> EngineResult<MonthlyBreakdown> {
    let month: AcademicMonth = request.month.parse()?;
    let session = session_or_current(state, request.session);
    let now = request.now.unwrap_or_else(today);
    let catalog = resolve_catalog(state, &session, request.catalog)?;

    Ok(compute_month(&*catalog, &request.profile, &session, month, now))
}

fn total_for_selection(
    state: &AppState,
    request: SelectedMonthsRequest,
) -> EngineResult<TotalResponse> {
    let mut months = parse_months(&request.months)?;
    months.sort();
    months.dedup();
    let session = session_or_current(state, request.session);
    let now = request.now.unwrap_or_else(today);
    let catalog = resolve_catalog(state, &session, request.catalog)?;

    let total = compute_total_for_months(&*catalog, &request.profile, &session, &months, now);
    Ok(TotalResponse { months, total })
}

fn payload_for_selection(
    state: &AppState,
    request: SelectedMonthsRequest,
) -> EngineResult<Vec<PaymentDraft>> {
    let months = parse_months(&request.months)?;
    if months.is_empty() {
        return Err(EngineError::InvalidSelection {
            message: "no months selected for submission".to_string(),
        });
    }
    let session = session_or_current(state, request.session);
    let now = request.now.unwrap_or_else(today);
    let catalog = resolve_catalog(state, &session, request.catalog)?;

    Ok(build_submission_payload(
        &*catalog,
        &request.profile,
        &session,
        &months,
        now,
    ))
}

fn reconcile(state: &AppState, request: ReconcileRequest) -> EngineResult<ReconcileResponse> {
    let months = academic_months();
    let partition = partition_months(&months, &request.records);
    let mut rows = reconcile_student(&request.profile, &months, &request.records);

    if request.include_outstanding {
        let session = session_or_current(state, request.session);
        let now = request.now.unwrap_or_else(today);
        let catalog = state.config().schedule(&session)?;
        rows = rows
            .into_iter()
            .map(|row| match row.status {
                PaymentStatus::Paid => row,
                PaymentStatus::Due => {
                    let breakdown = compute_month(catalog, &request.profile, &session, row.month, now);
                    row.with_outstanding(&breakdown)
                }
            })
            .collect();
    }

    Ok(ReconcileResponse {
        paid_months: partition.paid_months,
        due_months: partition.due_months,
        rows,
    })
}

/// Uses the request's catalog when given, otherwise the configured schedule.
fn resolve_catalog<'a>(
    state: &'a AppState,
    session: &str,
    catalog: Option<Vec<FeeLineItemRecord>>,
) -> EngineResult<Cow<'a, FeeScheduleIndex>> {
    match catalog {
        Some(records) => Ok(Cow::Owned(FeeScheduleIndex::from_records(records))),
        None => state.config().schedule(session).map(Cow::Borrowed),
    }
}

fn session_or_current(state: &AppState, session: Option<String>) -> String {
    session.unwrap_or_else(|| state.config().current_session().to_string())
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn ok<T: Serialize>(body: T) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    ApiErrorResponse::from(err).into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else if body_text.contains("Unknown month") {
                ApiError::new("UNKNOWN_MONTH", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
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
    (StatusCode::BAD_REQUEST, Json(error)).into_response()
}

//! HTTP request handlers for the payslip engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::payslip::PDF_CONTENT_TYPE;

use super::request::{CalculatePayrollRequest, SendPayslipRequest};
use super::response::{ApiError, ApiErrorResponse, MessageResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payrolls/calculate", post(calculate_handler))
        .route(
            "/payrolls/:employee_id/:month_year/payslip",
            get(export_payslip_handler),
        )
        .route(
            "/payrolls/:employee_id/:month_year/email",
            post(send_payslip_handler),
        )
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

fn error_response(error: EngineError) -> Response {
    let api_error: ApiErrorResponse = error.into();
    json_response(api_error.status, api_error.error)
}

/// Turns a JSON extraction failure into a 400 response body.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
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
    }
}

/// Handler for POST /payrolls/calculate.
///
/// Calculates and stores the month's payroll, returning it with 201.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculatePayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll calculation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_error(rejection, correlation_id),
            );
        }
    };
    if let Err(error) = request.validate() {
        warn!(correlation_id = %correlation_id, error = %error.message, "Invalid request");
        return json_response(StatusCode::BAD_REQUEST, error);
    }

    let start_time = Instant::now();
    match state
        .service()
        .calculate_payroll(&request.employee_id, &request.month_year, request.allowances)
        .await
    {
        Ok(payroll) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %payroll.employee_id,
                month_year = %payroll.month_year,
                net_salary = %payroll.net_salary,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll calculation completed"
            );
            json_response(StatusCode::CREATED, payroll)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                month_year = %request.month_year,
                error = %err,
                "Payroll calculation failed"
            );
            error_response(err)
        }
    }
}

/// Handler for GET /payrolls/{employee_id}/{month_year}/payslip.
///
/// Returns the stored payroll's payslip as a PDF download.
async fn export_payslip_handler(
    State(state): State<AppState>,
    Path((employee_id, month_year)): Path<(String, String)>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let start_time = Instant::now();

    match state.service().export_payslip(&employee_id, &month_year).await {
        Ok(payslip) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                month_year = %month_year,
                bytes = payslip.content.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Payslip exported"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, PDF_CONTENT_TYPE.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", payslip.file_name),
                    ),
                ],
                payslip.content,
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                month_year = %month_year,
                error = %err,
                "Payslip export failed"
            );
            error_response(err)
        }
    }
}

/// Handler for POST /payrolls/{employee_id}/{month_year}/email.
///
/// Renders the payslip and emails it to the address in the body.
async fn send_payslip_handler(
    State(state): State<AppState>,
    Path((employee_id, month_year)): Path<(String, String)>,
    payload: Result<Json<SendPayslipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_error(rejection, correlation_id),
            );
        }
    };
    if let Err(error) = request.validate() {
        warn!(correlation_id = %correlation_id, error = %error.message, "Invalid request");
        return json_response(StatusCode::BAD_REQUEST, error);
    }

    let start_time = Instant::now();
    match state
        .service()
        .send_payslip(&employee_id, &month_year, request.to_email.trim())
        .await
    {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                month_year = %month_year,
                duration_us = start_time.elapsed().as_micros(),
                "Payslip emailed"
            );
            json_response(
                StatusCode::OK,
                MessageResponse {
                    message: "Payslip sent successfully via email".to_string(),
                },
            )
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                month_year = %month_year,
                error = %err,
                "Payslip email failed"
            );
            error_response(err)
        }
    }
}

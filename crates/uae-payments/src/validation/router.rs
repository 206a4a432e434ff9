use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::catalog::CatalogQuery;
use super::domain::TransactionRequest;
use super::iban::{format_iban, normalize_iban, IbanOutcome};
use super::intake::RequestRejection;
use super::service::ValidationService;
use crate::error::AppError;

/// Router exposing validation and catalog endpoints.
pub fn validation_router(service: Arc<ValidationService>) -> Router {
    Router::new()
        .route("/api/v1/validate", post(validate_handler))
        .route("/api/v1/validate/iban", post(iban_handler))
        .route("/api/v1/codes", get(list_codes_handler))
        .route("/api/v1/codes/categories", get(categories_handler))
        .route("/api/v1/codes/:code", get(code_handler))
        .with_state(service)
}

#[derive(Debug, Clone, Deserialize)]
pub struct IbanValidationRequest {
    pub iban: String,
}

/// Flat IBAN verdict for the standalone endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IbanValidationView {
    pub iban: String,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_iban: Option<String>,
    pub bank_code: Option<String>,
    pub bank_name: Option<&'static str>,
    pub account_number: Option<String>,
    pub check_digits: Option<String>,
    pub error_message: Option<String>,
}

impl IbanValidationView {
    pub fn from_outcome(raw: &str, outcome: IbanOutcome) -> Self {
        let error_message = outcome.error_message();
        let iban = outcome.iban.unwrap_or_else(|| normalize_iban(raw));
        Self {
            formatted_iban: outcome.is_valid.then(|| format_iban(&iban)),
            iban,
            is_valid: outcome.is_valid,
            bank_code: outcome.bank_code,
            bank_name: outcome.bank_name,
            account_number: outcome.account_number,
            check_digits: outcome.check_digits,
            error_message,
        }
    }
}

pub(crate) async fn validate_handler(
    State(service): State<Arc<ValidationService>>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|rejection| malformed(rejection.body_text()))?;
    let response = service.validate(request)?;
    Ok((StatusCode::OK, Json(response)).into_response())
}

pub(crate) async fn iban_handler(
    State(service): State<Arc<ValidationService>>,
    payload: Result<Json<IbanValidationRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|rejection| malformed(rejection.body_text()))?;
    let outcome = service.validate_iban(&request.iban);
    let view = IbanValidationView::from_outcome(&request.iban, outcome);
    Ok((StatusCode::OK, Json(view)).into_response())
}

pub(crate) async fn list_codes_handler(
    State(service): State<Arc<ValidationService>>,
    query: Result<Query<CatalogQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|rejection| malformed(rejection.body_text()))?;
    let page = service.list_codes(&query)?;
    Ok((StatusCode::OK, Json(page)).into_response())
}

pub(crate) async fn categories_handler(
    State(service): State<Arc<ValidationService>>,
) -> Response {
    let payload = json!({
        "categories": service.categories(),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn code_handler(
    State(service): State<Arc<ValidationService>>,
    Path(code): Path<String>,
) -> Result<Response, AppError> {
    let entry = service.purpose_code(&code)?;
    Ok((StatusCode::OK, Json(entry)).into_response())
}

fn malformed(detail: String) -> AppError {
    warn!(%detail, "rejected malformed request body");
    AppError::from(RequestRejection::Malformed(detail))
}

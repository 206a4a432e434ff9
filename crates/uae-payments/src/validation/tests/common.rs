use std::sync::Arc;

use axum::response::Response;
use axum::Router;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::validation::catalog::PurposeCodeRegistry;
use crate::validation::domain::{TransactionDirection, TransactionRequest, TransactionType};
use crate::validation::evaluation::{RulebookConfig, ValidationEngine};
use crate::validation::response::SessionStamp;
use crate::validation::{validation_router, ValidationService};

pub(super) const VALID_IBAN: &str = "AE070331234567890123456";
pub(super) const BROKEN_CHECKSUM_IBAN: &str = "AE070331234567890123457";
pub(super) const FAB_IBAN: &str = "AE450440000012345678901";
pub(super) const VALID_LEI: &str = "5493001KJTIIGC8Y1R12";

const FIXTURE_CATEGORIES: &str = "category_code,category_name,description,is_cross_border_only\n\
                                  TRD,Trade,,false\n\
                                  PER,Personal,,true\n";
const FIXTURE_CODES: &str = "code,name,category_code,\
                             applies_to_domestic,applies_to_offshore,requires_lei\n\
                             EXP,Export Proceeds,TRD,false,true,true\n\
                             LOC,Local Settlement,TRD,true,false,false\n\
                             GFT,Personal Gift,PER,true,true,false\n";

pub(super) fn registry() -> Arc<PurposeCodeRegistry> {
    Arc::new(PurposeCodeRegistry::embedded().expect("embedded catalog loads"))
}

pub(super) fn fixture_registry() -> Arc<PurposeCodeRegistry> {
    Arc::new(
        PurposeCodeRegistry::from_readers(FIXTURE_CODES.as_bytes(), FIXTURE_CATEGORIES.as_bytes())
            .expect("fixture catalog loads"),
    )
}

pub(super) fn engine() -> ValidationEngine {
    ValidationEngine::new(registry(), RulebookConfig::default())
}

pub(super) fn service() -> Arc<ValidationService> {
    Arc::new(ValidationService::new(registry(), RulebookConfig::default()))
}

pub(super) fn router() -> Router {
    validation_router(service())
}

pub(super) fn aed(amount: i64) -> Decimal {
    Decimal::from(amount)
}

pub(super) fn offshore(amount: i64) -> TransactionRequest {
    TransactionRequest::new(
        TransactionType::Offshore,
        TransactionDirection::Outbound,
        aed(amount),
    )
}

pub(super) fn domestic(amount: i64) -> TransactionRequest {
    TransactionRequest::new(
        TransactionType::Domestic,
        TransactionDirection::Outbound,
        aed(amount),
    )
}

pub(super) fn with_code(mut request: TransactionRequest, code: &str) -> TransactionRequest {
    request.purpose_code = Some(code.to_string());
    request
}

pub(super) fn stamp() -> SessionStamp {
    let created_at = Utc
        .with_ymd_and_hms(2025, 3, 14, 9, 26, 53)
        .single()
        .expect("valid timestamp");
    SessionStamp::new(42, created_at)
}

pub(super) fn rule_codes(results: &[crate::validation::ValidationResult]) -> Vec<&'static str> {
    results.iter().map(|result| result.rule_code).collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

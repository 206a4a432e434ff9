//! End-to-end scenarios for payment validation through the public service facade and router.

mod common {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use uae_payments::validation::{
        PurposeCodeRegistry, RulebookConfig, TransactionDirection, TransactionRequest,
        TransactionType, ValidationService,
    };

    pub(super) fn service() -> Arc<ValidationService> {
        let registry = PurposeCodeRegistry::embedded().expect("embedded catalog loads");
        Arc::new(ValidationService::new(
            Arc::new(registry),
            RulebookConfig::default(),
        ))
    }

    pub(super) fn request(
        transaction_type: TransactionType,
        amount: i64,
        purpose_code: Option<&str>,
    ) -> TransactionRequest {
        let mut request = TransactionRequest::new(
            transaction_type,
            TransactionDirection::Outbound,
            Decimal::from(amount),
        );
        request.purpose_code = purpose_code.map(str::to_string);
        request
    }
}

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;
use uae_payments::validation::{
    validate_iban, validation_router, IbanError, RecommendationType, StpRating, TransactionType,
    ValidationStatus, VerdictStatus,
};

use common::{request, service};

#[test]
fn offshore_remittance_without_purpose_code_needs_remediation() {
    let response = service()
        .validate(request(TransactionType::Offshore, 500_000, None))
        .expect("request accepted");

    assert_eq!(response.stp_score, 70);
    assert_eq!(response.stp_rating, StpRating::Medium);
    assert_eq!(response.validation_status, VerdictStatus::Invalid);
    assert_eq!(response.recommendations.len(), 1);
    assert_eq!(
        response.recommendations[0].recommendation_type,
        RecommendationType::MissingField
    );
}

#[test]
fn high_value_salary_run_requires_debtor_lei() {
    let response = service()
        .validate(request(TransactionType::Domestic, 2_000_000, Some("SAL")))
        .expect("request accepted");

    assert!(response.summary.lei_required);
    assert!(response.summary.is_high_value);
    assert_eq!(response.violation_count, 1);
    assert_eq!(response.total_penalty_risk, Decimal::from(1_000u32));
    assert_eq!(response.stp_score, 85);
}

#[test]
fn supplying_the_missing_lei_clears_the_violation() {
    let mut payment = request(TransactionType::Domestic, 2_000_000, Some("SAL"));
    payment.debtor_lei = Some("5493001KJTIIGC8Y1R12".to_string());

    let response = service().validate(payment).expect("request accepted");

    assert!(response.is_valid());
    assert!(response.lei_provided);
    assert!(response
        .results
        .iter()
        .all(|result| result.validation_status == ValidationStatus::Pass));
}

#[test]
fn standalone_iban_check_matches_engine_verdict() {
    let outcome = validate_iban("AE070331234567890123457");
    assert_eq!(outcome.error, Some(IbanError::Checksum));

    let mut payment = request(TransactionType::Offshore, 1_000, Some("FAM"));
    payment.creditor_iban = Some("AE070331234567890123457".to_string());
    let response = service().validate(payment).expect("request accepted");

    assert!(!response.creditor_iban_valid);
    assert_eq!(response.iban_details.creditor, Some(outcome));
}

#[tokio::test]
async fn http_round_trip_returns_serialized_verdict() {
    let router = validation_router(service());
    let body = json!({
        "transaction_type": "offshore",
        "transaction_direction": "outbound",
        "amount": 2500000,
        "purpose_code": "LLA",
        "debtor_lei": "ABC",
    });

    let response = router
        .oneshot(
            Request::post("/api/v1/validate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let payload: Value = serde_json::from_slice(&bytes).expect("json payload");

    assert_eq!(payload["lei_required"], true);
    assert_eq!(payload["lei_provided"], true);
    assert_eq!(payload["results"][2]["rule_code"], "LEI002");
    assert_eq!(payload["results"][2]["error_code"], "INVALID_LEI_FORMAT");
    assert_eq!(payload["total_penalty_risk"], "500");
    assert_eq!(payload["stp_score"], 90);
    assert_eq!(payload["stp_rating"], "high");
}

use super::common::*;
use crate::validation::catalog::CatalogQuery;
use crate::validation::intake::RequestRejection;
use crate::validation::ValidationServiceError;

#[test]
fn service_sanitizes_before_evaluating() {
    let service = service();
    let mut request = with_code(offshore(5_000), " fam ");
    request.debtor_iban = Some(" ".to_string());

    let response = service.validate(request).expect("request accepted");

    assert_eq!(response.purpose_code.as_deref(), Some("FAM"));
    assert!(response.purpose_code_valid);
    assert!(response.iban_details.debtor.is_none());
}

#[test]
fn sessions_receive_distinct_identifiers() {
    let service = service();

    let first = service.validate(offshore(100)).expect("accepted");
    let second = service.validate(offshore(100)).expect("accepted");

    assert_ne!(first.session_id, second.session_id);
    assert!(first.session_id.starts_with("val-"));
    assert_eq!(first.session_id.len(), "val-20250101000000-000001".len());
}

#[test]
fn rejections_are_not_validation_results() {
    let service = service();
    let mut request = offshore(100);
    request.currency = "12".to_string();

    match service.validate(request) {
        Err(ValidationServiceError::Rejected(RequestRejection::Currency { value })) => {
            assert_eq!(value, "12");
        }
        other => panic!("expected currency rejection, got {other:?}"),
    }
}

#[test]
fn purpose_code_lookup_is_case_insensitive_at_the_edge() {
    let service = service();

    let entry = service.purpose_code(" sal ").expect("SAL resolves");
    assert_eq!(entry.code, "SAL");

    match service.purpose_code("zzz") {
        Err(ValidationServiceError::UnknownPurposeCode(code)) => assert_eq!(code, "ZZZ"),
        other => panic!("expected unknown code, got {other:?}"),
    }
}

#[test]
fn listing_enforces_page_bounds() {
    let service = service();

    let page = service
        .list_codes(&CatalogQuery::default())
        .expect("default query");
    assert_eq!(page.codes.len(), 100);
    assert_eq!(page.total, 117);

    let oversized = CatalogQuery {
        limit: Some(500),
        ..CatalogQuery::default()
    };
    assert!(matches!(
        service.list_codes(&oversized),
        Err(ValidationServiceError::Rejected(
            RequestRejection::PageLimit { .. }
        ))
    ));
}

use super::common::*;
use crate::validation::lei::{validate_lei, LeiError};

#[test]
fn well_formed_lei_passes() {
    assert_eq!(validate_lei(VALID_LEI), Ok(()));
    assert_eq!(validate_lei(&VALID_LEI.to_lowercase()), Ok(()));
}

#[test]
fn short_lei_reports_length() {
    match validate_lei("ABC") {
        Err(LeiError::Length { found: 3 }) => {}
        other => panic!("expected length error, got {other:?}"),
    }
}

#[test]
fn punctuated_lei_reports_charset_before_length() {
    let error = validate_lei("ABCD-EFGH-IJKL-MNOP-QRST").expect_err("hyphens are rejected");

    assert_eq!(error, LeiError::Charset);
    assert_ne!(
        error.to_string(),
        validate_lei("ABC").expect_err("too short").to_string()
    );
}

#[test]
fn absent_lei_is_format_valid() {
    assert_eq!(validate_lei(""), Ok(()));
    assert_eq!(validate_lei("  "), Ok(()));
}

use super::common::*;
use crate::validation::iban::{format_iban, normalize_iban, validate_iban, IbanError, UNKNOWN_BANK};

#[test]
fn valid_iban_exposes_bank_and_account() {
    let outcome = validate_iban(VALID_IBAN);

    assert!(outcome.is_valid);
    assert!(outcome.error.is_none());
    assert_eq!(outcome.check_digits.as_deref(), Some("07"));
    assert_eq!(outcome.bank_code.as_deref(), Some("033"));
    assert_eq!(outcome.bank_name, Some("Emirates NBD"));
    assert_eq!(outcome.account_number.as_deref(), Some("1234567890123456"));
}

#[test]
fn broken_checksum_still_reports_components() {
    let outcome = validate_iban(BROKEN_CHECKSUM_IBAN);

    assert!(!outcome.is_valid);
    assert_eq!(outcome.error, Some(IbanError::Checksum));
    assert_eq!(
        outcome.error_message().as_deref(),
        Some("Invalid IBAN checksum")
    );
    assert_eq!(outcome.bank_code.as_deref(), Some("033"));
    assert_eq!(outcome.account_number.as_deref(), Some("1234567890123457"));
}

#[test]
fn spaced_lowercase_input_matches_compact_form() {
    let compact = validate_iban(VALID_IBAN);
    let spaced = validate_iban("ae07 0331 2345 6789 0123 456");

    assert_eq!(compact, spaced);
    assert_eq!(normalize_iban(&normalize_iban(" ae07 0331 ")), "AE070331");
}

#[test]
fn structural_failures_report_most_specific_reason() {
    let cases = [
        ("", IbanError::Required),
        ("   ", IbanError::Required),
        ("GB82WEST12345698765432", IbanError::CountryPrefix),
        ("AE07033123", IbanError::Length { found: 10 }),
        ("AE07033123456789012345X", IbanError::Format),
    ];

    for (input, expected) in cases {
        let outcome = validate_iban(input);
        assert!(!outcome.is_valid, "{input:?} should be invalid");
        assert_eq!(outcome.error, Some(expected), "reason for {input:?}");
        assert!(outcome.bank_code.is_none());
    }
}

#[test]
fn length_message_includes_found_length() {
    let outcome = validate_iban("AE07033123");
    assert_eq!(
        outcome.error_message().as_deref(),
        Some("IBAN must be 23 characters (got 10)")
    );
}

#[test]
fn unknown_bank_code_does_not_fail_validation() {
    let outcome = validate_iban("AE109991234567890123456");

    assert!(outcome.is_valid);
    assert_eq!(outcome.bank_code.as_deref(), Some("999"));
    assert_eq!(outcome.bank_name, Some(UNKNOWN_BANK));
}

#[test]
fn other_directory_banks_resolve() {
    let outcome = validate_iban(FAB_IBAN);
    assert!(outcome.is_valid);
    assert_eq!(outcome.bank_name, Some("First Abu Dhabi Bank"));
    assert_eq!(format_iban(FAB_IBAN), "AE45 0440 0000 1234 5678 901");
}

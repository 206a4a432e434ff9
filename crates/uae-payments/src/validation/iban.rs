//! UAE IBAN structure and ISO 7064 MOD 97-10 checksum validation.
//!
//! A UAE IBAN is `AE` + 2 check digits + 3-digit bank code + 16-digit account number.

use serde::Serialize;

pub const IBAN_COUNTRY_CODE: &str = "AE";
pub const IBAN_LENGTH: usize = 23;
pub const UNKNOWN_BANK: &str = "Unknown Bank";

const BANK_CODE_RANGE: std::ops::Range<usize> = 4..7;

/// Central Bank bank-code assignments used for informational lookups.
const BANK_DIRECTORY: &[(&str, &str)] = &[
    ("011", "National Bank of Abu Dhabi"),
    ("013", "Habib Bank AG Zurich"),
    ("015", "Bank of Baroda"),
    ("016", "Sharjah Islamic Bank"),
    ("017", "RAKBANK"),
    ("019", "Dubai Islamic Bank"),
    ("020", "Emirates Islamic Bank"),
    ("024", "National Bank of Fujairah"),
    ("026", "United Arab Bank"),
    ("028", "Commercial Bank of Dubai"),
    ("033", "Emirates NBD"),
    ("034", "Arab Bank"),
    ("035", "Mashreq Bank"),
    ("038", "Abu Dhabi Islamic Bank"),
    ("041", "HSBC Middle East"),
    ("042", "Standard Chartered"),
    ("044", "First Abu Dhabi Bank"),
    ("046", "Abu Dhabi Commercial Bank"),
];

/// Reason an IBAN was rejected, ordered from most to least specific structural failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IbanError {
    #[error("IBAN is required")]
    Required,
    #[error("IBAN must start with AE for UAE")]
    CountryPrefix,
    #[error("IBAN must be 23 characters (got {found})")]
    Length { found: usize },
    #[error("Invalid IBAN format")]
    Format,
    #[error("Invalid IBAN checksum")]
    Checksum,
}

/// Structured result of validating one IBAN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IbanOutcome {
    pub is_valid: bool,
    pub iban: Option<String>,
    pub check_digits: Option<String>,
    pub bank_code: Option<String>,
    pub bank_name: Option<&'static str>,
    pub account_number: Option<String>,
    pub error: Option<IbanError>,
}

impl IbanOutcome {
    fn rejected(error: IbanError) -> Self {
        Self {
            is_valid: false,
            iban: None,
            check_digits: None,
            bank_code: None,
            bank_name: None,
            account_number: None,
            error: Some(error),
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Strip whitespace and upper-case; applying it twice is a no-op.
pub fn normalize_iban(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Render an IBAN in four-character groups for display.
pub fn format_iban(raw: &str) -> String {
    let normalized = normalize_iban(raw);
    normalized
        .as_bytes()
        .chunks(4)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn bank_name(bank_code: &str) -> &'static str {
    BANK_DIRECTORY
        .iter()
        .find(|(code, _)| *code == bank_code)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_BANK)
}

pub fn validate_iban(raw: &str) -> IbanOutcome {
    if raw.trim().is_empty() {
        return IbanOutcome::rejected(IbanError::Required);
    }

    let iban = normalize_iban(raw);
    if let Some(error) = structural_error(&iban) {
        return IbanOutcome::rejected(error);
    }

    // Structure guarantees ASCII digits past the prefix, so byte slicing is safe.
    let bank_code = iban[BANK_CODE_RANGE].to_string();
    let outcome = IbanOutcome {
        is_valid: true,
        check_digits: Some(iban[2..4].to_string()),
        bank_name: Some(bank_name(&bank_code)),
        account_number: Some(iban[BANK_CODE_RANGE.end..].to_string()),
        bank_code: Some(bank_code),
        error: None,
        iban: Some(iban),
    };

    let checksum_ok = outcome.iban.as_deref().map(mod97_remainder) == Some(1);
    if checksum_ok {
        outcome
    } else {
        IbanOutcome {
            is_valid: false,
            error: Some(IbanError::Checksum),
            ..outcome
        }
    }
}

fn structural_error(iban: &str) -> Option<IbanError> {
    let well_formed = iban.len() == IBAN_LENGTH
        && iban.starts_with(IBAN_COUNTRY_CODE)
        && iban[IBAN_COUNTRY_CODE.len()..]
            .bytes()
            .all(|byte| byte.is_ascii_digit());
    if well_formed {
        return None;
    }

    if !iban.starts_with(IBAN_COUNTRY_CODE) {
        return Some(IbanError::CountryPrefix);
    }
    let found = iban.chars().count();
    if found != IBAN_LENGTH {
        return Some(IbanError::Length { found });
    }
    Some(IbanError::Format)
}

/// Remainder of the rearranged, letter-expanded IBAN modulo 97, reduced digit by digit.
pub(crate) fn mod97_remainder(iban: &str) -> u32 {
    let split = iban.len().min(4);
    let rearranged = iban[split..].bytes().chain(iban[..split].bytes());

    let mut remainder: u32 = 0;
    for byte in rearranged {
        match byte {
            b'0'..=b'9' => {
                remainder = (remainder * 10 + u32::from(byte - b'0')) % 97;
            }
            b'A'..=b'Z' => {
                let value = u32::from(byte - b'A') + 10;
                remainder = (remainder * 10 + value / 10) % 97;
                remainder = (remainder * 10 + value % 10) % 97;
            }
            _ => {}
        }
    }
    remainder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_matches_reference_ibans() {
        assert_eq!(mod97_remainder("AE070331234567890123456"), 1);
        assert_eq!(mod97_remainder("GB82WEST12345698765432"), 1);
        assert_ne!(mod97_remainder("AE070331234567890123457"), 1);
    }

    #[test]
    fn format_groups_by_four() {
        assert_eq!(
            format_iban("ae070331234567890123456"),
            "AE07 0331 2345 6789 0123 456"
        );
    }

    #[test]
    fn unknown_bank_codes_resolve_to_sentinel() {
        assert_eq!(bank_name("033"), "Emirates NBD");
        assert_eq!(bank_name("999"), UNKNOWN_BANK);
    }
}

//! Legal Entity Identifier format checks (ISO 17442 shape only).
//!
//! Presence is not this module's concern: an absent LEI is format-valid, and the rule evaluator
//! decides separately whether one was required.

pub const LEI_LENGTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeiError {
    #[error("LEI must contain only alphanumeric characters")]
    Charset,
    #[error("LEI must be exactly 20 characters (got {found})")]
    Length { found: usize },
}

pub fn normalize_lei(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Character set is checked before length so punctuated input reports the charset problem.
pub fn validate_lei(raw: &str) -> Result<(), LeiError> {
    let lei = normalize_lei(raw);
    if lei.is_empty() {
        return Ok(());
    }

    if !lei.bytes().all(|byte| byte.is_ascii_alphanumeric()) {
        return Err(LeiError::Charset);
    }

    if lei.len() != LEI_LENGTH {
        return Err(LeiError::Length { found: lei.len() });
    }

    Ok(())
}

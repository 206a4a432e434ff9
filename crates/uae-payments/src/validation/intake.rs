use super::catalog::{CatalogQuery, MAX_PAGE_LIMIT};
use super::domain::{default_currency, TransactionRequest};

/// Input malformation detected before the rule engine runs. Never a rule outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestRejection {
    #[error("malformed request: {0}")]
    Malformed(String),
    #[error("purpose code '{value}' must be 2-5 uppercase letters or digits")]
    PurposeCodeFormat { value: String },
    #[error("currency '{value}' must be a three-letter ISO 4217 code")]
    Currency { value: String },
    #[error("remittance information exceeds {max} characters (found {found})")]
    RemittanceTooLong { max: usize, found: usize },
    #[error("additional_fields may hold at most {max} entries (found {found})")]
    TooManyAdditionalFields { max: usize, found: usize },
    #[error("additional_fields key '{key}' must be 1-{max} characters")]
    AdditionalFieldKey { key: String, max: usize },
    #[error("limit must be between 1 and {max} (found {found})")]
    PageLimit { max: usize, found: usize },
}

const PURPOSE_CODE_LENGTH: std::ops::RangeInclusive<usize> = 2..=5;

/// Bounds enforced on inbound requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeLimits {
    pub max_remittance_chars: usize,
    pub max_additional_fields: usize,
    pub max_additional_key_chars: usize,
}

impl Default for IntakeLimits {
    fn default() -> Self {
        Self {
            max_remittance_chars: 140,
            max_additional_fields: 32,
            max_additional_key_chars: 64,
        }
    }
}

/// Guard producing sanitized requests for the engine.
#[derive(Debug, Clone, Default)]
pub struct RequestGuard {
    limits: IntakeLimits,
}

impl RequestGuard {
    pub fn with_limits(limits: IntakeLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &IntakeLimits {
        &self.limits
    }

    /// Canonicalize the request: blank optionals become absent, codes are upper-cased.
    pub fn sanitize(
        &self,
        mut request: TransactionRequest,
    ) -> Result<TransactionRequest, RequestRejection> {
        request.purpose_code = match blank_to_none(request.purpose_code) {
            Some(raw) => Some(canonical_purpose_code(&raw)?),
            None => None,
        };

        let currency = request.currency.trim().to_ascii_uppercase();
        let currency = if currency.is_empty() {
            default_currency()
        } else {
            currency
        };
        if currency.len() != 3 || !currency.bytes().all(|byte| byte.is_ascii_alphabetic()) {
            return Err(RequestRejection::Currency {
                value: request.currency,
            });
        }
        request.currency = currency;

        request.debtor_iban = blank_to_none(request.debtor_iban);
        request.creditor_iban = blank_to_none(request.creditor_iban);
        request.debtor_lei = blank_to_none(request.debtor_lei);
        request.creditor_lei = blank_to_none(request.creditor_lei);
        request.remittance_info = blank_to_none(request.remittance_info);

        if let Some(remittance) = &request.remittance_info {
            let found = remittance.chars().count();
            if found > self.limits.max_remittance_chars {
                return Err(RequestRejection::RemittanceTooLong {
                    max: self.limits.max_remittance_chars,
                    found,
                });
            }
        }

        let found = request.additional_fields.len();
        if found > self.limits.max_additional_fields {
            return Err(RequestRejection::TooManyAdditionalFields {
                max: self.limits.max_additional_fields,
                found,
            });
        }
        let max = self.limits.max_additional_key_chars;
        if let Some(key) = request
            .additional_fields
            .keys()
            .find(|key| key.is_empty() || key.chars().count() > max)
        {
            return Err(RequestRejection::AdditionalFieldKey {
                key: key.clone(),
                max,
            });
        }

        Ok(request)
    }

    pub fn check_query(&self, query: &CatalogQuery) -> Result<(), RequestRejection> {
        if query.limit_in_range() {
            Ok(())
        } else {
            Err(RequestRejection::PageLimit {
                max: MAX_PAGE_LIMIT,
                found: query.effective_limit(),
            })
        }
    }
}

/// Trimmed, upper-cased purpose code, or a rejection when it cannot be a catalog key.
pub fn canonical_purpose_code(raw: &str) -> Result<String, RequestRejection> {
    let code = raw.trim().to_ascii_uppercase();
    let well_formed = PURPOSE_CODE_LENGTH.contains(&code.len())
        && code
            .bytes()
            .all(|byte| byte.is_ascii_uppercase() || byte.is_ascii_digit());
    if well_formed {
        Ok(code)
    } else {
        Err(RequestRejection::PurposeCodeFormat {
            value: raw.to_string(),
        })
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

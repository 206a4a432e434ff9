use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::catalog::{CatalogPage, CatalogQuery, PurposeCategory, PurposeCode, PurposeCodeRegistry};
use super::domain::TransactionRequest;
use super::evaluation::{RulebookConfig, ValidationEngine};
use super::iban::{validate_iban, IbanOutcome};
use super::intake::{canonical_purpose_code, RequestGuard, RequestRejection};
use super::response::{SessionStamp, ValidationResponse};

/// Service composing the intake guard, the rule engine and catalog lookups.
pub struct ValidationService {
    guard: Arc<RequestGuard>,
    engine: Arc<ValidationEngine>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_stamp() -> SessionStamp {
    let sequence = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionStamp::new(sequence, Utc::now())
}

impl ValidationService {
    pub fn new(registry: Arc<PurposeCodeRegistry>, config: RulebookConfig) -> Self {
        Self::with_guard(RequestGuard::default(), registry, config)
    }

    pub fn with_guard(
        guard: RequestGuard,
        registry: Arc<PurposeCodeRegistry>,
        config: RulebookConfig,
    ) -> Self {
        Self {
            guard: Arc::new(guard),
            engine: Arc::new(ValidationEngine::new(registry, config)),
        }
    }

    pub fn engine(&self) -> &ValidationEngine {
        &self.engine
    }

    pub fn registry(&self) -> &PurposeCodeRegistry {
        self.engine.registry()
    }

    /// Sanitize and evaluate one request. Rule failures are part of the `Ok` verdict.
    pub fn validate(
        &self,
        request: TransactionRequest,
    ) -> Result<ValidationResponse, ValidationServiceError> {
        let request = self.guard.sanitize(request).map_err(|rejection| {
            warn!(error = %rejection, "rejected validation request");
            rejection
        })?;

        let response = self.engine.validate(&request, next_session_stamp());
        info!(
            session_id = %response.session_id,
            transaction_type = request.transaction_type.label(),
            stp_score = response.stp_score,
            stp_rating = %response.stp_rating,
            violation_count = response.violation_count,
            "validated transaction"
        );

        Ok(response)
    }

    pub fn validate_iban(&self, raw: &str) -> IbanOutcome {
        validate_iban(raw)
    }

    pub fn list_codes(
        &self,
        query: &CatalogQuery,
    ) -> Result<CatalogPage<'_>, ValidationServiceError> {
        self.guard.check_query(query).map_err(|rejection| {
            warn!(error = %rejection, "rejected catalog query");
            rejection
        })?;
        Ok(self.registry().query(query))
    }

    pub fn categories(&self) -> &[PurposeCategory] {
        self.registry().categories()
    }

    /// Look up one code; input is trimmed and upper-cased first.
    pub fn purpose_code(&self, raw: &str) -> Result<&PurposeCode, ValidationServiceError> {
        let code = canonical_purpose_code(raw)
            .map_err(|_| ValidationServiceError::UnknownPurposeCode(raw.trim().to_string()))?;
        self.registry()
            .get(&code)
            .ok_or(ValidationServiceError::UnknownPurposeCode(code))
    }
}

/// Error raised by the validation service.
#[derive(Debug, thiserror::Error)]
pub enum ValidationServiceError {
    #[error(transparent)]
    Rejected(#[from] RequestRejection),
    #[error("purpose code {0} not found")]
    UnknownPurposeCode(String),
}

//! Payment instruction validation against the CBUAE purpose-code rulebook.
//!
//! Requests pass through the intake guard, then a fixed battery of rules evaluated against a
//! read-only [`PurposeCodeRegistry`]. The verdict carries every rule outcome, an STP score and
//! the remediation steps derived from the failures.

pub mod catalog;
pub mod domain;
pub mod evaluation;
pub mod iban;
pub(crate) mod intake;
pub mod lei;
pub mod response;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{
    CatalogError, CatalogPage, CatalogQuery, PurposeCategory, PurposeCode, PurposeCodeRegistry,
};
pub use domain::{
    ExtensionValue, FieldCode, Priority, Recommendation, RecommendationType, RuleCategory,
    Severity, StpRating, TransactionDirection, TransactionRequest, TransactionType,
    ValidationResult, ValidationStatus,
};
pub use evaluation::{Evaluation, RulebookConfig, StpAssessment, ValidationEngine};
pub use iban::{format_iban, normalize_iban, validate_iban, IbanError, IbanOutcome};
pub use intake::{IntakeLimits, RequestGuard, RequestRejection};
pub use lei::{validate_lei, LeiError};
pub use response::{SessionStamp, ValidationResponse, ValidationSummary, VerdictStatus};
pub use router::{validation_router, IbanValidationView};
pub use service::{ValidationService, ValidationServiceError};

use serde::Serialize;

use super::config::RulebookConfig;
use crate::validation::catalog::{PurposeCode, PurposeCodeRegistry};
use crate::validation::domain::TransactionRequest;
use crate::validation::iban::{validate_iban, IbanOutcome};

/// Values derived once per run and shared read-only by every rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleFacts<'a> {
    /// Registry entry for the supplied code, if the code is known.
    pub purpose_code: Option<&'a PurposeCode>,
    pub is_high_value: bool,
    pub lei_required: bool,
    /// Outcome for each supplied IBAN leg; the rule rows and response flags both read these.
    pub debtor_iban: Option<IbanOutcome>,
    pub creditor_iban: Option<IbanOutcome>,
}

impl<'a> RuleFacts<'a> {
    pub fn derive(
        request: &TransactionRequest,
        registry: &'a PurposeCodeRegistry,
        config: &RulebookConfig,
    ) -> Self {
        let purpose_code = request.purpose_code().and_then(|code| registry.get(code));
        let is_high_value = request
            .amount
            .map(|amount| amount >= config.high_value_threshold)
            .unwrap_or(false);
        let lei_required =
            is_high_value || purpose_code.map(|code| code.requires_lei).unwrap_or(false);

        Self {
            purpose_code,
            is_high_value,
            lei_required,
            debtor_iban: request.debtor_iban().map(validate_iban),
            creditor_iban: request.creditor_iban().map(validate_iban),
        }
    }
}

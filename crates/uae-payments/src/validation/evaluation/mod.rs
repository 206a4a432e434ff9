mod config;
mod facts;
mod recommendations;
mod rules;
mod scoring;

pub use config::RulebookConfig;
pub use facts::RuleFacts;
pub use scoring::{rating_for, StpAssessment, MAX_STP_SCORE};

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use super::catalog::PurposeCodeRegistry;
use super::domain::{Recommendation, TransactionRequest, ValidationResult};
use super::iban::IbanOutcome;
use super::response::{SessionStamp, ValidationResponse};

/// Stateless evaluator: one shared registry, one rulebook, any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    registry: Arc<PurposeCodeRegistry>,
    config: RulebookConfig,
}

impl ValidationEngine {
    pub fn new(registry: Arc<PurposeCodeRegistry>, config: RulebookConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &PurposeCodeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &RulebookConfig {
        &self.config
    }

    /// Run the rule battery and derive score and recommendations from the finished list.
    pub fn evaluate(&self, request: &TransactionRequest) -> Evaluation {
        let facts = RuleFacts::derive(request, &self.registry, &self.config);
        debug!(
            transaction_type = request.transaction_type.label(),
            purpose_code = request.purpose_code(),
            purpose_code_known = facts.purpose_code.is_some(),
            is_high_value = facts.is_high_value,
            lei_required = facts.lei_required,
            "derived rule facts"
        );

        let results = rules::evaluate_rules(request, &facts, &self.config);
        let assessment = StpAssessment::from_results(&results);
        let recommendations = recommendations::recommend(&results);

        Evaluation {
            purpose_code_valid: facts.purpose_code.is_some(),
            purpose_code_description: facts.purpose_code.map(|entry| entry.name.clone()),
            is_high_value: facts.is_high_value,
            lei_required: facts.lei_required,
            debtor_iban: facts.debtor_iban,
            creditor_iban: facts.creditor_iban,
            assessment,
            results,
            recommendations,
        }
    }

    /// Evaluate and assemble the full verdict, timing the run.
    pub fn validate(
        &self,
        request: &TransactionRequest,
        stamp: SessionStamp,
    ) -> ValidationResponse {
        let started = Instant::now();
        let evaluation = self.evaluate(request);
        let elapsed = started.elapsed();
        ValidationResponse::assemble(request, evaluation, stamp, elapsed)
    }
}

/// Engine output before response metadata is attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub results: Vec<ValidationResult>,
    pub recommendations: Vec<Recommendation>,
    pub assessment: StpAssessment,
    pub purpose_code_valid: bool,
    pub purpose_code_description: Option<String>,
    pub is_high_value: bool,
    pub lei_required: bool,
    pub debtor_iban: Option<IbanOutcome>,
    pub creditor_iban: Option<IbanOutcome>,
}

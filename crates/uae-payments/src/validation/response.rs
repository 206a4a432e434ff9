//! Verdict assembly: roll-ups, IBAN details and session metadata around an [`Evaluation`].

use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::{
    Recommendation, Severity, StpRating, TransactionDirection, TransactionRequest,
    TransactionType, ValidationResult, ValidationStatus,
};
use super::evaluation::Evaluation;
use super::iban::IbanOutcome;

/// Identity assigned to one validation run; opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStamp {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

impl SessionStamp {
    /// `val-<yyyymmddHHMMSS>-<sequence>` stamped at `created_at`.
    pub fn new(sequence: u64, created_at: DateTime<Utc>) -> Self {
        Self {
            session_id: format!("val-{}-{sequence:06}", created_at.format("%Y%m%d%H%M%S")),
            created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerdictStatus {
    Valid,
    Invalid,
}

/// Structured IBAN outcome for each supplied leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IbanDetails {
    pub debtor: Option<IbanOutcome>,
    pub creditor: Option<IbanOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationSummary {
    pub total_rules: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub errors: usize,
    pub uaefts_compliant: bool,
    pub amount: Option<Decimal>,
    pub is_high_value: bool,
    pub lei_required: bool,
    pub lei_provided: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResponse {
    pub session_id: String,
    pub transaction_type: TransactionType,
    pub transaction_direction: TransactionDirection,
    pub currency: String,
    pub purpose_code: Option<String>,
    pub purpose_code_valid: bool,
    pub purpose_code_description: Option<String>,
    pub debtor_iban_valid: bool,
    pub creditor_iban_valid: bool,
    pub iban_details: IbanDetails,
    pub lei_required: bool,
    pub lei_provided: bool,
    pub stp_score: u8,
    pub stp_rating: StpRating,
    pub violation_count: usize,
    pub total_penalty_risk: Decimal,
    pub validation_status: VerdictStatus,
    pub results: Vec<ValidationResult>,
    pub recommendations: Vec<Recommendation>,
    pub summary: ValidationSummary,
    pub processing_time_ms: f64,
    pub created_at: DateTime<Utc>,
}

impl ValidationResponse {
    pub fn assemble(
        request: &TransactionRequest,
        evaluation: Evaluation,
        stamp: SessionStamp,
        elapsed: Duration,
    ) -> Self {
        let results = evaluation.results;
        let violation_count = count_status(&results, ValidationStatus::Fail);
        let total_penalty_risk: Decimal = results
            .iter()
            .filter(|result| result.is_failure())
            .map(|result| result.penalty_amount)
            .sum();
        let compliant = violation_count == 0;
        let lei_provided = request.debtor_lei().is_some();

        // Absent legs are not violations here; their flags stay true.
        let debtor = evaluation.debtor_iban;
        let creditor = evaluation.creditor_iban;

        let summary = ValidationSummary {
            total_rules: results.len(),
            passed: count_status(&results, ValidationStatus::Pass),
            failed: violation_count,
            warnings: count_status(&results, ValidationStatus::Warning),
            errors: results
                .iter()
                .filter(|result| result.severity == Some(Severity::Error))
                .count(),
            uaefts_compliant: compliant,
            amount: request.amount,
            is_high_value: evaluation.is_high_value,
            lei_required: evaluation.lei_required,
            lei_provided,
        };

        Self {
            session_id: stamp.session_id,
            transaction_type: request.transaction_type,
            transaction_direction: request.transaction_direction,
            currency: request.currency.clone(),
            purpose_code: request.purpose_code().map(str::to_string),
            purpose_code_valid: evaluation.purpose_code_valid,
            purpose_code_description: evaluation.purpose_code_description,
            debtor_iban_valid: debtor.as_ref().map_or(true, |outcome| outcome.is_valid),
            creditor_iban_valid: creditor.as_ref().map_or(true, |outcome| outcome.is_valid),
            iban_details: IbanDetails { debtor, creditor },
            lei_required: evaluation.lei_required,
            lei_provided,
            stp_score: evaluation.assessment.score,
            stp_rating: evaluation.assessment.rating,
            violation_count,
            total_penalty_risk,
            validation_status: if compliant {
                VerdictStatus::Valid
            } else {
                VerdictStatus::Invalid
            },
            results,
            recommendations: evaluation.recommendations,
            summary,
            processing_time_ms: elapsed.as_secs_f64() * 1_000.0,
            created_at: stamp.created_at,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validation_status == VerdictStatus::Valid
    }
}

fn count_status(results: &[ValidationResult], status: ValidationStatus) -> usize {
    results
        .iter()
        .filter(|result| result.validation_status == status)
        .count()
}

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Settlement scope of a payment instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Domestic,
    Offshore,
}

impl TransactionType {
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Domestic => "domestic",
            TransactionType::Offshore => "offshore",
        }
    }
}

/// Flow of funds relative to the UAE account holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionDirection {
    Inbound,
    Outbound,
}

impl TransactionDirection {
    pub fn label(self) -> &'static str {
        match self {
            TransactionDirection::Inbound => "inbound",
            TransactionDirection::Outbound => "outbound",
        }
    }
}

/// Value accepted in the open-ended `additional_fields` bag.
///
/// No rule reads the bag, so nulls and nested documents are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtensionValue {
    Null,
    Flag(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    Structured(serde_json::Value),
}

/// Payment instruction submitted for validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub transaction_type: TransactionType,
    pub transaction_direction: TransactionDirection,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub purpose_code: Option<String>,
    #[serde(default)]
    pub debtor_iban: Option<String>,
    #[serde(default)]
    pub creditor_iban: Option<String>,
    #[serde(default)]
    pub debtor_lei: Option<String>,
    #[serde(default)]
    pub creditor_lei: Option<String>,
    #[serde(default)]
    pub remittance_info: Option<String>,
    #[serde(default)]
    pub additional_fields: BTreeMap<String, ExtensionValue>,
}

pub(crate) fn default_currency() -> String {
    "AED".to_string()
}

impl TransactionRequest {
    /// Minimal request used by builders and tests; every optional field is absent.
    pub fn new(
        transaction_type: TransactionType,
        transaction_direction: TransactionDirection,
        amount: Decimal,
    ) -> Self {
        Self {
            transaction_type,
            transaction_direction,
            amount: Some(amount),
            currency: default_currency(),
            purpose_code: None,
            debtor_iban: None,
            creditor_iban: None,
            debtor_lei: None,
            creditor_lei: None,
            remittance_info: None,
            additional_fields: BTreeMap::new(),
        }
    }

    pub fn purpose_code(&self) -> Option<&str> {
        present(&self.purpose_code)
    }

    pub fn debtor_iban(&self) -> Option<&str> {
        present(&self.debtor_iban)
    }

    pub fn creditor_iban(&self) -> Option<&str> {
        present(&self.creditor_iban)
    }

    pub fn debtor_lei(&self) -> Option<&str> {
        present(&self.debtor_lei)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|raw| !raw.trim().is_empty())
}

/// Request field a rule outcome is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCode {
    PurposeCode,
    Amount,
    DebtorLei,
    DebtorIban,
    CreditorIban,
}

impl FieldCode {
    pub fn label(self) -> &'static str {
        match self {
            FieldCode::PurposeCode => "purpose_code",
            FieldCode::Amount => "amount",
            FieldCode::DebtorLei => "debtor_lei",
            FieldCode::DebtorIban => "debtor_iban",
            FieldCode::CreditorIban => "creditor_iban",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    PurposeCode,
    Amount,
    Lei,
    Iban,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Pass,
    Fail,
    Warning,
    /// Reserved for disabled rules; none of the current checks emit it.
    Skipped,
}

impl ValidationStatus {
    pub fn label(self) -> &'static str {
        match self {
            ValidationStatus::Pass => "pass",
            ValidationStatus::Fail => "fail",
            ValidationStatus::Warning => "warning",
            ValidationStatus::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Outcome of one executed rule. Never mutated after the evaluator appends it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub rule_code: &'static str,
    pub rule_name: &'static str,
    pub rule_category: RuleCategory,
    pub field_code: FieldCode,
    pub field_value: Option<String>,
    pub validation_status: ValidationStatus,
    pub is_valid: bool,
    pub error_code: Option<&'static str>,
    pub error_message: Option<String>,
    pub regulatory_reference: &'static str,
    pub remediation_suggestion: Option<&'static str>,
    pub severity: Option<Severity>,
    pub stp_impact: u32,
    pub penalty_amount: Decimal,
}

impl ValidationResult {
    pub fn is_failure(&self) -> bool {
        self.validation_status == ValidationStatus::Fail
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationType {
    MissingField,
    MissingLei,
}

/// Remediation step derived from a failed rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub recommendation_type: RecommendationType,
    pub field_code: FieldCode,
    pub priority: Priority,
    pub current_value: Option<String>,
    pub suggested_value: Option<&'static str>,
    pub reason: &'static str,
    pub stp_improvement: u32,
    pub penalty_avoided: Decimal,
}

/// Discrete bucket for the STP score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StpRating {
    High,
    Medium,
    Low,
}

impl StpRating {
    pub fn label(self) -> &'static str {
        match self {
            StpRating::High => "high",
            StpRating::Medium => "medium",
            StpRating::Low => "low",
        }
    }
}

impl fmt::Display for StpRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

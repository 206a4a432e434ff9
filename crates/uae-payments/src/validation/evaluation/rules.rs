//! The fixed rule battery. Each check reads the request and the shared facts and returns at most
//! one row; checks that do not apply return `None` rather than a `skipped` row.

use rust_decimal::Decimal;

use super::config::RulebookConfig;
use super::facts::RuleFacts;
use crate::validation::domain::{
    FieldCode, RuleCategory, Severity, TransactionRequest, TransactionType, ValidationResult,
    ValidationStatus,
};
use crate::validation::iban::IbanOutcome;
use crate::validation::lei::validate_lei;

pub(crate) const IMPACT_MISSING_PURPOSE_CODE: u32 = 30;
pub(crate) const IMPACT_INVALID_PURPOSE_CODE: u32 = 25;
pub(crate) const IMPACT_DOMESTIC_PURPOSE_CODE: u32 = 5;
pub(crate) const IMPACT_INVALID_AMOUNT: u32 = 20;
pub(crate) const IMPACT_MISSING_LEI: u32 = 15;
pub(crate) const IMPACT_INVALID_LEI: u32 = 10;
pub(crate) const IMPACT_INVALID_IBAN: u32 = 20;

pub(crate) const PENALTY_VIOLATION: u32 = 1_000;
pub(crate) const PENALTY_FORMAT: u32 = 500;

/// Static identity of a rule row.
struct Rule {
    code: &'static str,
    name: &'static str,
    category: RuleCategory,
    field: FieldCode,
    reference: &'static str,
}

pub(crate) const PURPOSE_CODE_REQUIRED: &str = "PPC001";
pub(crate) const LEI_REQUIRED: &str = "LEI001";

const PPC_REQUIRED: Rule = Rule {
    code: PURPOSE_CODE_REQUIRED,
    name: "Purpose Code Required",
    category: RuleCategory::PurposeCode,
    field: FieldCode::PurposeCode,
    reference: "AUX700-3.1",
};
const PPC_ACCEPTED: Rule = Rule {
    name: "Purpose Code Valid",
    ..PPC_REQUIRED
};
const PPC_KNOWN: Rule = Rule {
    code: "PPC002",
    name: "Purpose Code Valid",
    reference: "AUX700-3.2",
    ..PPC_REQUIRED
};
const PPC_OFFSHORE: Rule = Rule {
    code: "PPC003",
    name: "Purpose Code Applicability",
    reference: "AUX700-3.3",
    ..PPC_REQUIRED
};
const PPC_DOMESTIC: Rule = Rule {
    code: "PPC004",
    ..PPC_OFFSHORE
};
const AMT_REQUIRED: Rule = Rule {
    code: "AMT001",
    name: "Amount Required",
    category: RuleCategory::Amount,
    field: FieldCode::Amount,
    reference: "AUX700-4.1",
};
const AMT_ACCEPTED: Rule = Rule {
    name: "Amount Valid",
    ..AMT_REQUIRED
};
const LEI_PRESENT: Rule = Rule {
    code: LEI_REQUIRED,
    name: "LEI Required",
    category: RuleCategory::Lei,
    field: FieldCode::DebtorLei,
    reference: "AUX700-5.1",
};
const LEI_FORMAT: Rule = Rule {
    code: "LEI002",
    name: "LEI Format Valid",
    reference: "AUX700-5.2",
    ..LEI_PRESENT
};
const IBAN_DEBTOR: Rule = Rule {
    code: "IBAN001",
    name: "Debtor IBAN Valid",
    category: RuleCategory::Iban,
    field: FieldCode::DebtorIban,
    reference: "AUX700-6.1",
};
const IBAN_CREDITOR: Rule = Rule {
    code: "IBAN002",
    name: "Creditor IBAN Valid",
    field: FieldCode::CreditorIban,
    reference: "AUX700-6.2",
    ..IBAN_DEBTOR
};

/// Failure details attached to a non-pass row.
struct Violation {
    error_code: &'static str,
    message: String,
    remediation: &'static str,
    severity: Severity,
    impact: u32,
    penalty: u32,
}

impl Rule {
    fn pass(&self, value: Option<String>) -> ValidationResult {
        ValidationResult {
            rule_code: self.code,
            rule_name: self.name,
            rule_category: self.category,
            field_code: self.field,
            field_value: value,
            validation_status: ValidationStatus::Pass,
            is_valid: true,
            error_code: None,
            error_message: None,
            regulatory_reference: self.reference,
            remediation_suggestion: None,
            severity: None,
            stp_impact: 0,
            penalty_amount: Decimal::ZERO,
        }
    }

    fn flag(
        &self,
        status: ValidationStatus,
        value: Option<String>,
        violation: Violation,
    ) -> ValidationResult {
        ValidationResult {
            rule_code: self.code,
            rule_name: self.name,
            rule_category: self.category,
            field_code: self.field,
            field_value: value,
            validation_status: status,
            is_valid: false,
            error_code: Some(violation.error_code),
            error_message: Some(violation.message),
            regulatory_reference: self.reference,
            remediation_suggestion: Some(violation.remediation),
            severity: Some(violation.severity),
            stp_impact: violation.impact,
            penalty_amount: Decimal::from(violation.penalty),
        }
    }

    fn fail(&self, value: Option<String>, violation: Violation) -> ValidationResult {
        self.flag(ValidationStatus::Fail, value, violation)
    }

    fn warn(&self, value: Option<String>, violation: Violation) -> ValidationResult {
        self.flag(ValidationStatus::Warning, value, violation)
    }
}

/// Run every applicable rule in contract order.
pub(crate) fn evaluate_rules(
    request: &TransactionRequest,
    facts: &RuleFacts<'_>,
    config: &RulebookConfig,
) -> Vec<ValidationResult> {
    let mut results = Vec::with_capacity(5);
    results.extend(check_purpose_code(request, facts));
    results.push(check_amount(request));
    results.extend(check_lei(request, facts, config));
    results.extend(check_debtor_iban(request, facts));
    results.extend(check_creditor_iban(request, facts));
    results
}

pub(crate) fn check_purpose_code(
    request: &TransactionRequest,
    facts: &RuleFacts<'_>,
) -> Option<ValidationResult> {
    let supplied = request.purpose_code();
    let value = supplied.map(str::to_string);

    match request.transaction_type {
        TransactionType::Offshore => {
            let Some(code) = supplied else {
                return Some(PPC_REQUIRED.fail(
                    None,
                    Violation {
                        error_code: "MISSING_PURPOSE_CODE",
                        message: "Purpose code is mandatory for offshore transactions".to_string(),
                        remediation: "Select an appropriate purpose code from the catalog",
                        severity: Severity::Error,
                        impact: IMPACT_MISSING_PURPOSE_CODE,
                        penalty: PENALTY_VIOLATION,
                    },
                ));
            };

            let result = match facts.purpose_code {
                None => PPC_KNOWN.fail(
                    value,
                    Violation {
                        error_code: "INVALID_PURPOSE_CODE",
                        message: format!("Unknown purpose code: {code}"),
                        remediation: "Select a valid CBUAE purpose code",
                        severity: Severity::Error,
                        impact: IMPACT_INVALID_PURPOSE_CODE,
                        penalty: PENALTY_VIOLATION,
                    },
                ),
                Some(entry) if !entry.applies_to_offshore => PPC_OFFSHORE.fail(
                    value,
                    Violation {
                        error_code: "CODE_NOT_FOR_OFFSHORE",
                        message: format!("Code {code} is not valid for offshore transactions"),
                        remediation:
                            "Select a code that applies to offshore/cross-border transactions",
                        severity: Severity::Error,
                        impact: IMPACT_INVALID_PURPOSE_CODE,
                        penalty: PENALTY_VIOLATION,
                    },
                ),
                Some(_) => PPC_ACCEPTED.pass(value),
            };
            Some(result)
        }
        // Domestic payments are never blocked on code choice; only a known non-domestic code
        // is worth a warning.
        TransactionType::Domestic => match facts.purpose_code {
            Some(entry) if !entry.applies_to_domestic => Some(PPC_DOMESTIC.warn(
                value,
                Violation {
                    error_code: "CODE_NOT_FOR_DOMESTIC",
                    message: format!(
                        "Code {} is typically used for offshore transactions",
                        entry.code
                    ),
                    remediation: "Consider using a domestic-appropriate code like OAT",
                    severity: Severity::Warning,
                    impact: IMPACT_DOMESTIC_PURPOSE_CODE,
                    penalty: 0,
                },
            )),
            _ => None,
        },
    }
}

pub(crate) fn check_amount(request: &TransactionRequest) -> ValidationResult {
    match request.amount {
        Some(amount) if amount > Decimal::ZERO => AMT_ACCEPTED.pass(Some(amount.to_string())),
        other => AMT_REQUIRED.fail(
            Some(other.unwrap_or(Decimal::ZERO).to_string()),
            Violation {
                error_code: "INVALID_AMOUNT",
                message: "Transaction amount must be greater than zero".to_string(),
                remediation: "Enter a valid transaction amount",
                severity: Severity::Error,
                impact: IMPACT_INVALID_AMOUNT,
                penalty: 0,
            },
        ),
    }
}

pub(crate) fn check_lei(
    request: &TransactionRequest,
    facts: &RuleFacts<'_>,
    config: &RulebookConfig,
) -> Option<ValidationResult> {
    match request.debtor_lei() {
        None if facts.lei_required => {
            let message = if facts.is_high_value {
                format!(
                    "LEI is required for transactions >= AED {}",
                    group_thousands(config.high_value_threshold)
                )
            } else {
                format!(
                    "LEI is required for purpose code {}",
                    request.purpose_code().unwrap_or_default()
                )
            };
            Some(LEI_PRESENT.fail(
                None,
                Violation {
                    error_code: "MISSING_LEI",
                    message,
                    remediation: "Provide the 20-character Legal Entity Identifier",
                    severity: Severity::Error,
                    impact: IMPACT_MISSING_LEI,
                    penalty: PENALTY_VIOLATION,
                },
            ))
        }
        None => None,
        Some(lei) => {
            let value = Some(lei.to_string());
            let result = match validate_lei(lei) {
                Ok(()) => LEI_FORMAT.pass(value),
                Err(error) => LEI_FORMAT.fail(
                    value,
                    Violation {
                        error_code: "INVALID_LEI_FORMAT",
                        message: error.to_string(),
                        remediation: "Provide a valid 20-character alphanumeric LEI",
                        severity: Severity::Error,
                        impact: IMPACT_INVALID_LEI,
                        penalty: PENALTY_FORMAT,
                    },
                ),
            };
            Some(result)
        }
    }
}

fn check_iban(
    rule: &Rule,
    supplied: Option<&str>,
    outcome: Option<&IbanOutcome>,
) -> Option<ValidationResult> {
    let (raw, outcome) = supplied.zip(outcome)?;
    let value = Some(raw.to_string());

    let result = if outcome.is_valid {
        rule.pass(value)
    } else {
        rule.fail(
            value,
            Violation {
                error_code: "INVALID_IBAN",
                message: outcome
                    .error_message()
                    .unwrap_or_else(|| "Invalid IBAN format".to_string()),
                remediation: "Enter a valid UAE IBAN (AE + 21 digits)",
                severity: Severity::Error,
                impact: IMPACT_INVALID_IBAN,
                penalty: PENALTY_FORMAT,
            },
        )
    };
    Some(result)
}

pub(crate) fn check_debtor_iban(
    request: &TransactionRequest,
    facts: &RuleFacts<'_>,
) -> Option<ValidationResult> {
    check_iban(&IBAN_DEBTOR, request.debtor_iban(), facts.debtor_iban.as_ref())
}

pub(crate) fn check_creditor_iban(
    request: &TransactionRequest,
    facts: &RuleFacts<'_>,
) -> Option<ValidationResult> {
    check_iban(&IBAN_CREDITOR, request.creditor_iban(), facts.creditor_iban.as_ref())
}

/// `1000000.5` → `1,000,000.5`
fn group_thousands(value: Decimal) -> String {
    let rendered = value.normalize().to_string();
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (position, digit) in integer.chars().enumerate() {
        if position > 0 && (integer.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

use super::rules::{LEI_REQUIRED, PURPOSE_CODE_REQUIRED};
use crate::validation::domain::{
    Priority, Recommendation, RecommendationType, ValidationResult, ValidationStatus,
};

const PURPOSE_CODE_SUGGESTION: &str = "FAM (for family remittances) or appropriate code";
const PURPOSE_CODE_REASON: &str =
    "Purpose code is required for offshore transactions per CBUAE regulations";
const LEI_REASON: &str = "LEI is mandatory for high-value transactions and certain purpose codes";

/// One recommendation per missing purpose code and per missing LEI, in result order. The gain
/// and penalty figures mirror the triggering row.
pub(crate) fn recommend(results: &[ValidationResult]) -> Vec<Recommendation> {
    results
        .iter()
        .filter(|result| result.validation_status == ValidationStatus::Fail)
        .filter_map(|result| match result.rule_code {
            PURPOSE_CODE_REQUIRED => Some(Recommendation {
                recommendation_type: RecommendationType::MissingField,
                field_code: result.field_code,
                priority: Priority::High,
                current_value: result.field_value.clone(),
                suggested_value: Some(PURPOSE_CODE_SUGGESTION),
                reason: PURPOSE_CODE_REASON,
                stp_improvement: result.stp_impact,
                penalty_avoided: result.penalty_amount,
            }),
            LEI_REQUIRED => Some(Recommendation {
                recommendation_type: RecommendationType::MissingLei,
                field_code: result.field_code,
                priority: Priority::High,
                current_value: result.field_value.clone(),
                suggested_value: None,
                reason: LEI_REASON,
                stp_improvement: result.stp_impact,
                penalty_avoided: result.penalty_amount,
            }),
            _ => None,
        })
        .collect()
}

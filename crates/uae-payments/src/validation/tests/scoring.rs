use super::common::*;
use crate::validation::domain::{StpRating, ValidationResult};
use crate::validation::evaluation::{rating_for, StpAssessment, MAX_STP_SCORE};

fn heavy_results() -> Vec<ValidationResult> {
    let mut request = with_code(offshore(0), "ZZZ");
    request.debtor_lei = Some("ABC".to_string());
    request.debtor_iban = Some("GB82WEST12345698765432".to_string());
    request.creditor_iban = Some("AE07".to_string());
    engine().evaluate(&request).results
}

#[test]
fn empty_result_list_scores_maximum() {
    let assessment = StpAssessment::from_results(&[]);
    assert_eq!(assessment.score, MAX_STP_SCORE);
    assert_eq!(assessment.rating, StpRating::High);
}

#[test]
fn score_is_clamped_at_zero() {
    let mut results = heavy_results();
    let doubled = results.clone();
    results.extend(doubled);

    let assessment = StpAssessment::from_results(&results);

    assert_eq!(assessment.score, 0);
    assert_eq!(assessment.rating, StpRating::Low);
}

#[test]
fn scoring_is_idempotent() {
    let results = heavy_results();
    assert_eq!(
        StpAssessment::from_results(&results),
        StpAssessment::from_results(&results)
    );
    assert_eq!(StpAssessment::from_results(&results).score, 5);
}

#[test]
fn rating_boundaries() {
    assert_eq!(rating_for(100), StpRating::High);
    assert_eq!(rating_for(90), StpRating::High);
    assert_eq!(rating_for(89), StpRating::Medium);
    assert_eq!(rating_for(70), StpRating::Medium);
    assert_eq!(rating_for(69), StpRating::Low);
    assert_eq!(rating_for(0), StpRating::Low);
}

use serde::Serialize;

use crate::validation::domain::{StpRating, ValidationResult};

pub const MAX_STP_SCORE: u8 = 100;
const HIGH_RATING_FLOOR: u8 = 90;
const MEDIUM_RATING_FLOOR: u8 = 70;

/// Straight-through-processing estimate derived from a finished result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StpAssessment {
    pub score: u8,
    pub rating: StpRating,
}

impl StpAssessment {
    /// `clamp(100 - sum(impact), 0, 100)`; depends on nothing but the list.
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let impact: u64 = results
            .iter()
            .map(|result| u64::from(result.stp_impact))
            .sum();
        let score = u64::from(MAX_STP_SCORE).saturating_sub(impact) as u8;

        Self {
            score,
            rating: rating_for(score),
        }
    }
}

pub fn rating_for(score: u8) -> StpRating {
    if score >= HIGH_RATING_FLOOR {
        StpRating::High
    } else if score >= MEDIUM_RATING_FLOOR {
        StpRating::Medium
    } else {
        StpRating::Low
    }
}

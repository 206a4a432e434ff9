use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Jurisdiction parameters for the rulebook. Rule weights are fixed and live with the rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulebookConfig {
    /// Amounts at or above this value are high-value and always require a debtor LEI.
    pub high_value_threshold: Decimal,
}

impl Default for RulebookConfig {
    fn default() -> Self {
        Self {
            high_value_threshold: Decimal::from(1_000_000u32),
        }
    }
}

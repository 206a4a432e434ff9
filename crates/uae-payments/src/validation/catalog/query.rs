use serde::{Deserialize, Serialize};

use super::{PurposeCategory, PurposeCode, PurposeCodeRegistry};
use crate::validation::domain::{TransactionDirection, TransactionType};

pub const MAX_PAGE_LIMIT: usize = 200;
const DEFAULT_PAGE_LIMIT: usize = 100;

/// Filters for browsing the catalog. Every filter is optional and they combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub direction: Option<TransactionDirection>,
    pub search: Option<String>,
    pub requires_lei: Option<bool>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl CatalogQuery {
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT)
    }

    pub fn limit_in_range(&self) -> bool {
        (1..=MAX_PAGE_LIMIT).contains(&self.effective_limit())
    }

    fn matches(&self, code: &PurposeCode) -> bool {
        if let Some(category) = &self.category {
            if !code.category_code.eq_ignore_ascii_case(category.trim()) {
                return false;
            }
        }
        if let Some(transaction_type) = self.transaction_type {
            if !code.applies_to_type(transaction_type) {
                return false;
            }
        }
        if let Some(direction) = self.direction {
            if !code.applies_to_direction(direction) {
                return false;
            }
        }
        if let Some(requires_lei) = self.requires_lei {
            if code.requires_lei != requires_lei {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                code.code.to_lowercase().contains(&needle)
                    || code.name.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }
}

/// One page of a filtered catalog listing.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage<'a> {
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub codes: Vec<&'a PurposeCode>,
    pub categories: &'a [PurposeCategory],
}

impl PurposeCodeRegistry {
    /// Filter and paginate; `total` counts matches before pagination. The limit is clamped here,
    /// range errors are reported by the intake layer.
    pub fn query(&self, query: &CatalogQuery) -> CatalogPage<'_> {
        let limit = query.effective_limit().clamp(1, MAX_PAGE_LIMIT);
        let offset = query.offset.unwrap_or(0);

        let matching: Vec<&PurposeCode> = self
            .codes()
            .iter()
            .filter(|code| query.matches(code))
            .collect();
        let total = matching.len();
        let codes = matching.into_iter().skip(offset).take(limit).collect();

        CatalogPage {
            total,
            offset,
            limit,
            codes,
            categories: self.categories(),
        }
    }
}

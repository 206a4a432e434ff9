//! Read-only purpose-code registry.
//!
//! The registry is built once (from the embedded CSV tables or operator-supplied files) and
//! shared behind an `Arc`; nothing mutates it after construction.

mod loader;
mod query;

pub use query::{CatalogPage, CatalogQuery, MAX_PAGE_LIMIT};

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::{TransactionDirection, TransactionType};

const EMBEDDED_PURPOSE_CODES: &str = include_str!("../../../data/purpose_codes.csv");
const EMBEDDED_CATEGORIES: &str = include_str!("../../../data/categories.csv");

/// One regulator-defined payment purpose.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurposeCode {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category_code: String,
    pub category_name: String,
    pub applies_to_domestic: bool,
    pub applies_to_offshore: bool,
    pub applies_to_inbound: bool,
    pub applies_to_outbound: bool,
    pub requires_lei: bool,
    pub lei_threshold: Option<Decimal>,
    pub requires_supporting_docs: bool,
    pub iso_20022_code: Option<String>,
    pub imf_bop_code: Option<String>,
    pub regulatory_reference: Option<String>,
    pub effective_from: Option<NaiveDate>,
    pub is_active: bool,
}

impl PurposeCode {
    pub fn applies_to_type(&self, transaction_type: TransactionType) -> bool {
        match transaction_type {
            TransactionType::Domestic => self.applies_to_domestic,
            TransactionType::Offshore => self.applies_to_offshore,
        }
    }

    pub fn applies_to_direction(&self, direction: TransactionDirection) -> bool {
        match direction {
            TransactionDirection::Inbound => self.applies_to_inbound,
            TransactionDirection::Outbound => self.applies_to_outbound,
        }
    }
}

/// Grouping of purpose codes as published by the regulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurposeCategory {
    pub category_code: String,
    pub category_name: String,
    pub description: Option<String>,
    pub is_cross_border_only: bool,
    pub code_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read reference data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid reference data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid value '{value}' for column {column} of purpose code {code}")]
    InvalidValue {
        code: String,
        column: &'static str,
        value: String,
    },
    #[error("purpose code {0} is defined more than once")]
    DuplicateCode(String),
    #[error("category {0} is defined more than once")]
    DuplicateCategory(String),
    #[error("purpose code {code} references unknown category {category}")]
    UnknownCategory { code: String, category: String },
    #[error("purpose code catalog is empty")]
    Empty,
}

#[derive(Debug, Clone)]
pub struct PurposeCodeRegistry {
    codes: Vec<PurposeCode>,
    index: HashMap<String, usize>,
    categories: Vec<PurposeCategory>,
}

impl PurposeCodeRegistry {
    /// Registry backed by the tables compiled into the crate.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_readers(
            EMBEDDED_PURPOSE_CODES.as_bytes(),
            EMBEDDED_CATEGORIES.as_bytes(),
        )
    }

    /// Registry from operator-supplied CSV files; either path may fall back to the embedded table.
    pub fn from_paths(
        purpose_codes: Option<&Path>,
        categories: Option<&Path>,
    ) -> Result<Self, CatalogError> {
        let codes: Box<dyn Read> = match purpose_codes {
            Some(path) => Box::new(std::fs::File::open(path)?),
            None => Box::new(EMBEDDED_PURPOSE_CODES.as_bytes()),
        };
        let categories: Box<dyn Read> = match categories {
            Some(path) => Box::new(std::fs::File::open(path)?),
            None => Box::new(EMBEDDED_CATEGORIES.as_bytes()),
        };
        Self::from_readers(codes, categories)
    }

    pub fn from_readers<C: Read, K: Read>(codes: C, categories: K) -> Result<Self, CatalogError> {
        let categories = loader::parse_categories(categories)?;
        let codes = loader::parse_purpose_codes(codes, &categories)?;
        Self::new(codes, categories)
    }

    /// Build from in-memory entries, enforcing uniqueness and category integrity.
    pub fn new(
        codes: Vec<PurposeCode>,
        categories: Vec<PurposeCategory>,
    ) -> Result<Self, CatalogError> {
        if codes.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for category in &categories {
            if counts.insert(category.category_code.clone(), 0).is_some() {
                return Err(CatalogError::DuplicateCategory(
                    category.category_code.clone(),
                ));
            }
        }

        let mut index = HashMap::with_capacity(codes.len());
        for (position, code) in codes.iter().enumerate() {
            if index.insert(code.code.clone(), position).is_some() {
                return Err(CatalogError::DuplicateCode(code.code.clone()));
            }
            match counts.get_mut(&code.category_code) {
                Some(count) => *count += 1,
                None => {
                    return Err(CatalogError::UnknownCategory {
                        code: code.code.clone(),
                        category: code.category_code.clone(),
                    })
                }
            }
        }

        let categories = categories
            .into_iter()
            .map(|category| PurposeCategory {
                code_count: counts
                    .get(&category.category_code)
                    .copied()
                    .unwrap_or_default(),
                ..category
            })
            .collect();

        Ok(Self {
            codes,
            index,
            categories,
        })
    }

    /// Exact, case-sensitive lookup; callers upper-case codes at intake.
    pub fn get(&self, code: &str) -> Option<&PurposeCode> {
        self.index.get(code).map(|&position| &self.codes[position])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn applies_to_type(&self, code: &str, transaction_type: TransactionType) -> Option<bool> {
        self.get(code)
            .map(|entry| entry.applies_to_type(transaction_type))
    }

    pub fn applies_to_direction(
        &self,
        code: &str,
        direction: TransactionDirection,
    ) -> Option<bool> {
        self.get(code)
            .map(|entry| entry.applies_to_direction(direction))
    }

    /// `(requires_lei, lei_threshold)` for a known code.
    pub fn lei_requirement(&self, code: &str) -> Option<(bool, Option<Decimal>)> {
        self.get(code)
            .map(|entry| (entry.requires_lei, entry.lei_threshold))
    }

    pub fn codes(&self) -> &[PurposeCode] {
        &self.codes
    }

    pub fn categories(&self) -> &[PurposeCategory] {
        &self.categories
    }

    pub fn codes_in<'a>(&'a self, category_code: &'a str) -> impl Iterator<Item = &'a PurposeCode> {
        self.codes
            .iter()
            .filter(move |entry| entry.category_code == category_code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

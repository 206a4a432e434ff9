use std::io::Read;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use super::{CatalogError, PurposeCategory, PurposeCode};

pub(super) fn parse_categories<R: Read>(reader: R) -> Result<Vec<PurposeCategory>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut categories = Vec::new();

    for record in csv_reader.deserialize::<CategoryRow>() {
        let row = record?;
        categories.push(PurposeCategory {
            category_code: row.category_code.to_ascii_uppercase(),
            category_name: row.category_name,
            description: row.description,
            is_cross_border_only: row.is_cross_border_only,
            code_count: 0,
        });
    }

    Ok(categories)
}

pub(super) fn parse_purpose_codes<R: Read>(
    reader: R,
    categories: &[PurposeCategory],
) -> Result<Vec<PurposeCode>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut codes = Vec::new();

    for record in csv_reader.deserialize::<PurposeCodeRow>() {
        let row = record?;
        codes.push(row.into_purpose_code(categories)?);
    }

    Ok(codes)
}

#[derive(Debug, Deserialize)]
struct CategoryRow {
    category_code: String,
    category_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(default)]
    is_cross_border_only: bool,
}

#[derive(Debug, Deserialize)]
struct PurposeCodeRow {
    code: String,
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    category_code: String,
    applies_to_domestic: bool,
    applies_to_offshore: bool,
    #[serde(default = "default_true")]
    applies_to_inbound: bool,
    #[serde(default = "default_true")]
    applies_to_outbound: bool,
    #[serde(default)]
    requires_lei: bool,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    lei_threshold: Option<String>,
    #[serde(default)]
    requires_supporting_docs: bool,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    iso_20022_code: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    imf_bop_code: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    regulatory_reference: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    effective_from: Option<String>,
    #[serde(default = "default_true")]
    is_active: bool,
}

impl PurposeCodeRow {
    fn into_purpose_code(
        self,
        categories: &[PurposeCategory],
    ) -> Result<PurposeCode, CatalogError> {
        let code = self.code.to_ascii_uppercase();
        let category_code = self.category_code.to_ascii_uppercase();

        let lei_threshold = match self.lei_threshold {
            Some(raw) => Some(Decimal::from_str(&raw).map_err(|_| CatalogError::InvalidValue {
                code: code.clone(),
                column: "lei_threshold",
                value: raw.clone(),
            })?),
            None => None,
        };

        let effective_from = match self.effective_from {
            Some(raw) => Some(NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                CatalogError::InvalidValue {
                    code: code.clone(),
                    column: "effective_from",
                    value: raw.clone(),
                }
            })?),
            None => None,
        };

        // Unknown categories are reported by the registry, which sees the whole table.
        let category_name = categories
            .iter()
            .find(|category| category.category_code == category_code)
            .map(|category| category.category_name.clone())
            .unwrap_or_default();

        Ok(PurposeCode {
            code,
            name: self.name,
            description: self.description,
            category_code,
            category_name,
            applies_to_domestic: self.applies_to_domestic,
            applies_to_offshore: self.applies_to_offshore,
            applies_to_inbound: self.applies_to_inbound,
            applies_to_outbound: self.applies_to_outbound,
            requires_lei: self.requires_lei,
            lei_threshold,
            requires_supporting_docs: self.requires_supporting_docs,
            iso_20022_code: self.iso_20022_code,
            imf_bop_code: self.imf_bop_code,
            regulatory_reference: self.regulatory_reference,
            effective_from,
            is_active: self.is_active,
        })
    }
}

fn default_true() -> bool {
    true
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATEGORIES: &str = "category_code,category_name,description,is_cross_border_only\n\
                              SAL,Salary & Employment,,false\n";

    #[test]
    fn optional_columns_fall_back_to_defaults() {
        let categories = parse_categories(CATEGORIES.as_bytes()).expect("categories parse");
        let csv = "code,name,category_code,applies_to_domestic,applies_to_offshore\n\
                   sal,Salary Payment,sal,true,true\n";

        let codes = parse_purpose_codes(csv.as_bytes(), &categories).expect("codes parse");

        assert_eq!(codes.len(), 1);
        let sal = &codes[0];
        assert_eq!(sal.code, "SAL");
        assert_eq!(sal.category_name, "Salary & Employment");
        assert!(sal.applies_to_inbound && sal.applies_to_outbound && sal.is_active);
        assert!(!sal.requires_lei);
        assert!(sal.lei_threshold.is_none());
        assert!(categories[0].description.is_none());
    }

    #[test]
    fn malformed_threshold_is_reported_with_context() {
        let categories = parse_categories(CATEGORIES.as_bytes()).expect("categories parse");
        let csv = "code,name,category_code,applies_to_domestic,applies_to_offshore,lei_threshold\n\
                   SAL,Salary Payment,SAL,true,true,lots\n";

        match parse_purpose_codes(csv.as_bytes(), &categories) {
            Err(CatalogError::InvalidValue { code, column, value }) => {
                assert_eq!(code, "SAL");
                assert_eq!(column, "lei_threshold");
                assert_eq!(value, "lots");
            }
            other => panic!("expected invalid value, got {other:?}"),
        }
    }
}

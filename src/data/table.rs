//! Sales Table Module
//! Immutable in-memory table of sales records and the location set derived from it.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// Locations chosen in the selector. Empty means no filtering.
pub type FilterSelection = BTreeSet<String>;

/// Column names the dashboard reads from the CSV.
pub const DATE_COL: &str = "Date";
pub const LOCATION_COL: &str = "Location";
pub const CATEGORY_COL: &str = "Product_Category";
pub const GENDER_COL: &str = "Gender";
pub const QUANTITY_COL: &str = "Quantity";
pub const OFFLINE_SPEND_COL: &str = "Offline_Spend";

/// Columns that must be present for the table to load.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    DATE_COL,
    LOCATION_COL,
    CATEGORY_COL,
    GENDER_COL,
    QUANTITY_COL,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Parse the exact single-letter codes used in the dataset.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "F" => Some(Gender::Female),
            "M" => Some(Gender::Male),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

/// One sales transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesRecord {
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub product_category: Option<String>,
    pub gender: Option<Gender>,
    pub quantity: Option<f64>,
    pub offline_spend: Option<f64>,
    /// Every column rendered as display text, in table column order.
    pub cells: Vec<String>,
}

/// Read-only table of sales records, built once at load time.
#[derive(Debug, Clone)]
pub struct SalesTable {
    columns: Vec<String>,
    records: Vec<SalesRecord>,
    has_offline_spend: bool,
    locations: Vec<String>,
}

impl SalesTable {
    pub fn new(columns: Vec<String>, records: Vec<SalesRecord>) -> Self {
        let has_offline_spend = columns.iter().any(|c| c == OFFLINE_SPEND_COL);

        let locations: Vec<String> = records
            .iter()
            .filter_map(|r| r.location.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Self {
            columns,
            records,
            has_offline_spend,
            locations,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn record(&self, row: usize) -> Option<&SalesRecord> {
        self.records.get(row)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_offline_spend(&self) -> bool {
        self.has_offline_spend
    }

    /// Distinct non-null locations, sorted ascending.
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// The first location, or nothing when the table has no locations.
    pub fn default_selection(&self) -> FilterSelection {
        self.locations.iter().take(1).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(location: Option<&str>) -> SalesRecord {
        SalesRecord {
            location: location.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_locations_are_distinct_sorted_and_skip_nulls() {
        let table = SalesTable::new(
            vec![LOCATION_COL.to_string()],
            vec![
                record(Some("New York")),
                record(Some("California")),
                record(None),
                record(Some("New York")),
                record(Some("Chicago")),
            ],
        );

        assert_eq!(table.locations(), ["California", "Chicago", "New York"]);
        assert_eq!(
            table.default_selection().into_iter().collect::<Vec<_>>(),
            vec!["California".to_string()]
        );
    }

    #[test]
    fn test_default_selection_empty_without_locations() {
        let table = SalesTable::new(vec![LOCATION_COL.to_string()], vec![record(None)]);
        assert!(table.locations().is_empty());
        assert!(table.default_selection().is_empty());
    }

    #[test]
    fn test_offline_spend_flag_follows_columns() {
        let with = SalesTable::new(vec![OFFLINE_SPEND_COL.to_string()], Vec::new());
        let without = SalesTable::new(vec![QUANTITY_COL.to_string()], Vec::new());
        assert!(with.has_offline_spend());
        assert!(!without.has_offline_spend());
    }

    #[test]
    fn test_gender_codes() {
        assert_eq!(Gender::from_code("F"), Some(Gender::Female));
        assert_eq!(Gender::from_code("M"), Some(Gender::Male));
        assert_eq!(Gender::from_code("f"), None);
        assert_eq!(Gender::from_code(""), None);
    }
}

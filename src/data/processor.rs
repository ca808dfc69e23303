//! Data Processor Module
//! Handles value cleaning (dates) and location filtering.

use crate::data::table::{FilterSelection, SalesTable};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Date-only layouts tried in order. Month-first before day-first,
/// four-digit years before two-digit ones.
const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%m/%d/%y",
    "%d/%m/%y",
];

/// `%Y` also reads "19" as year 19; such matches are rejected.
const MIN_YEAR: i32 = 1000;

/// Date-time layouts; the time part is dropped.
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Handles data cleaning and filtering operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Parse a raw date cell. Anything unrecognised becomes `None`.
    pub fn parse_date(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let plausible = |date: &NaiveDate| date.year() >= MIN_YEAR;

        DATE_FORMATS
            .iter()
            .filter_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
            .find(plausible)
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .filter_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                    .map(|dt| dt.date())
                    .find(plausible)
            })
    }

    /// Row indices of the records matching the selection, in table order.
    ///
    /// An empty selection keeps every row.
    pub fn filter_by_locations(table: &SalesTable, selection: &FilterSelection) -> Vec<usize> {
        table
            .records()
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                selection.is_empty()
                    || record
                        .location
                        .as_ref()
                        .is_some_and(|loc| selection.contains(loc))
            })
            .map(|(row, _)| row)
            .collect()
    }
}

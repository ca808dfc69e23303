//! CSV Data Loader Module
//! Loads the sales CSV with Polars and materializes an immutable `SalesTable`.

use crate::data::processor::DataProcessor;
use crate::data::table::{
    Gender, SalesRecord, SalesTable, CATEGORY_COL, DATE_COL, GENDER_COL, LOCATION_COL,
    OFFLINE_SPEND_COL, QUANTITY_COL, REQUIRED_COLUMNS,
};
use log::{info, warn};
use polars::prelude::*;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;

/// Row cap applied after reading.
pub const DEFAULT_MAX_ROWS: usize = 5000;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    max_rows: usize,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROWS)
    }
}

impl DataLoader {
    pub fn new(max_rows: usize) -> Self {
        Self { max_rows }
    }

    /// Load a CSV file into a `SalesTable`.
    pub fn load_csv(&self, file_path: &Path) -> Result<SalesTable, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::NotFound(file_path.display().to_string()));
        }

        let started = Instant::now();
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let total_rows = df.height();
        let table = self.build_table(df)?;

        if total_rows > table.len() {
            warn!(
                "Truncated {} to the first {} of {} rows",
                file_path.display(),
                table.len(),
                total_rows
            );
        }
        info!(
            "Loaded {} ({} rows, {} columns) in {:.2?}",
            file_path.display(),
            table.len(),
            table.columns().len(),
            started.elapsed()
        );

        Ok(table)
    }

    /// Normalize a raw DataFrame and convert it to typed records.
    pub fn build_table(&self, df: DataFrame) -> Result<SalesTable, LoaderError> {
        let mut df = df.head(Some(self.max_rows));

        let trimmed: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.trim().to_string())
            .collect();
        df.set_column_names(trimmed.iter().map(String::as_str))?;

        for required in REQUIRED_COLUMNS {
            if !trimmed.iter().any(|c| c == required) {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }

        let raw_dates = Self::string_values(&df, DATE_COL)?;
        let locations = Self::string_values(&df, LOCATION_COL)?;
        let categories = Self::string_values(&df, CATEGORY_COL)?;
        let genders = Self::string_values(&df, GENDER_COL)?;
        let quantities = Self::float_values(&df, QUANTITY_COL)?;
        let offline_spend = if trimmed.iter().any(|c| c == OFFLINE_SPEND_COL) {
            Self::float_values(&df, OFFLINE_SPEND_COL)?
        } else {
            vec![None; df.height()]
        };

        let date_idx = trimmed.iter().position(|c| c == DATE_COL);
        let mut cell_columns: Vec<Vec<Option<String>>> = Vec::with_capacity(trimmed.len());
        for name in &trimmed {
            cell_columns.push(Self::string_values(&df, name)?);
        }

        let mut unparsed_dates = 0usize;
        let records: Vec<SalesRecord> = (0..df.height())
            .map(|i| {
                let date = raw_dates[i].as_deref().and_then(DataProcessor::parse_date);
                if date.is_none() && raw_dates[i].is_some() {
                    unparsed_dates += 1;
                }

                let cells = cell_columns
                    .iter()
                    .enumerate()
                    .map(|(c, values)| {
                        if Some(c) == date_idx {
                            date.map(|d| d.to_string()).unwrap_or_default()
                        } else {
                            values[i].clone().unwrap_or_default()
                        }
                    })
                    .collect();

                SalesRecord {
                    date,
                    location: locations[i].clone(),
                    product_category: categories[i].clone(),
                    gender: genders[i].as_deref().and_then(Gender::from_code),
                    quantity: quantities[i],
                    offline_spend: offline_spend[i],
                    cells,
                }
            })
            .collect();

        if unparsed_dates > 0 {
            warn!("{} rows have an unparseable {} value", unparsed_dates, DATE_COL);
        }

        Ok(SalesTable::new(trimmed, records))
    }

    /// Column values as optional strings. Nulls stay `None`.
    fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
        let as_str = column.cast(&DataType::String)?;
        let values = as_str
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect();
        Ok(values)
    }

    /// Column values as optional floats. Non-numeric and NaN become `None`.
    fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
        let as_f64 = column.cast(&DataType::Float64)?;
        let values = as_f64
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Ok(values)
    }
}

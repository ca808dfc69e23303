//! Data module - CSV loading, the sales table and filtering

mod loader;
mod processor;
mod table;

pub use loader::{DataLoader, DEFAULT_MAX_ROWS};
pub use processor::DataProcessor;
pub use table::{
    FilterSelection, Gender, SalesRecord, SalesTable, LOCATION_COL, OFFLINE_SPEND_COL,
    QUANTITY_COL,
};

//! Dashboard configuration built from the command line.

use crate::analytics::{AggregationConfig, DEFAULT_TOP_N};
use crate::data::{FilterSelection, SalesTable, DEFAULT_MAX_ROWS};
use log::warn;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// CSV loaded at startup, if any.
    pub csv_path: Option<PathBuf>,
    pub max_rows: usize,
    pub top_n: usize,
    /// Locations selected after the first load. Empty picks the first location.
    pub initial_locations: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            csv_path: None,
            max_rows: DEFAULT_MAX_ROWS,
            top_n: DEFAULT_TOP_N,
            initial_locations: Vec::new(),
        }
    }
}

impl DashboardConfig {
    pub fn aggregation(&self) -> AggregationConfig {
        AggregationConfig { top_n: self.top_n }
    }

    /// Selection to start with once `table` is loaded.
    ///
    /// Unknown locations are dropped; if none remain, the table default is used.
    pub fn initial_selection(&self, table: &SalesTable) -> FilterSelection {
        if self.initial_locations.is_empty() {
            return table.default_selection();
        }

        let (known, unknown): (Vec<&String>, Vec<&String>) = self
            .initial_locations
            .iter()
            .partition(|loc| table.locations().contains(*loc));

        if !unknown.is_empty() {
            warn!("Ignoring unknown location(s): {:?}", unknown);
        }
        if known.is_empty() {
            return table.default_selection();
        }
        known.into_iter().cloned().collect()
    }
}

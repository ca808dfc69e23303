//! Headless JSON summary of one aggregation.

use crate::analytics::{AggregationResult, CategoryBreakdown, Kpi, WeeklyPoint};
use crate::data::{FilterSelection, SalesTable};
use crate::gui::KpiDisplay;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct KpiSummary {
    #[serde(flatten)]
    pub values: Kpi,
    pub display: KpiDisplay,
}

impl KpiSummary {
    fn new(values: Kpi, display: KpiDisplay) -> Self {
        Self { values, display }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary<'a> {
    pub locations: Vec<&'a str>,
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub revenue: KpiSummary,
    pub quantity: KpiSummary,
    pub breakdown: &'a CategoryBreakdown,
    pub weekly: &'a [WeeklyPoint],
}

impl<'a> DashboardSummary<'a> {
    pub fn new(
        table: &SalesTable,
        selection: &'a FilterSelection,
        result: &'a AggregationResult,
    ) -> Self {
        Self {
            locations: selection.iter().map(String::as_str).collect(),
            total_rows: table.len(),
            filtered_rows: result.filtered_rows.len(),
            revenue: KpiSummary::new(result.revenue, KpiDisplay::revenue(&result.revenue)),
            quantity: KpiSummary::new(result.quantity, KpiDisplay::quantity(&result.quantity)),
            breakdown: &result.breakdown,
            weekly: &result.weekly,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

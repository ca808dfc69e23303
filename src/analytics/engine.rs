//! Aggregation Engine Module
//! Turns the sales table and a location selection into chart-ready series and KPIs.

use crate::analytics::kpi::{Kpi, MonthWindow};
use crate::data::{DataProcessor, FilterSelection, Gender, SalesRecord, SalesTable};
use chrono::{Datelike, Duration, NaiveDate};
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Number of categories kept in the breakdown by default.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct AggregationConfig {
    pub top_n: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Units sold per top category, split by gender.
///
/// `female` and `male` are aligned with `categories`, ranked best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub categories: Vec<String>,
    pub female: Vec<f64>,
    pub male: Vec<f64>,
}

impl CategoryBreakdown {
    pub fn series(&self, gender: Gender) -> &[f64] {
        match gender {
            Gender::Female => &self.female,
            Gender::Male => &self.male,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Revenue total for one calendar week ending on Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeeklyPoint {
    pub week_ending: NaiveDate,
    pub total: f64,
}

/// Everything the dashboard shows for one selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationResult {
    /// Indices into the sales table, in table order.
    pub filtered_rows: Vec<usize>,
    pub breakdown: CategoryBreakdown,
    pub weekly: Vec<WeeklyPoint>,
    pub revenue: Kpi,
    pub quantity: Kpi,
}

impl AggregationResult {
    pub fn filtered_records<'a>(
        &'a self,
        table: &'a SalesTable,
    ) -> impl Iterator<Item = &'a SalesRecord> + 'a {
        self.filtered_rows
            .iter()
            .filter_map(move |&row| table.record(row))
    }
}

/// Stateless aggregation over an injected table.
pub struct AggregationEngine;

impl AggregationEngine {
    /// Recompute every dashboard series for a selection.
    pub fn aggregate(
        table: &SalesTable,
        selection: &FilterSelection,
        config: &AggregationConfig,
    ) -> AggregationResult {
        let filtered_rows = DataProcessor::filter_by_locations(table, selection);
        let records: Vec<&SalesRecord> = filtered_rows
            .iter()
            .filter_map(|&row| table.record(row))
            .collect();

        let top = Self::rank_categories(&records, config.top_n);
        let breakdown = Self::gender_breakdown(&records, top);

        let weekly = if table.has_offline_spend() {
            Self::weekly_totals(&records)
        } else {
            Vec::new()
        };

        let (revenue, quantity) = match MonthWindow::latest(records.iter().copied()) {
            Some(window) => {
                let revenue = if table.has_offline_spend() {
                    window.kpi(records.iter().copied(), |r| r.offline_spend)
                } else {
                    Kpi::default()
                };
                let quantity = window.kpi(records.iter().copied(), |r| r.quantity);
                (revenue, quantity)
            }
            None => (Kpi::default(), Kpi::default()),
        };

        debug!(
            "Aggregated {} of {} rows for {} location(s)",
            records.len(),
            table.len(),
            selection.len()
        );

        AggregationResult {
            filtered_rows,
            breakdown,
            weekly,
            revenue,
            quantity,
        }
    }

    /// Categories ranked by total quantity, best first, at most `top_n`.
    ///
    /// Ties keep ascending name order.
    pub fn rank_categories(records: &[&SalesRecord], top_n: usize) -> Vec<String> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for record in records {
            if let Some(category) = record.product_category.as_deref() {
                *totals.entry(category).or_insert(0.0) += record.quantity.unwrap_or(0.0);
            }
        }

        let mut ranked: Vec<(&str, f64)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        ranked
            .into_iter()
            .take(top_n)
            .map(|(category, _)| category.to_string())
            .collect()
    }

    /// Quantity per ranked category for each gender, zero-filled.
    pub fn gender_breakdown(
        records: &[&SalesRecord],
        categories: Vec<String>,
    ) -> CategoryBreakdown {
        let index: HashMap<&str, usize> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let mut female = vec![0.0; categories.len()];
        let mut male = vec![0.0; categories.len()];

        for record in records {
            let Some(&slot) = record
                .product_category
                .as_deref()
                .and_then(|c| index.get(c))
            else {
                continue;
            };
            let quantity = record.quantity.unwrap_or(0.0);
            match record.gender {
                Some(Gender::Female) => female[slot] += quantity,
                Some(Gender::Male) => male[slot] += quantity,
                None => {}
            }
        }

        CategoryBreakdown {
            categories,
            female,
            male,
        }
    }

    /// The Sunday closing the calendar week that contains `date`.
    pub fn week_ending(date: NaiveDate) -> NaiveDate {
        let days_to_sunday = 6 - date.weekday().num_days_from_monday();
        date + Duration::days(i64::from(days_to_sunday))
    }

    /// Offline spend summed per week, with empty weeks between the first
    /// and last populated week filled with zero.
    pub fn weekly_totals(records: &[&SalesRecord]) -> Vec<WeeklyPoint> {
        let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in records {
            if let Some(date) = record.date {
                *buckets.entry(Self::week_ending(date)).or_insert(0.0) +=
                    record.offline_spend.unwrap_or(0.0);
            }
        }

        let (Some(&first), Some(&last)) = (buckets.keys().next(), buckets.keys().next_back())
        else {
            return Vec::new();
        };

        let mut points = Vec::new();
        let mut week = first;
        while week <= last {
            points.push(WeeklyPoint {
                week_ending: week,
                total: buckets.get(&week).copied().unwrap_or(0.0),
            });
            week += Duration::weeks(1);
        }
        points
    }
}

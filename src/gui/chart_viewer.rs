//! Chart Viewer Widget
//! Central dashboard area: KPI cards and weekly chart on top,
//! category breakdown and the sales table below.

use crate::analytics::AggregationResult;
use crate::charts::ChartPlotter;
use crate::data::SalesTable;
use crate::gui::{KpiDisplay, SalesTableView};
use egui::{RichText, ScrollArea};

const SECTION_SPACING: f32 = 15.0;
const TOP_ROW_HEIGHT: f32 = 300.0;
const BOTTOM_ROW_HEIGHT: f32 = 450.0;

/// Dashboard display for the current aggregation.
pub struct ChartViewer {
    pub revenue: KpiDisplay,
    pub quantity: KpiDisplay,
}

impl Default for ChartViewer {
    fn default() -> Self {
        let empty = AggregationResult::default();
        Self {
            revenue: KpiDisplay::revenue(&empty.revenue),
            quantity: KpiDisplay::quantity(&empty.quantity),
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the KPI cards from a new aggregation.
    pub fn set_result(&mut self, result: &AggregationResult) {
        self.revenue = KpiDisplay::revenue(&result.revenue);
        self.quantity = KpiDisplay::quantity(&result.quantity);
    }

    /// Draw the dashboard, or a placeholder when nothing is loaded.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        table: Option<&SalesTable>,
        result: &AggregationResult,
        table_view: &mut SalesTableView,
    ) {
        let Some(table) = table else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let half = (ui.available_width() - SECTION_SPACING) / 2.0;

                ui.horizontal(|ui| {
                    // KPI cards side by side
                    ui.vertical(|ui| {
                        ui.set_width(half);
                        ui.horizontal(|ui| {
                            let card = (half - SECTION_SPACING) / 2.0 - 24.0;
                            self.revenue.show(ui, card);
                            ui.add_space(SECTION_SPACING);
                            self.quantity.show(ui, card);
                        });
                    });

                    ui.add_space(SECTION_SPACING);

                    ui.vertical(|ui| {
                        ui.set_width(half);
                        ChartPlotter::draw_weekly_chart(ui, &result.weekly, TOP_ROW_HEIGHT);
                    });
                });

                ui.add_space(SECTION_SPACING);
                ui.separator();
                ui.add_space(SECTION_SPACING);

                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        ui.set_width(half);
                        ChartPlotter::draw_category_chart(
                            ui,
                            &result.breakdown,
                            BOTTOM_ROW_HEIGHT,
                        );
                    });

                    ui.add_space(SECTION_SPACING);

                    ui.vertical(|ui| {
                        ui.set_width(half);
                        table_view.show(ui, table, &result.filtered_rows);
                    });
                });
            });
    }
}

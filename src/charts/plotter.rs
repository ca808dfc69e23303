//! Chart Plotter Module
//! Creates the interactive dashboard charts using egui_plot.

use crate::analytics::{CategoryBreakdown, WeeklyPoint};
use crate::data::Gender;
use chrono::{Datelike, NaiveDate};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

pub const FEMALE_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red
pub const MALE_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const REVENUE_COLOR: Color32 = Color32::from_rgb(52, 152, 219);

pub const CATEGORY_CHART_TITLE: &str = "Top categories by units sold";
pub const WEEKLY_CHART_TITLE: &str = "Weekly revenue";

/// Bar thickness in category slots.
const BAR_WIDTH: f64 = 0.6;

pub fn gender_color(gender: Gender) -> Color32 {
    match gender {
        Gender::Female => FEMALE_COLOR,
        Gender::Male => MALE_COLOR,
    }
}

/// Plot x value for a date (days from the common era).
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Inverse of `date_to_x`, rounding to the nearest day.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() || x.abs() > i32::MAX as f64 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

/// Vertical slot of the category at `rank`, best ranked at the top.
pub fn category_slot(rank: usize, count: usize) -> f64 {
    (count - 1 - rank) as f64
}

/// Creates dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Horizontal stacked bars: female units, then male units stacked on top.
    pub fn draw_category_chart(ui: &mut egui::Ui, breakdown: &CategoryBreakdown, height: f32) {
        ui.label(RichText::new(CATEGORY_CHART_TITLE).size(14.0).strong());

        if breakdown.is_empty() {
            ui.label(RichText::new("No sales for this selection").color(Color32::GRAY));
            return;
        }

        let count = breakdown.categories.len();
        let bars = |values: &[f64]| -> Vec<Bar> {
            values
                .iter()
                .enumerate()
                .map(|(rank, &value)| {
                    Bar::new(category_slot(rank, count), value)
                        .width(BAR_WIDTH)
                        .name(&breakdown.categories[rank])
                })
                .collect()
        };

        let female = BarChart::new(bars(breakdown.series(Gender::Female)))
            .name(Gender::Female.label())
            .color(gender_color(Gender::Female))
            .horizontal();
        let male = BarChart::new(bars(breakdown.series(Gender::Male)))
            .name(Gender::Male.label())
            .color(gender_color(Gender::Male))
            .horizontal()
            .stack_on(&[&female]);

        let labels = breakdown.categories.clone();

        Plot::new("category_breakdown")
            .height(height)
            .legend(Legend::default())
            .allow_drag(false)
            .allow_scroll(false)
            .allow_zoom(false)
            .x_axis_label("Units sold")
            .include_x(0.0)
            .y_axis_formatter(move |mark, _range| {
                let slot = mark.value.round();
                if (mark.value - slot).abs() > 1e-6 || slot < 0.0 {
                    return String::new();
                }
                let slot = slot as usize;
                if slot < labels.len() {
                    labels[labels.len() - 1 - slot].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(female);
                plot_ui.bar_chart(male);
            });
    }

    /// Weekly revenue line with a marker on each week.
    pub fn draw_weekly_chart(ui: &mut egui::Ui, weekly: &[WeeklyPoint], height: f32) {
        ui.label(RichText::new(WEEKLY_CHART_TITLE).size(14.0).strong());

        if weekly.is_empty() {
            ui.label(
                RichText::new("No dated revenue for this selection").color(Color32::GRAY),
            );
            return;
        }

        let points: Vec<[f64; 2]> = weekly
            .iter()
            .map(|p| [date_to_x(p.week_ending), p.total])
            .collect();

        Plot::new("weekly_revenue")
            .height(height)
            .allow_scroll(false)
            .x_axis_label("Week")
            .y_axis_label("Revenue")
            .x_axis_formatter(|mark, _range| {
                x_to_date(mark.value)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
            .label_formatter(|_name, value| {
                let week = x_to_date(value.x)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                format!("Week ending {}\n{:.0}", week, value.y)
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(REVENUE_COLOR)
                        .width(2.0)
                        .name("Revenue"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(2.5)
                        .color(REVENUE_COLOR),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_x_round_trip() {
        let date = NaiveDate::from_ymd_opt(2019, 12, 15).unwrap();
        assert_eq!(x_to_date(date_to_x(date)), Some(date));
        assert_eq!(x_to_date(date_to_x(date) + 0.4), Some(date));
        assert_eq!(x_to_date(f64::NAN), None);
    }

    #[test]
    fn test_best_category_gets_top_slot() {
        assert_eq!(category_slot(0, 4), 3.0);
        assert_eq!(category_slot(3, 4), 0.0);
    }
}

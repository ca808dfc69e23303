//! KPI Card Widget
//! Formats a `Kpi` for display and draws it as a card.

use crate::analytics::{Direction, Kpi};
use egui::{Color32, RichText};
use serde::Serialize;

pub const UP_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
pub const DOWN_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// How a KPI value is scaled for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiUnit {
    /// Divided by 1000 with a `k` suffix.
    Thousands,
    /// Rounded to a whole number.
    Units,
}

impl KpiUnit {
    fn format(&self, value: f64) -> String {
        match self {
            KpiUnit::Thousands => format!("{:.0}k", value / 1000.0),
            KpiUnit::Units => format!("{:.0}", value),
        }
    }
}

/// Display strings for one KPI card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiDisplay {
    pub title: String,
    pub value: String,
    pub delta: String,
    #[serde(skip)]
    pub direction: Direction,
}

impl KpiDisplay {
    pub fn new(title: &str, kpi: &Kpi, unit: KpiUnit) -> Self {
        let glyph = match kpi.direction {
            Direction::Up => "▲",
            Direction::Down => "▼",
        };
        Self {
            title: title.to_string(),
            value: unit.format(kpi.current),
            delta: format!("{} {}", glyph, unit.format(kpi.delta.abs())),
            direction: kpi.direction,
        }
    }

    pub fn revenue(kpi: &Kpi) -> Self {
        Self::new("Total revenue", kpi, KpiUnit::Thousands)
    }

    pub fn quantity(kpi: &Kpi) -> Self {
        Self::new("Units sold", kpi, KpiUnit::Units)
    }

    pub fn color(&self) -> Color32 {
        match self.direction {
            Direction::Up => UP_COLOR,
            Direction::Down => DOWN_COLOR,
        }
    }

    /// Draw the card at the given width.
    pub fn show(&self, ui: &mut egui::Ui, width: f32) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(width);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(&self.title).size(16.0).strong());
                    ui.add_space(6.0);
                    ui.label(RichText::new(&self.value).size(32.0).strong());
                    ui.add_space(4.0);
                    ui.label(RichText::new(&self.delta).size(16.0).color(self.color()));
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_in_thousands() {
        let display = KpiDisplay::revenue(&Kpi::new(12_400.0, 10_100.0));
        assert_eq!(display.value, "12k");
        assert_eq!(display.delta, "▲ 2k");
        assert_eq!(display.color(), UP_COLOR);
    }

    #[test]
    fn test_negative_delta_uses_down_glyph_and_absolute_value() {
        let display = KpiDisplay::revenue(&Kpi::new(1_000.0, 4_200.0));
        assert_eq!(display.value, "1k");
        assert_eq!(display.delta, "▼ 3k");
        assert_eq!(display.color(), DOWN_COLOR);
    }

    #[test]
    fn test_quantity_rounds_to_units() {
        let display = KpiDisplay::quantity(&Kpi::new(41.7, 30.0));
        assert_eq!(display.value, "42");
        assert_eq!(display.delta, "▲ 12");
    }

    #[test]
    fn test_zero_kpi() {
        let display = KpiDisplay::quantity(&Kpi::default());
        assert_eq!(display.value, "0");
        assert_eq!(display.delta, "▲ 0");
    }
}

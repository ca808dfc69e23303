//! Control Panel Widget
//! Left side panel with the data source, the location selector and export.

use crate::data::FilterSelection;
use egui::{Color32, RichText, ScrollArea};
use std::path::PathBuf;

/// Left side control panel with file selection and the location filter.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub locations: Vec<String>,
    pub selection: FilterSelection,
    pub row_count: usize,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            locations: Vec::new(),
            selection: FilterSelection::new(),
            row_count: 0,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the available locations after a table load.
    pub fn update_locations(&mut self, locations: Vec<String>, selection: FilterSelection) {
        self.locations = locations;
        self.selection = selection;
    }

    /// Add or remove one location. Returns true when the selection changed.
    pub fn toggle_location(&mut self, location: &str, selected: bool) -> bool {
        if selected {
            self.selection.insert(location.to_string())
        } else {
            self.selection.remove(location)
        }
    }

    /// Text for the collapsed selector.
    pub fn selection_summary(&self) -> String {
        match self.selection.len() {
            0 => "All locations".to_string(),
            1 => self.selection.iter().next().cloned().unwrap_or_default(),
            n => format!("{} locations", n),
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏬 Sales Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Open CSV...").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        if self.row_count > 0 {
            ui.label(
                RichText::new(format!("{} rows loaded", self.row_count))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Location Section =====
        ui.label(RichText::new("📍 Locations").size(14.0).strong());
        ui.add_space(5.0);

        let mut changed = false;
        egui::ComboBox::from_id_salt("location_filter")
            .width(260.0)
            .selected_text(self.selection_summary())
            .show_ui(ui, |ui| {
                ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                    for location in self.locations.clone() {
                        let mut checked = self.selection.contains(&location);
                        if ui.checkbox(&mut checked, &location).changed() {
                            changed |= self.toggle_location(&location, checked);
                        }
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                let all: FilterSelection = self.locations.iter().cloned().collect();
                changed |= all != self.selection;
                self.selection = all;
            }
            if ui.small_button("Clear All").clicked() {
                changed |= !self.selection.is_empty();
                self.selection.clear();
            }
        });

        if self.selection.is_empty() && !self.locations.is_empty() {
            ui.label(
                RichText::new("No location selected: showing every store")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }

        if changed {
            action = ControlPanelAction::SelectionChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export Charts").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportCharts;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    SelectionChanged,
    ExportCharts,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> ControlPanel {
        let mut panel = ControlPanel::new();
        panel.update_locations(
            vec!["California".into(), "Chicago".into(), "New York".into()],
            ["California".to_string()].into(),
        );
        panel
    }

    #[test]
    fn test_toggle_reports_changes_only() {
        let mut panel = panel();
        assert!(panel.toggle_location("Chicago", true));
        assert!(!panel.toggle_location("Chicago", true));
        assert!(panel.toggle_location("California", false));
        assert!(!panel.toggle_location("California", false));
        assert_eq!(panel.selection.len(), 1);
        assert!(panel.selection.contains("Chicago"));
    }

    #[test]
    fn test_selection_summary() {
        let mut panel = panel();
        assert_eq!(panel.selection_summary(), "California");
        panel.toggle_location("Chicago", true);
        assert_eq!(panel.selection_summary(), "2 locations");
        panel.selection.clear();
        assert_eq!(panel.selection_summary(), "All locations");
    }
}

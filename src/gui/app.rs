//! Sales Dashboard Main Application
//! Main window with control panel and dashboard view.

use crate::analytics::{AggregationEngine, AggregationResult};
use crate::charts::StaticChartRenderer;
use crate::config::DashboardConfig;
use crate::data::{DataLoader, SalesTable};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, SalesTableView};
use egui::SidePanel;
use log::{error, info};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Complete(SalesTable),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    table: Option<Arc<SalesTable>>,
    result: AggregationResult,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    table_view: SalesTableView,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self {
            config,
            table: None,
            result: AggregationResult::default(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            table_view: SalesTableView::new(),
            load_rx: None,
            is_loading: false,
        };

        if let Some(path) = app.config.csv_path.clone() {
            app.start_loading(path);
        }
        app
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            // A browsed file replaces any location preset from the command line
            self.config.initial_locations.clear();
            self.start_loading(path);
        }
    }

    /// Load a CSV in a background thread
    fn start_loading(&mut self, path: PathBuf) {
        self.control_panel.csv_path = Some(path.clone());
        self.control_panel.set_status("Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        let loader = DataLoader::new(self.config.max_rows);
        thread::spawn(move || {
            let result = match loader.load_csv(&path) {
                Ok(table) => LoadResult::Complete(table),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Complete(table) => {
                        self.install_table(table);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(err) => {
                        error!("CSV load failed: {}", err);
                        self.control_panel.set_status(&format!("Error: {}", err));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Make a freshly loaded table current and compute the first view.
    fn install_table(&mut self, table: SalesTable) {
        let selection = self.config.initial_selection(&table);
        self.control_panel
            .update_locations(table.locations().to_vec(), selection);
        self.control_panel.row_count = table.len();
        self.control_panel.export_enabled = true;
        self.control_panel.set_status(&format!(
            "Loaded {} rows, {} columns",
            table.len(),
            table.columns().len()
        ));
        self.table_view.reset(table.columns().len());
        self.table = Some(Arc::new(table));
        self.recompute();
    }

    /// Rerun the aggregation for the current selection.
    fn recompute(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        self.result = AggregationEngine::aggregate(
            table,
            &self.control_panel.selection,
            &self.config.aggregation(),
        );
        self.chart_viewer.set_result(&self.result);
        self.table_view.set_page(0);
    }

    /// Export both charts as PNG into a user chosen folder
    fn handle_export_charts(&mut self) {
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return; // User cancelled
        };

        match StaticChartRenderer::export_all(&self.result, &dir) {
            Ok(written) => {
                info!("Chart export finished: {:?}", written);
                self.control_panel.set_status(&format!(
                    "Exported {} chart(s) to {}",
                    written.len(),
                    dir.display()
                ));
            }
            Err(e) => {
                error!("Chart export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::SelectionChanged => self.recompute(),
                        ControlPanelAction::ExportCharts => self.handle_export_charts(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(
                ui,
                self.table.as_deref(),
                &self.result,
                &mut self.table_view,
            );
        });
    }
}

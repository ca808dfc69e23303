//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
mod kpi_card;
mod sales_table;

pub use app::DashboardApp;
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use kpi_card::KpiDisplay;
pub use sales_table::SalesTableView;

//! Sales Dashboard - Retail sales analytics over a CSV export
//!
//! Filters the data by store location and shows top categories by gender,
//! weekly offline spend and month over month KPIs.

mod analytics;
mod charts;
mod config;
mod data;
mod gui;
mod report;

use analytics::{AggregationEngine, DEFAULT_TOP_N};
use anyhow::{bail, Context};
use charts::StaticChartRenderer;
use clap::Parser;
use config::DashboardConfig;
use data::{DataLoader, DEFAULT_MAX_ROWS};
use eframe::egui;
use gui::DashboardApp;
use log::info;
use report::DashboardSummary;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sales-dashboard", version, about = "Retail sales dashboard")]
struct Cli {
    /// CSV file to load on startup
    csv: Option<PathBuf>,

    /// Maximum number of rows read from the CSV
    #[arg(long, default_value_t = DEFAULT_MAX_ROWS)]
    max_rows: usize,

    /// Number of categories in the ranking
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    /// Initial location selection (repeatable)
    #[arg(short, long = "location")]
    locations: Vec<String>,

    /// Print a JSON summary instead of opening the window
    #[arg(long)]
    summary: bool,

    /// Write the charts as PNG into this directory instead of opening the window
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> DashboardConfig {
        DashboardConfig {
            csv_path: self.csv.clone(),
            max_rows: self.max_rows,
            top_n: self.top_n,
            initial_locations: self.locations.clone(),
        }
    }

    fn is_headless(&self) -> bool {
        self.summary || self.export_dir.is_some()
    }
}

fn run_headless(cli: &Cli, config: &DashboardConfig) -> anyhow::Result<()> {
    let Some(path) = &config.csv_path else {
        bail!("a CSV file is required with --summary or --export-dir");
    };

    let table = DataLoader::new(config.max_rows)
        .load_csv(path)
        .with_context(|| format!("loading {}", path.display()))?;
    let selection = config.initial_selection(&table);
    let result = AggregationEngine::aggregate(&table, &selection, &config.aggregation());

    if cli.summary {
        let json = DashboardSummary::new(&table, &selection, &result).to_json()?;
        println!("{}", json);
    }

    if let Some(dir) = &cli.export_dir {
        let written = StaticChartRenderer::export_all(&result, dir)
            .with_context(|| format!("exporting charts to {}", dir.display()))?;
        info!("Wrote {} chart(s) to {}", written.len(), dir.display());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.config();

    if cli.is_headless() {
        return run_headless(&cli, &config);
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Sales Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Sales Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start the window: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["sales-dashboard"]);
        assert!(cli.csv.is_none());
        assert!(!cli.is_headless());
        assert_eq!(cli.max_rows, DEFAULT_MAX_ROWS);
        assert_eq!(cli.top_n, DEFAULT_TOP_N);
    }

    #[test]
    fn test_cli_locations_and_headless() {
        let cli = Cli::parse_from([
            "sales-dashboard",
            "sales.csv",
            "-l",
            "Chicago",
            "--location",
            "New York",
            "--summary",
        ]);
        let config = cli.config();
        assert!(cli.is_headless());
        assert_eq!(config.csv_path, Some(PathBuf::from("sales.csv")));
        assert_eq!(config.initial_locations, vec!["Chicago", "New York"]);
    }

    #[test]
    fn test_headless_requires_csv() {
        let cli = Cli::parse_from(["sales-dashboard", "--summary"]);
        assert!(run_headless(&cli, &cli.config()).is_err());
    }
}

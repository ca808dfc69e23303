//! Static Chart Renderer
//! Writes the dashboard charts to PNG files with plotters.
//!
//! Files:
//! 1. `category_breakdown.png`: horizontal stacked bars, female then male
//! 2. `weekly_revenue.png`: weekly revenue line with point markers

use crate::analytics::{AggregationResult, CategoryBreakdown, WeeklyPoint};
use crate::charts::plotter::{CATEGORY_CHART_TITLE, WEEKLY_CHART_TITLE};
use crate::data::Gender;
use log::{info, warn};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CATEGORY_CHART_FILE: &str = "category_breakdown.png";
pub const WEEKLY_CHART_FILE: &str = "weekly_revenue.png";

const IMAGE_SIZE: (u32, u32) = (1200, 700);

const FEMALE: RGBColor = RGBColor(231, 76, 60);
const MALE: RGBColor = RGBColor(52, 152, 219);
const REVENUE: RGBColor = RGBColor(52, 152, 219);

/// Half the bar thickness in category slots.
const BAR_HALF_WIDTH: f64 = 0.35;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create export directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ExportError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ExportError::Drawing(err.to_string())
    }
}

/// Upper bound for a value axis: 10% headroom, never zero-width.
pub fn axis_max(max_value: f64) -> f64 {
    if max_value.is_finite() && max_value > 0.0 {
        max_value * 1.1
    } else {
        1.0
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render every non-empty chart into `dir`; returns the written paths.
    pub fn export_all(
        result: &AggregationResult,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, ExportError> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::new();

        if result.breakdown.is_empty() {
            warn!(
                "No category data for this selection; skipping {}",
                CATEGORY_CHART_FILE
            );
        } else {
            let path = dir.join(CATEGORY_CHART_FILE);
            Self::render_category_chart(&result.breakdown, &path)?;
            written.push(path);
        }

        if result.weekly.is_empty() {
            warn!(
                "No weekly revenue for this selection; skipping {}",
                WEEKLY_CHART_FILE
            );
        } else {
            let path = dir.join(WEEKLY_CHART_FILE);
            Self::render_weekly_chart(&result.weekly, &path)?;
            written.push(path);
        }

        info!("Exported {} chart(s) to {}", written.len(), dir.display());
        Ok(written)
    }

    pub fn render_category_chart(
        breakdown: &CategoryBreakdown,
        path: &Path,
    ) -> Result<(), ExportError> {
        let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
        Self::draw_category_chart(&root, breakdown)?;
        root.present()?;
        Ok(())
    }

    pub fn render_weekly_chart(weekly: &[WeeklyPoint], path: &Path) -> Result<(), ExportError> {
        let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
        Self::draw_weekly_chart(&root, weekly)?;
        root.present()?;
        Ok(())
    }

    fn draw_category_chart<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        breakdown: &CategoryBreakdown,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let count = breakdown.categories.len();
        let max_total = breakdown
            .female
            .iter()
            .zip(&breakdown.male)
            .map(|(f, m)| f + m)
            .fold(0.0, f64::max);
        // Best ranked category on the top row
        let slot = |rank: usize| (count - 1 - rank) as f64;
        let labels = &breakdown.categories;

        let mut chart = ChartBuilder::on(root)
            .caption(CATEGORY_CHART_TITLE, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(160)
            .build_cartesian_2d(0.0..axis_max(max_total), -0.5..(count as f64 - 0.5))?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(count.max(1))
            .y_label_formatter(&|y| {
                let rounded = y.round();
                if (y - rounded).abs() > 1e-6 || rounded < 0.0 {
                    return String::new();
                }
                let rounded = rounded as usize;
                if rounded < count {
                    labels[count - 1 - rounded].clone()
                } else {
                    String::new()
                }
            })
            .x_desc("Units sold")
            .y_desc("Product category")
            .draw()?;

        for (gender, color) in [(Gender::Female, FEMALE), (Gender::Male, MALE)] {
            let series = breakdown.series(gender);
            chart
                .draw_series(series.iter().enumerate().map(|(rank, &value)| {
                    let start = if gender == Gender::Male {
                        breakdown.female[rank]
                    } else {
                        0.0
                    };
                    let y = slot(rank);
                    Rectangle::new(
                        [
                            (start, y - BAR_HALF_WIDTH),
                            (start + value, y + BAR_HALF_WIDTH),
                        ],
                        color.filled(),
                    )
                }))?
                .label(gender.label())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        Ok(())
    }

    fn draw_weekly_chart<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        weekly: &[WeeklyPoint],
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let last_index = weekly.len().saturating_sub(1).max(1) as f64;
        let max_total = weekly.iter().map(|p| p.total).fold(0.0, f64::max);

        let mut chart = ChartBuilder::on(root)
            .caption(WEEKLY_CHART_TITLE, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(0.0..last_index, 0.0..axis_max(max_total))?;

        chart
            .configure_mesh()
            .x_labels(weekly.len().min(12))
            .x_label_formatter(&|x| {
                let idx = x.round();
                if idx < 0.0 || (x - idx).abs() > 1e-6 {
                    return String::new();
                }
                weekly
                    .get(idx as usize)
                    .map(|p| p.week_ending.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
            .x_desc("Week")
            .y_desc("Revenue")
            .draw()?;

        let points: Vec<(f64, f64)> = weekly
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.total))
            .collect();

        chart.draw_series(LineSeries::new(points.iter().copied(), REVENUE.stroke_width(2)))?;
        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, REVENUE.filled())),
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_axis_max_headroom() {
        assert!((axis_max(100.0) - 110.0).abs() < 1e-9);
        assert_eq!(axis_max(0.0), 1.0);
        assert_eq!(axis_max(f64::NAN), 1.0);
    }

    #[test]
    fn test_export_of_empty_result_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let written =
            StaticChartRenderer::export_all(&AggregationResult::default(), dir.path()).unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn test_export_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("charts").join("today");

        StaticChartRenderer::export_all(&AggregationResult::default(), &nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_export_writes_both_charts() {
        let result = AggregationResult {
            breakdown: CategoryBreakdown {
                categories: vec!["Apparel".to_string(), "Office".to_string()],
                female: vec![30.0, 5.0],
                male: vec![20.0, 12.0],
            },
            weekly: vec![
                WeeklyPoint {
                    week_ending: NaiveDate::from_ymd_opt(2019, 11, 3).unwrap(),
                    total: 800.0,
                },
                WeeklyPoint {
                    week_ending: NaiveDate::from_ymd_opt(2019, 11, 10).unwrap(),
                    total: 0.0,
                },
                WeeklyPoint {
                    week_ending: NaiveDate::from_ymd_opt(2019, 11, 17).unwrap(),
                    total: 1200.0,
                },
            ],
            ..Default::default()
        };
        let dir = tempfile::tempdir().unwrap();

        let written = StaticChartRenderer::export_all(&result, dir.path()).unwrap();

        assert_eq!(
            written,
            vec![
                dir.path().join(CATEGORY_CHART_FILE),
                dir.path().join(WEEKLY_CHART_FILE)
            ]
        );
        for path in &written {
            assert!(std::fs::metadata(path).unwrap().len() > 0);
        }
    }
}

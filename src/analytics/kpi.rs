//! Month-over-month KPI computation.

use crate::data::SalesRecord;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Up,
    Down,
}

/// A summary value compared with the previous month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kpi {
    pub current: f64,
    pub previous: f64,
    pub delta: f64,
    pub direction: Direction,
}

impl Default for Kpi {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Kpi {
    pub fn new(current: f64, previous: f64) -> Self {
        let delta = current - previous;
        Self {
            current,
            previous,
            delta,
            direction: if delta >= 0.0 {
                Direction::Up
            } else {
                Direction::Down
            },
        }
    }
}

/// A calendar month, ordered by year then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar month before this one; January rolls back to December.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

/// Current and previous month windows for a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub current: YearMonth,
    pub previous: YearMonth,
}

impl MonthWindow {
    /// Window anchored on the latest dated record, if there is one.
    pub fn latest<'a, I>(records: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        let latest = records.into_iter().filter_map(|r| r.date).max()?;
        let current = YearMonth::of(latest);
        Some(Self {
            current,
            previous: current.previous(),
        })
    }

    /// Sum a metric over the current and previous months into a KPI.
    pub fn kpi<'a, I, F>(&self, records: I, metric: F) -> Kpi
    where
        I: IntoIterator<Item = &'a SalesRecord>,
        F: Fn(&SalesRecord) -> Option<f64>,
    {
        let mut current = 0.0;
        let mut previous = 0.0;

        for record in records {
            let Some(date) = record.date else {
                continue;
            };
            let value = metric(record).unwrap_or(0.0);
            let month = YearMonth::of(date);
            if month == self.current {
                current += value;
            } else if month == self.previous {
                previous += value;
            }
        }

        Kpi::new(current, previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(y: i32, m: u32, d: u32, spend: f64) -> SalesRecord {
        SalesRecord {
            date: NaiveDate::from_ymd_opt(y, m, d),
            offline_spend: Some(spend),
            ..Default::default()
        }
    }

    #[test]
    fn test_direction_up_on_zero_delta() {
        let kpi = Kpi::new(5.0, 5.0);
        assert_eq!(kpi.delta, 0.0);
        assert_eq!(kpi.direction, Direction::Up);
        assert_eq!(Kpi::default().direction, Direction::Up);
    }

    #[test]
    fn test_direction_down_on_negative_delta() {
        let kpi = Kpi::new(3.0, 10.0);
        assert_eq!(kpi.delta, -7.0);
        assert_eq!(kpi.direction, Direction::Down);
    }

    #[test]
    fn test_previous_month_rolls_over_year() {
        let jan = YearMonth { year: 2020, month: 1 };
        assert_eq!(jan.previous(), YearMonth { year: 2019, month: 12 });
        let jul = YearMonth { year: 2020, month: 7 };
        assert_eq!(jul.previous(), YearMonth { year: 2020, month: 6 });
    }

    #[test]
    fn test_december_vs_november() {
        let records = vec![
            sale(2019, 11, 3, 500.0),
            sale(2019, 11, 20, 300.0),
            sale(2019, 12, 1, 600.0),
            sale(2019, 12, 28, 400.0),
        ];

        let window = MonthWindow::latest(&records).unwrap();
        let kpi = window.kpi(&records, |r| r.offline_spend);
        assert_eq!(kpi.current, 1000.0);
        assert_eq!(kpi.previous, 800.0);
        assert_eq!(kpi.delta, 200.0);
        assert_eq!(kpi.direction, Direction::Up);
    }

    #[test]
    fn test_same_month_other_year_is_excluded() {
        let records = vec![
            sale(2018, 12, 5, 999.0),
            sale(2019, 12, 5, 100.0),
            sale(2020, 1, 5, 50.0),
        ];

        let window = MonthWindow::latest(&records).unwrap();
        assert_eq!(window.current, YearMonth { year: 2020, month: 1 });
        let kpi = window.kpi(&records, |r| r.offline_spend);
        assert_eq!(kpi.current, 50.0);
        assert_eq!(kpi.previous, 100.0);
        assert_eq!(kpi.direction, Direction::Down);
    }

    #[test]
    fn test_no_dates_has_no_window() {
        let records = vec![SalesRecord::default()];
        assert!(MonthWindow::latest(&records).is_none());
    }
}

//! Sales Table Widget
//! Paginated, sortable and filterable view over the filtered sales rows.

use crate::data::SalesTable;
use egui::{Color32, RichText, ScrollArea, TextEdit};
use std::cmp::Ordering;

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompareOp {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

/// A parsed per-column filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnFilter {
    /// Case-insensitive substring match.
    Contains(String),
    /// Numeric comparison such as `>= 100`.
    Compare(CompareOp, f64),
}

impl ColumnFilter {
    /// Parse filter text. Blank text means no filter.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        const OPS: [(&str, CompareOp); 6] = [
            (">=", CompareOp::Ge),
            ("<=", CompareOp::Le),
            ("!=", CompareOp::Ne),
            (">", CompareOp::Gt),
            ("<", CompareOp::Lt),
            ("=", CompareOp::Eq),
        ];

        for (prefix, op) in OPS {
            if let Some(rest) = text.strip_prefix(prefix) {
                if let Ok(number) = rest.trim().parse::<f64>() {
                    return Some(ColumnFilter::Compare(op, number));
                }
            }
        }

        Some(ColumnFilter::Contains(text.to_lowercase()))
    }

    pub fn matches(&self, cell: &str) -> bool {
        match self {
            ColumnFilter::Contains(needle) => cell.to_lowercase().contains(needle),
            ColumnFilter::Compare(op, rhs) => {
                let Ok(lhs) = cell.trim().parse::<f64>() else {
                    return false;
                };
                match op {
                    CompareOp::Gt => lhs > *rhs,
                    CompareOp::Ge => lhs >= *rhs,
                    CompareOp::Lt => lhs < *rhs,
                    CompareOp::Le => lhs <= *rhs,
                    CompareOp::Eq => lhs == *rhs,
                    CompareOp::Ne => lhs != *rhs,
                }
            }
        }
    }
}

/// Total order over cells: numbers first, compared numerically, then text.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// View state of the table: sort column, filters and current page.
pub struct SalesTableView {
    sort: Option<(usize, SortOrder)>,
    filters: Vec<String>,
    page: usize,
}

impl Default for SalesTableView {
    fn default() -> Self {
        Self {
            sort: None,
            filters: Vec::new(),
            page: 0,
        }
    }
}

impl SalesTableView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset filters and sorting for a new table.
    pub fn reset(&mut self, column_count: usize) {
        self.sort = None;
        self.filters = vec![String::new(); column_count];
        self.page = 0;
    }

    pub fn sort(&self) -> Option<(usize, SortOrder)> {
        self.sort
    }

    /// Sort by `column`, flipping the direction if it is already the sort column.
    pub fn toggle_sort(&mut self, column: usize) {
        self.sort = match self.sort {
            Some((current, SortOrder::Ascending)) if current == column => {
                Some((column, SortOrder::Descending))
            }
            _ => Some((column, SortOrder::Ascending)),
        };
    }

    pub fn set_filter(&mut self, column: usize, text: &str) {
        if column >= self.filters.len() {
            self.filters.resize(column + 1, String::new());
        }
        self.filters[column] = text.to_string();
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn page_count(visible: usize) -> usize {
        visible.div_ceil(PAGE_SIZE).max(1)
    }

    /// Rows of `rows` passing every column filter, in sort order.
    pub fn visible_rows(&self, table: &SalesTable, rows: &[usize]) -> Vec<usize> {
        let filters: Vec<(usize, ColumnFilter)> = self
            .filters
            .iter()
            .enumerate()
            .filter_map(|(c, text)| ColumnFilter::parse(text).map(|f| (c, f)))
            .collect();

        let cell = |row: usize, column: usize| {
            table
                .record(row)
                .and_then(|r| r.cells.get(column))
                .map(String::as_str)
                .unwrap_or("")
        };

        let mut visible: Vec<usize> = rows
            .iter()
            .copied()
            .filter(|&row| filters.iter().all(|(c, f)| f.matches(cell(row, *c))))
            .collect();

        if let Some((column, order)) = self.sort {
            visible.sort_by(|&a, &b| {
                let ord = compare_cells(cell(a, column), cell(b, column));
                match order {
                    SortOrder::Ascending => ord,
                    SortOrder::Descending => ord.reverse(),
                }
            });
        }

        visible
    }

    /// Keep the page index inside the available pages.
    pub fn clamp_page(&mut self, visible: usize) {
        self.page = self.page.min(Self::page_count(visible) - 1);
    }

    /// Draw the table for the given filtered rows.
    pub fn show(&mut self, ui: &mut egui::Ui, table: &SalesTable, rows: &[usize]) {
        let columns = table.columns();
        if self.filters.len() != columns.len() {
            self.reset(columns.len());
        }

        let visible = self.visible_rows(table, rows);
        self.clamp_page(visible.len());
        let pages = Self::page_count(visible.len());

        ui.horizontal(|ui| {
            ui.label(RichText::new("Sales").size(14.0).strong());
            ui.label(
                RichText::new(format!("{} of {} rows", visible.len(), rows.len()))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(4.0);

        ScrollArea::horizontal()
            .id_salt("sales_table_scroll")
            .show(ui, |ui| {
                egui::Grid::new("sales_table")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        // Headers
                        for (c, name) in columns.iter().enumerate() {
                            let arrow = match self.sort() {
                                Some((col, SortOrder::Ascending)) if col == c => " ▲",
                                Some((col, SortOrder::Descending)) if col == c => " ▼",
                                _ => "",
                            };
                            let header = RichText::new(format!("{}{}", name, arrow))
                                .strong()
                                .size(11.0);
                            if ui.button(header).clicked() {
                                self.toggle_sort(c);
                            }
                        }
                        ui.end_row();

                        // Filters
                        for filter in self.filters.iter_mut() {
                            ui.add(
                                TextEdit::singleline(filter)
                                    .hint_text("filter…")
                                    .desired_width(70.0),
                            );
                        }
                        ui.end_row();

                        let start = self.page * PAGE_SIZE;
                        for &row in visible.iter().skip(start).take(PAGE_SIZE) {
                            if let Some(record) = table.record(row) {
                                for value in &record.cells {
                                    ui.label(RichText::new(value).size(11.0));
                                }
                            }
                            ui.end_row();
                        }
                    });
            });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(self.page > 0, egui::Button::new("◀"))
                .clicked()
            {
                self.page -= 1;
            }
            ui.label(format!("Page {} / {}", self.page + 1, pages));
            if ui
                .add_enabled(self.page + 1 < pages, egui::Button::new("▶"))
                .clicked()
            {
                self.page += 1;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SalesRecord;

    fn table() -> SalesTable {
        let rows = [
            ["Chicago", "Apparel", "10"],
            ["New York", "Office", "2"],
            ["Chicago", "Nest-USA", "100"],
            ["California", "Bags", "abc"],
        ];
        let records = rows
            .iter()
            .map(|cells| SalesRecord {
                location: Some(cells[0].to_string()),
                cells: cells.iter().map(|c| c.to_string()).collect(),
                ..Default::default()
            })
            .collect();
        SalesTable::new(
            vec![
                "Location".to_string(),
                "Product_Category".to_string(),
                "Quantity".to_string(),
            ],
            records,
        )
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!(ColumnFilter::parse("   "), None);
        assert_eq!(
            ColumnFilter::parse(">= 10"),
            Some(ColumnFilter::Compare(CompareOp::Ge, 10.0))
        );
        assert_eq!(
            ColumnFilter::parse("<5"),
            Some(ColumnFilter::Compare(CompareOp::Lt, 5.0))
        );
        assert_eq!(
            ColumnFilter::parse("Chi"),
            Some(ColumnFilter::Contains("chi".to_string()))
        );
        // Operator without a number falls back to text
        assert_eq!(
            ColumnFilter::parse(">abc"),
            Some(ColumnFilter::Contains(">abc".to_string()))
        );
    }

    #[test]
    fn test_filters_combine_per_column() {
        let table = table();
        let mut view = SalesTableView::new();
        view.reset(3);

        view.set_filter(0, "chi");
        assert_eq!(view.visible_rows(&table, &[0, 1, 2, 3]), vec![0, 2]);

        view.set_filter(2, "> 50");
        assert_eq!(view.visible_rows(&table, &[0, 1, 2, 3]), vec![2]);
    }

    #[test]
    fn test_numeric_filter_skips_text_cells() {
        let table = table();
        let mut view = SalesTableView::new();
        view.reset(3);
        view.set_filter(2, "!= 10");
        assert_eq!(view.visible_rows(&table, &[0, 1, 2, 3]), vec![1, 2]);
    }

    #[test]
    fn test_sort_numeric_then_flip() {
        let table = table();
        let mut view = SalesTableView::new();
        view.reset(3);

        view.toggle_sort(2);
        assert_eq!(view.sort(), Some((2, SortOrder::Ascending)));
        assert_eq!(view.visible_rows(&table, &[0, 1, 2]), vec![1, 0, 2]);

        view.toggle_sort(2);
        assert_eq!(view.sort(), Some((2, SortOrder::Descending)));
        assert_eq!(view.visible_rows(&table, &[0, 1, 2]), vec![2, 0, 1]);

        view.toggle_sort(0);
        assert_eq!(view.sort(), Some((0, SortOrder::Ascending)));
        assert_eq!(view.visible_rows(&table, &[0, 1, 2, 3]), vec![3, 0, 2, 1]);
    }

    #[test]
    fn test_compare_cells_orders_numbers_before_text() {
        assert_eq!(compare_cells("9", "10"), Ordering::Less);
        assert_eq!(compare_cells("10", "1a"), Ordering::Less);
        assert_eq!(compare_cells("1a", "9"), Ordering::Greater);
        assert_eq!(compare_cells(" 2.5", "2.5"), Ordering::Equal);
    }

    #[test]
    fn test_sort_mixed_column() {
        let records: Vec<SalesRecord> = (0..3000u64)
            .map(|i| {
                let x = i.wrapping_mul(2654435761) % 1000;
                let cell = if x % 3 == 0 {
                    format!("{}a", x)
                } else {
                    x.to_string()
                };
                SalesRecord {
                    cells: vec![cell],
                    ..Default::default()
                }
            })
            .collect();
        let table = SalesTable::new(vec!["Coupon".to_string()], records);
        let rows: Vec<usize> = (0..table.len()).collect();

        let mut view = SalesTableView::new();
        view.reset(1);
        view.toggle_sort(0);
        let sorted = view.visible_rows(&table, &rows);
        assert_eq!(sorted.len(), rows.len());

        let cells: Vec<&str> = sorted
            .iter()
            .map(|&r| table.record(r).unwrap().cells[0].as_str())
            .collect();
        assert!(cells
            .windows(2)
            .all(|w| compare_cells(w[0], w[1]) != Ordering::Greater));

        let first_text = cells
            .iter()
            .position(|c| c.parse::<f64>().is_err())
            .unwrap();
        assert!(cells[first_text..].iter().all(|c| c.parse::<f64>().is_err()));
    }

    #[test]
    fn test_only_given_rows_are_shown() {
        let table = table();
        let view = SalesTableView::new();
        assert_eq!(view.visible_rows(&table, &[3, 1]), vec![3, 1]);
    }

    #[test]
    fn test_paging() {
        assert_eq!(SalesTableView::page_count(0), 1);
        assert_eq!(SalesTableView::page_count(10), 1);
        assert_eq!(SalesTableView::page_count(11), 2);

        let mut view = SalesTableView::new();
        view.set_page(4);
        view.clamp_page(25);
        assert_eq!(view.page(), 2);
        view.clamp_page(0);
        assert_eq!(view.page(), 0);
    }
}

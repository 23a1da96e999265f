//! In-memory tabular sheets, independent of the xlsx encoding.

use adscout_core::{AdRecord, IndustrySheet, ResultTable, COLUMNS};

/// One spreadsheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    fn text(value: Option<&str>) -> Self {
        value.map_or(Cell::Empty, |s| Cell::Text(s.to_owned()))
    }

    #[allow(clippy::cast_precision_loss)]
    fn count(value: Option<i64>) -> Self {
        value.map_or(Cell::Empty, |n| Cell::Number(n as f64))
    }

    fn number(value: Option<f64>) -> Self {
        value.map_or(Cell::Empty, Cell::Number)
    }
}

/// A named sheet: a header row plus data rows.
///
/// Rows may be shorter than `columns`; missing trailing cells are empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Cell at (`row`, column named `column`), if both exist.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(index)
    }
}

impl From<&IndustrySheet> for Sheet {
    fn from(industry: &IndustrySheet) -> Self {
        let mut sheet = Sheet::new(
            industry.name.clone(),
            COLUMNS.iter().map(ToString::to_string).collect(),
        );
        sheet.rows = industry.records.iter().map(record_row).collect();
        sheet
    }
}

/// One sheet per [`IndustrySheet`], in table order.
#[must_use]
pub fn sheets_from_table(table: &ResultTable) -> Vec<Sheet> {
    table.sheets.iter().map(Sheet::from).collect()
}

/// Cells for `record` in [`COLUMNS`] order.
#[must_use]
pub fn record_row(record: &AdRecord) -> Vec<Cell> {
    vec![
        Cell::Text(record.ad_id.clone()),
        Cell::text(record.brand_name.as_deref()),
        Cell::Text(record.industry.clone()),
        Cell::Number(record.ctr),
        Cell::text(record.objective.as_deref()),
        Cell::count(record.likes),
        Cell::count(record.comments),
        Cell::count(record.shares),
        Cell::text(record.video_url.as_deref()),
        Cell::text(record.video_cover_url.as_deref()),
        Cell::number(record.video_duration),
        Cell::text(record.landing_page.as_deref()),
        Cell::text(record.description.as_deref()),
    ]
}

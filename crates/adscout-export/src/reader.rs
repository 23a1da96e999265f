use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::ExportError;
use crate::sheet::{Cell, Sheet};

/// Reads every sheet of the workbook at `path`, in workbook order.
///
/// The first row of each sheet is its header; an empty sheet yields no
/// columns and no rows. Data rows are cut or padded to the header width.
///
/// # Errors
///
/// - [`ExportError::Open`] if the file cannot be opened as a spreadsheet.
/// - [`ExportError::ReadSheet`] if a sheet cannot be decoded.
pub fn read_workbook(path: &Path) -> Result<Vec<Sheet>, ExportError> {
    let display = path.display().to_string();
    let mut workbook = open_workbook_auto(path).map_err(|source| ExportError::Open {
        path: display.clone(),
        source,
    })?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|source| ExportError::ReadSheet {
                path: display.clone(),
                sheet: name.clone(),
                source,
            })?;

        let mut rows = range.rows();
        let columns: Vec<String> = rows
            .next()
            .map(|header| header.iter().map(header_text).collect())
            .unwrap_or_default();
        let width = columns.len();

        let mut sheet = Sheet::new(name, columns);
        sheet.rows = rows
            .map(|row| {
                let mut cells: Vec<Cell> = row.iter().take(width).map(cell_value).collect();
                cells.resize(width, Cell::Empty);
                cells
            })
            .collect();
        tracing::debug!(path = %path.display(), sheet = %sheet.name, rows = sheet.rows.len(), "read worksheet");
        sheets.push(sheet);
    }

    Ok(sheets)
}

fn header_text(data: &Data) -> String {
    match data {
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn cell_value(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        other => Cell::Text(other.to_string()),
    }
}

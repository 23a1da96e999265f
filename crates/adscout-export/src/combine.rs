//! Sheet combiner: every sheet of a workbook stacked into one.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::ExportError;
use crate::reader::read_workbook;
use crate::sheet::{Cell, Sheet};
use crate::writer::write_workbook;

pub const COMBINED_SHEET_NAME: &str = "Combined_Data";

/// Concatenates the rows of `sheets` into a single sheet.
///
/// Columns are the union of all sheets' columns in first-seen order. A name
/// repeated within one sheet becomes `name.1`, `name.2`, ... so no cell is
/// overwritten. Rows keep sheet order, then within-sheet order; a cell whose
/// column its sheet lacks is left empty. Sheets without rows contribute
/// nothing but their columns.
#[must_use]
pub fn combine_sheets(sheets: &[Sheet]) -> Sheet {
    let mut columns: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let positions: Vec<Vec<usize>> = sheets
        .iter()
        .map(|sheet| {
            distinct_headers(&sheet.columns)
                .into_iter()
                .map(|column| {
                    *index.entry(column).or_insert_with_key(|column| {
                        columns.push(column.clone());
                        columns.len() - 1
                    })
                })
                .collect()
        })
        .collect();

    let width = columns.len();
    let mut combined = Sheet::new(COMBINED_SHEET_NAME, columns);
    for (sheet, positions) in sheets.iter().zip(&positions) {
        for row in &sheet.rows {
            let mut out = vec![Cell::Empty; width];
            for (cell, &pos) in row.iter().zip(positions) {
                out[pos] = cell.clone();
            }
            combined.rows.push(out);
        }
    }

    combined
}

/// Renames repeats within one header row: `x, x, x` becomes `x, x.1, x.2`.
fn distinct_headers(columns: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    columns
        .iter()
        .map(|column| {
            let mut name = column.clone();
            let mut n = 0;
            while seen.contains(&name) {
                n += 1;
                name = format!("{column}.{n}");
            }
            seen.insert(name.clone());
            name
        })
        .collect()
}

/// Reads every sheet of `input`, combines them, and writes the result to
/// `output` as a single `Combined_Data` sheet.
///
/// Returns the combined sheet.
///
/// # Errors
///
/// Propagates [`read_workbook`] and [`write_workbook`] errors.
pub fn combine_workbook(input: &Path, output: &Path) -> Result<Sheet, ExportError> {
    let sheets = read_workbook(input)?;
    let combined = combine_sheets(&sheets);
    write_workbook(std::slice::from_ref(&combined), output)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        sheets = sheets.len(),
        rows = combined.rows.len(),
        "workbook combined"
    );
    Ok(combined)
}

use std::path::Path;

use adscout_core::ResultTable;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet};

use crate::error::ExportError;
use crate::sheet::{sheets_from_table, Cell, Sheet};
use crate::sheet_name::unique_sheet_names;

/// Writes one worksheet per [`adscout_core::IndustrySheet`] in `table`.
///
/// # Errors
///
/// See [`write_workbook`].
pub fn write_result_table(table: &ResultTable, path: &Path) -> Result<(), ExportError> {
    write_workbook(&sheets_from_table(table), path)
}

/// Writes `sheets` to a new xlsx file at `path`, replacing any existing file.
///
/// Each sheet gets a bold header row followed by its data rows. Numbers are
/// stored as numeric cells and [`Cell::Empty`] leaves the cell blank. Sheet
/// names pass through [`unique_sheet_names`]. An empty `sheets` slice still
/// produces a valid workbook with a single blank sheet.
///
/// # Errors
///
/// - [`ExportError::TooLarge`] if a sheet exceeds the xlsx row/column limits.
/// - [`ExportError::Xlsx`] if the workbook cannot be encoded or saved.
pub fn write_workbook(sheets: &[Sheet], path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let names = unique_sheet_names(sheets.iter().map(|s| s.name.as_str()));

    if sheets.is_empty() {
        workbook.add_worksheet().set_name("Sheet")?;
    }

    for (sheet, name) in sheets.iter().zip(&names) {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name)?;
        write_sheet(worksheet, sheet, &header)?;
        tracing::debug!(sheet = %name, rows = sheet.rows.len(), "wrote worksheet");
    }

    workbook.save(path)?;
    tracing::info!(path = %path.display(), sheets = sheets.len(), "workbook saved");
    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet, header: &Format) -> Result<(), ExportError> {
    let too_large = || ExportError::TooLarge {
        sheet: sheet.name.clone(),
    };

    for (col, title) in sheet.columns.iter().enumerate() {
        let col = ColNum::try_from(col).map_err(|_| too_large())?;
        worksheet.write_string_with_format(0, col, title, header)?;
    }

    for (index, row) in sheet.rows.iter().enumerate() {
        let row_num = RowNum::try_from(index + 1).map_err(|_| too_large())?;
        for (col, cell) in row.iter().enumerate() {
            let col = ColNum::try_from(col).map_err(|_| too_large())?;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) if s.is_empty() => {}
                Cell::Text(s) => {
                    worksheet.write_string(row_num, col, s)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row_num, col, *n)?;
                }
                Cell::Bool(b) => {
                    worksheet.write_boolean(row_num, col, *b)?;
                }
            }
        }
    }

    Ok(())
}

pub mod combine;
pub mod error;
pub mod reader;
pub mod sheet;
pub mod sheet_name;
pub mod writer;

pub use combine::{combine_sheets, combine_workbook, COMBINED_SHEET_NAME};
pub use error::ExportError;
pub use reader::read_workbook;
pub use sheet::{record_row, Cell, Sheet};
pub use sheet_name::{sanitize_sheet_name, unique_sheet_names};
pub use writer::{write_result_table, write_workbook};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to open workbook {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to read sheet \"{sheet}\" from {path}: {source}")]
    ReadSheet {
        path: String,
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("sheet \"{sheet}\" has more rows or columns than xlsx allows")]
    TooLarge { sheet: String },
}

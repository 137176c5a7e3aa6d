/// Error type for workbook operations.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Rows and columns are 1-based.
    #[error("Invalid cell position: row {row}, column {column}")]
    InvalidPosition { row: usize, column: usize },

    #[error("Workbook I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

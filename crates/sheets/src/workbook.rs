//! The `Workbook` trait and row types.

use std::collections::BTreeMap;

use anicama_core::ingest::CellValue;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// Formatting applied to a whole row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowStyle {
    pub bold: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
}

impl RowStyle {
    pub fn background(color: &str) -> Self {
        Self {
            background: Some(color.to_string()),
            ..Self::default()
        }
    }
}

/// One row as stored in a sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRow {
    pub cells: Vec<CellValue>,
    #[serde(default)]
    pub style: RowStyle,
    /// Number formats keyed by 1-based column.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub number_formats: BTreeMap<usize, String>,
}

impl StoredRow {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self {
            cells,
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: RowStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_number_format(mut self, column: usize, format: &str) -> Self {
        self.number_formats.insert(column, format.to_string());
        self
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_blank)
    }
}

impl From<Vec<CellValue>> for StoredRow {
    fn from(cells: Vec<CellValue>) -> Self {
        Self::new(cells)
    }
}

/// A spreadsheet made of named sheets. Rows and columns are 1-based.
///
/// A row is written together with its style and number formats, so one
/// call is one change. Each method is atomic on its own; implementations
/// that persist must leave nothing behind when a call fails.
#[async_trait]
pub trait Workbook: Send + Sync {
    /// Create the sheet if it does not exist. Returns `true` when created.
    async fn ensure_sheet(&self, sheet: &str) -> Result<bool, SheetError>;

    /// Read `width` cells of a row. Missing rows and cells read as blank text.
    async fn read_row(
        &self,
        sheet: &str,
        row: usize,
        width: usize,
    ) -> Result<Vec<CellValue>, SheetError>;

    /// Overwrite a row, growing the sheet if needed.
    async fn write_row(&self, sheet: &str, row: usize, data: StoredRow) -> Result<(), SheetError>;

    /// Insert a row at `row`, shifting that row and everything below down.
    async fn insert_row(&self, sheet: &str, row: usize, data: StoredRow)
        -> Result<(), SheetError>;

    /// Append a row after the last one. Returns the new row's number.
    async fn append_row(&self, sheet: &str, data: StoredRow) -> Result<usize, SheetError>;

    /// Remove every row, keeping the sheet.
    async fn clear_sheet(&self, sheet: &str) -> Result<(), SheetError>;

    /// Number of the last row, `0` for an empty sheet.
    async fn last_row(&self, sheet: &str) -> Result<usize, SheetError>;

    /// Fetch a stored row, if present.
    async fn row(&self, sheet: &str, row: usize) -> Result<Option<StoredRow>, SheetError>;
}

//! In-process workbook.

use std::collections::BTreeMap;

use anicama_core::ingest::CellValue;
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::SheetError;
use crate::workbook::{RowStyle, StoredRow, Workbook};

/// Sheet name to rows; index 0 is row 1.
pub type Sheets = BTreeMap<String, Vec<StoredRow>>;

/// Workbook held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryWorkbook {
    sheets: Mutex<Sheets>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sheets(sheets: Sheets) -> Self {
        Self {
            sheets: Mutex::new(sheets),
        }
    }

    /// Clone of the current contents.
    pub async fn snapshot(&self) -> Sheets {
        self.sheets.lock().await.clone()
    }

    pub async fn sheet_names(&self) -> Vec<String> {
        self.sheets.lock().await.keys().cloned().collect()
    }

    /// Swap in new contents wholesale.
    pub(crate) async fn replace(&self, sheets: Sheets) {
        *self.sheets.lock().await = sheets;
    }
}

fn check_position(row: usize, column: usize) -> Result<(), SheetError> {
    if row == 0 || column == 0 {
        return Err(SheetError::InvalidPosition { row, column });
    }
    Ok(())
}

fn check_row(row: usize, data: &StoredRow) -> Result<(), SheetError> {
    check_position(row, 1)?;
    match data.number_formats.keys().find(|column| **column == 0) {
        Some(_) => Err(SheetError::InvalidPosition { row, column: 0 }),
        None => Ok(()),
    }
}

fn rows<'a>(sheets: &'a Sheets, sheet: &str) -> Result<&'a Vec<StoredRow>, SheetError> {
    sheets
        .get(sheet)
        .ok_or_else(|| SheetError::SheetNotFound(sheet.to_string()))
}

fn rows_mut<'a>(sheets: &'a mut Sheets, sheet: &str) -> Result<&'a mut Vec<StoredRow>, SheetError> {
    sheets
        .get_mut(sheet)
        .ok_or_else(|| SheetError::SheetNotFound(sheet.to_string()))
}

/// Synchronous edits over a [`Sheets`] map. [`MemoryWorkbook`] applies them
/// under its lock; the file workbook applies them to a copy first.
pub(crate) mod edit {
    use super::*;

    pub fn ensure_sheet(sheets: &mut Sheets, sheet: &str) -> bool {
        if sheets.contains_key(sheet) {
            return false;
        }
        sheets.insert(sheet.to_string(), Vec::new());
        true
    }

    pub fn write_row(
        sheets: &mut Sheets,
        sheet: &str,
        row: usize,
        data: StoredRow,
    ) -> Result<(), SheetError> {
        check_row(row, &data)?;
        let rows = rows_mut(sheets, sheet)?;
        if rows.len() < row {
            rows.resize_with(row, StoredRow::default);
        }
        rows[row - 1] = data;
        Ok(())
    }

    pub fn insert_row(
        sheets: &mut Sheets,
        sheet: &str,
        row: usize,
        data: StoredRow,
    ) -> Result<(), SheetError> {
        check_row(row, &data)?;
        let rows = rows_mut(sheets, sheet)?;
        if rows.len() < row - 1 {
            rows.resize_with(row - 1, StoredRow::default);
        }
        rows.insert(row - 1, data);
        Ok(())
    }

    pub fn append_row(
        sheets: &mut Sheets,
        sheet: &str,
        data: StoredRow,
    ) -> Result<usize, SheetError> {
        let rows = rows_mut(sheets, sheet)?;
        check_row(rows.len() + 1, &data)?;
        rows.push(data);
        Ok(rows.len())
    }

    pub fn clear_sheet(sheets: &mut Sheets, sheet: &str) -> Result<(), SheetError> {
        rows_mut(sheets, sheet)?.clear();
        Ok(())
    }
}

#[async_trait]
impl Workbook for MemoryWorkbook {
    async fn ensure_sheet(&self, sheet: &str) -> Result<bool, SheetError> {
        Ok(edit::ensure_sheet(&mut *self.sheets.lock().await, sheet))
    }

    async fn read_row(
        &self,
        sheet: &str,
        row: usize,
        width: usize,
    ) -> Result<Vec<CellValue>, SheetError> {
        check_position(row, 1)?;
        let sheets = self.sheets.lock().await;
        let stored = rows(&sheets, sheet)?
            .get(row - 1)
            .map(|r| r.cells.as_slice())
            .unwrap_or(&[]);
        Ok((0..width)
            .map(|i| {
                stored
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| CellValue::Text(String::new()))
            })
            .collect())
    }

    async fn write_row(&self, sheet: &str, row: usize, data: StoredRow) -> Result<(), SheetError> {
        edit::write_row(&mut *self.sheets.lock().await, sheet, row, data)
    }

    async fn insert_row(
        &self,
        sheet: &str,
        row: usize,
        data: StoredRow,
    ) -> Result<(), SheetError> {
        edit::insert_row(&mut *self.sheets.lock().await, sheet, row, data)
    }

    async fn append_row(&self, sheet: &str, data: StoredRow) -> Result<usize, SheetError> {
        edit::append_row(&mut *self.sheets.lock().await, sheet, data)
    }

    async fn clear_sheet(&self, sheet: &str) -> Result<(), SheetError> {
        edit::clear_sheet(&mut *self.sheets.lock().await, sheet)
    }

    async fn last_row(&self, sheet: &str) -> Result<usize, SheetError> {
        let sheets = self.sheets.lock().await;
        rows(&sheets, sheet).map(Vec::len)
    }

    async fn row(&self, sheet: &str, row: usize) -> Result<Option<StoredRow>, SheetError> {
        check_position(row, 1)?;
        let sheets = self.sheets.lock().await;
        Ok(rows(&sheets, sheet)?.get(row - 1).cloned())
    }
}

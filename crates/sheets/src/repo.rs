//! Repository for the lead sheet.
//!
//! Owns the sequence the webhook runs for every accepted lead: make sure the
//! destination sheet exists, write the header if row 1 is blank, append the
//! lead together with its formatting.

use std::sync::Arc;

use anicama_core::ingest::{
    is_alternate_row, is_blank_row, CellValue, ALTERNATE_ROW_BACKGROUND, HEADER_BACKGROUND,
    HEADER_FONT_COLOR, LEAD_SHEET_HEADERS, TIMESTAMP_NUMBER_FORMAT,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::SheetError;
use crate::workbook::{RowStyle, StoredRow, Workbook};

const HEADER_ROW: usize = 1;
const TIMESTAMP_COLUMN: usize = 1;

/// What happened while appending one lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    /// Sheet row number of the appended lead.
    pub row: usize,
    /// 1-based position among data rows (header excluded).
    pub data_row: usize,
    pub sheet_created: bool,
    pub header_written: bool,
}

/// Basic lead counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadStats {
    pub total_leads: usize,
    pub last_update: Option<DateTime<Utc>>,
}

/// Lead sheet access over any [`Workbook`].
pub struct LeadSheetRepo {
    workbook: Arc<dyn Workbook>,
    sheet: String,
    /// Held for the whole header-check-and-append sequence so concurrent
    /// requests cannot both write a header or pick the same row parity.
    append_lock: Mutex<()>,
}

impl LeadSheetRepo {
    pub fn new(workbook: Arc<dyn Workbook>, sheet: impl Into<String>) -> Self {
        Self {
            workbook,
            sheet: sheet.into(),
            append_lock: Mutex::new(()),
        }
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet
    }

    pub fn workbook(&self) -> &Arc<dyn Workbook> {
        &self.workbook
    }

    /// Write the header row if row 1 holds nothing. Returns `true` if written.
    pub async fn ensure_header(&self) -> Result<bool, SheetError> {
        let first = self
            .workbook
            .read_row(&self.sheet, HEADER_ROW, LEAD_SHEET_HEADERS.len())
            .await?;
        if !is_blank_row(&first) {
            return Ok(false);
        }

        self.workbook
            .write_row(&self.sheet, HEADER_ROW, header_row())
            .await?;
        tracing::info!(sheet = %self.sheet, "Lead sheet header written");
        Ok(true)
    }

    /// Push every existing row down by one and write the header into row 1.
    ///
    /// For sheets that were filled before the header existed.
    pub async fn insert_header(&self) -> Result<(), SheetError> {
        let _guard = self.append_lock.lock().await;
        self.ensure_sheet().await?;
        self.workbook
            .insert_row(&self.sheet, HEADER_ROW, header_row())
            .await?;
        tracing::info!(sheet = %self.sheet, "Lead sheet header inserted");
        Ok(())
    }

    /// Drop every row and start over with just the header.
    pub async fn reset(&self) -> Result<(), SheetError> {
        let _guard = self.append_lock.lock().await;
        self.ensure_sheet().await?;
        self.workbook.clear_sheet(&self.sheet).await?;
        self.workbook
            .write_row(&self.sheet, HEADER_ROW, header_row())
            .await?;
        tracing::warn!(sheet = %self.sheet, "Lead sheet reset");
        Ok(())
    }

    /// Append one lead row, provisioning the sheet and header as needed.
    ///
    /// The row goes in with its shading and timestamp format in one write.
    pub async fn append(&self, cells: Vec<CellValue>) -> Result<AppendOutcome, SheetError> {
        let _guard = self.append_lock.lock().await;

        let sheet_created = self.ensure_sheet().await?;
        let header_written = self.ensure_header().await?;

        let next_data_row = self
            .workbook
            .last_row(&self.sheet)
            .await?
            .saturating_sub(HEADER_ROW)
            + 1;
        let mut data = StoredRow::new(cells)
            .with_number_format(TIMESTAMP_COLUMN, TIMESTAMP_NUMBER_FORMAT);
        if is_alternate_row(next_data_row) {
            data = data.with_style(RowStyle::background(ALTERNATE_ROW_BACKGROUND));
        }

        let row = self.workbook.append_row(&self.sheet, data).await?;
        let data_row = row.saturating_sub(HEADER_ROW);

        tracing::info!(sheet = %self.sheet, row, data_row, "Lead appended");
        Ok(AppendOutcome {
            row,
            data_row,
            sheet_created,
            header_written,
        })
    }

    async fn ensure_sheet(&self) -> Result<bool, SheetError> {
        let created = self.workbook.ensure_sheet(&self.sheet).await?;
        if created {
            tracing::info!(sheet = %self.sheet, "Lead sheet created");
        }
        Ok(created)
    }

    /// Count leads and find the latest timestamp. A missing sheet has none.
    pub async fn stats(&self) -> Result<LeadStats, SheetError> {
        let last_row = match self.workbook.last_row(&self.sheet).await {
            Ok(n) => n,
            Err(SheetError::SheetNotFound(_)) => {
                return Ok(LeadStats {
                    total_leads: 0,
                    last_update: None,
                })
            }
            Err(e) => return Err(e),
        };

        let last_update = if last_row > HEADER_ROW {
            self.workbook
                .row(&self.sheet, last_row)
                .await?
                .and_then(|r| r.cells.first().and_then(CellValue::as_timestamp))
        } else {
            None
        };

        Ok(LeadStats {
            total_leads: last_row.saturating_sub(HEADER_ROW),
            last_update,
        })
    }
}

fn header_row() -> StoredRow {
    StoredRow::new(LEAD_SHEET_HEADERS.iter().map(|h| CellValue::from(*h)).collect()).with_style(
        RowStyle {
            bold: true,
            background: Some(HEADER_BACKGROUND.to_string()),
            font_color: Some(HEADER_FONT_COLOR.to_string()),
        },
    )
}

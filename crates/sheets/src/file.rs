//! JSON-file-backed workbook.
//!
//! Keeps a [`MemoryWorkbook`] in front of a single JSON file. Every mutation
//! is applied to a copy of the current contents, the copy is written to disk,
//! and only then does it replace what is held in memory. A failed write leaves
//! both memory and file as they were. Writes go to a sibling temp file that is
//! then renamed over the previous file, so a crash never leaves a truncated
//! workbook.

use std::path::{Path, PathBuf};

use anicama_core::ingest::CellValue;
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::SheetError;
use crate::memory::{edit, MemoryWorkbook, Sheets};
use crate::workbook::{StoredRow, Workbook};

#[derive(Debug)]
pub struct FileWorkbook {
    path: PathBuf,
    inner: MemoryWorkbook,
    /// Serialises commits so snapshots hit disk in order.
    write_lock: Mutex<()>,
}

impl FileWorkbook {
    /// Open a workbook file, starting empty if it does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SheetError> {
        let path = path.as_ref().to_path_buf();
        let sheets: Sheets = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Sheets::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::info!(path = %path.display(), sheets = sheets.len(), "Opened workbook file");
        Ok(Self {
            path,
            inner: MemoryWorkbook::from_sheets(sheets),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    /// Apply `op` to a copy, persist the copy, then swap it in.
    ///
    /// `op` returning `Ok(None)` means nothing changed and skips the write.
    async fn commit<T>(
        &self,
        op: impl FnOnce(&mut Sheets) -> Result<Option<T>, SheetError>,
        unchanged: T,
    ) -> Result<T, SheetError> {
        let _guard = self.write_lock.lock().await;
        let mut next = self.inner.snapshot().await;
        let Some(out) = op(&mut next)? else {
            return Ok(unchanged);
        };
        self.persist(&next).await?;
        self.inner.replace(next).await;
        Ok(out)
    }

    async fn persist(&self, sheets: &Sheets) -> Result<(), SheetError> {
        let bytes = serde_json::to_vec_pretty(sheets)?;
        let tmp = self.temp_path();
        if let Err(e) = write_and_rename(&tmp, &self.path, bytes).await {
            tracing::error!(path = %self.path.display(), error = %e, "Workbook persist failed");
            return Err(e.into());
        }
        tracing::debug!(path = %self.path.display(), "Workbook persisted");
        Ok(())
    }
}

async fn write_and_rename(tmp: &Path, path: &Path, bytes: Vec<u8>) -> std::io::Result<()> {
    tokio::fs::write(tmp, bytes).await?;
    tokio::fs::rename(tmp, path).await
}

#[async_trait]
impl Workbook for FileWorkbook {
    async fn ensure_sheet(&self, sheet: &str) -> Result<bool, SheetError> {
        self.commit(
            |sheets| Ok(edit::ensure_sheet(sheets, sheet).then_some(true)),
            false,
        )
        .await
    }

    async fn read_row(
        &self,
        sheet: &str,
        row: usize,
        width: usize,
    ) -> Result<Vec<CellValue>, SheetError> {
        self.inner.read_row(sheet, row, width).await
    }

    async fn write_row(&self, sheet: &str, row: usize, data: StoredRow) -> Result<(), SheetError> {
        self.commit(|sheets| edit::write_row(sheets, sheet, row, data).map(Some), ())
            .await
    }

    async fn insert_row(
        &self,
        sheet: &str,
        row: usize,
        data: StoredRow,
    ) -> Result<(), SheetError> {
        self.commit(|sheets| edit::insert_row(sheets, sheet, row, data).map(Some), ())
            .await
    }

    async fn append_row(&self, sheet: &str, data: StoredRow) -> Result<usize, SheetError> {
        self.commit(|sheets| edit::append_row(sheets, sheet, data).map(Some), 0)
            .await
    }

    async fn clear_sheet(&self, sheet: &str) -> Result<(), SheetError> {
        self.commit(|sheets| edit::clear_sheet(sheets, sheet).map(Some), ())
            .await
    }

    async fn last_row(&self, sheet: &str) -> Result<usize, SheetError> {
        self.inner.last_row(sheet).await
    }

    async fn row(&self, sheet: &str, row: usize) -> Result<Option<StoredRow>, SheetError> {
        self.inner.row(sheet, row).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::RowStyle;
    use assert_matches::assert_matches;

    fn named(name: &str) -> StoredRow {
        StoredRow::new(vec![name.into()])
    }

    #[tokio::test]
    async fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let wb = FileWorkbook::open(dir.path().join("leads.json")).await.unwrap();
        assert_matches!(wb.last_row("Leads").await, Err(SheetError::SheetNotFound(_)));
    }

    #[tokio::test]
    async fn rows_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.json");

        {
            let wb = FileWorkbook::open(&path).await.unwrap();
            wb.ensure_sheet("Leads").await.unwrap();
            wb.append_row(
                "Leads",
                named("Ana").with_style(RowStyle::background("#f8f9fa")),
            )
            .await
            .unwrap();
        }

        let wb = FileWorkbook::open(&path).await.unwrap();
        assert_eq!(wb.last_row("Leads").await.unwrap(), 1);
        let stored = wb.row("Leads", 1).await.unwrap().unwrap();
        assert_eq!(stored.cells[0].as_text(), Some("Ana"));
        assert_eq!(stored.style.background.as_deref(), Some("#f8f9fa"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn insert_and_clear_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.json");

        {
            let wb = FileWorkbook::open(&path).await.unwrap();
            wb.ensure_sheet("Leads").await.unwrap();
            wb.ensure_sheet("Old").await.unwrap();
            wb.append_row("Leads", named("Ana")).await.unwrap();
            wb.insert_row("Leads", 1, named("Top")).await.unwrap();
            wb.append_row("Old", named("x")).await.unwrap();
            wb.clear_sheet("Old").await.unwrap();
        }

        let wb = FileWorkbook::open(&path).await.unwrap();
        assert_eq!(wb.last_row("Leads").await.unwrap(), 2);
        let first = wb.row("Leads", 1).await.unwrap().unwrap();
        assert_eq!(first.cells[0].as_text(), Some("Top"));
        assert_eq!(wb.last_row("Old").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_write_leaves_no_row_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.json");
        let wb = FileWorkbook::open(&path).await.unwrap();
        wb.ensure_sheet("Leads").await.unwrap();
        assert_eq!(wb.append_row("Leads", named("Ana")).await.unwrap(), 1);

        // A directory in the temp file's place makes the write fail.
        let blocker = path.with_extension("json.tmp");
        std::fs::create_dir(&blocker).unwrap();
        assert_matches!(
            wb.append_row("Leads", named("Luis")).await,
            Err(SheetError::Io(_))
        );
        assert_eq!(wb.last_row("Leads").await.unwrap(), 1);

        std::fs::remove_dir(&blocker).unwrap();
        assert_eq!(wb.append_row("Leads", named("Eva")).await.unwrap(), 2);

        let reopened = FileWorkbook::open(&path).await.unwrap();
        assert_eq!(reopened.last_row("Leads").await.unwrap(), 2);
        let second = reopened.row("Leads", 2).await.unwrap().unwrap();
        assert_eq!(second.cells[0].as_text(), Some("Eva"));
    }

    #[tokio::test]
    async fn failed_sheet_creation_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.json");
        let wb = FileWorkbook::open(&path).await.unwrap();

        let blocker = path.with_extension("json.tmp");
        std::fs::create_dir(&blocker).unwrap();
        assert_matches!(wb.ensure_sheet("Leads").await, Err(SheetError::Io(_)));
        assert_matches!(wb.last_row("Leads").await, Err(SheetError::SheetNotFound(_)));

        std::fs::remove_dir(&blocker).unwrap();
        assert!(wb.ensure_sheet("Leads").await.unwrap());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_an_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.json");
        std::fs::write(&path, b"{not json").unwrap();
        assert_matches!(
            FileWorkbook::open(&path).await,
            Err(SheetError::Encoding(_))
        );
    }
}

//! Spreadsheet sink for lead submissions.
//!
//! [`Workbook`] abstracts the spreadsheet platform as a set of named sheets
//! with 1-based rows. [`MemoryWorkbook`] keeps everything in process and
//! [`FileWorkbook`] persists the same structure as JSON. [`LeadSheetRepo`]
//! runs the header-then-append sequence the webhook needs.

pub mod error;
pub mod file;
pub mod memory;
pub mod repo;
pub mod workbook;

pub use error::SheetError;
pub use file::FileWorkbook;
pub use memory::MemoryWorkbook;
pub use repo::{AppendOutcome, LeadSheetRepo, LeadStats};
pub use workbook::{RowStyle, StoredRow, Workbook};

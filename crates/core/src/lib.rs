//! Core lead-capture logic for the Anicama landing page.
//!
//! Pure, I/O-free building blocks shared by the submitter and the ingestion
//! endpoint: site configuration, the lead data model, field validation, and
//! the spreadsheet row layout.

pub mod config;
pub mod error;
pub mod ingest;
pub mod lead;
pub mod validation;

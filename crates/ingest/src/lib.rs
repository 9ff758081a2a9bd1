//! `tallybook-ingest` — Statement ingestion.
//!
//! Turns arbitrarily-shaped bank/business spreadsheets into normalized
//! [`StatementLine`](tallybook_core::StatementLine)s: header-row detection,
//! column-name mapping against a keyword table, and row parsing with
//! skip-and-count failure semantics. Malformed cells never abort an import.

pub mod columns;
pub mod error;
pub mod ingest;
pub mod table;
pub mod workbook;

pub use columns::{detect_header, map_columns, ColumnMap};
pub use error::IngestError;
pub use ingest::{ingest_table, IngestResult};
pub use table::RawTable;
pub use workbook::{load_csv, load_workbook, select_sheet};

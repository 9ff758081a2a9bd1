//! Row parsing: raw table → normalized statement lines.

use chrono::NaiveDate;
use tallybook_core::{parse_amount, StatementLine};

use crate::columns::{detect_header, map_columns};
use crate::error::IngestError;
use crate::table::RawTable;

/// Outcome of one ingestion pass over a raw table.
#[derive(Debug, Default)]
pub struct IngestResult {
    pub lines: Vec<StatementLine>,
    /// Index of the row used as the header.
    pub header_row: usize,
    /// True when no header row was detected and row 0 was assumed.
    pub degraded_header: bool,
    /// Rows with a malformed date or amount, skipped and counted.
    pub parse_failures: usize,
    pub warnings: Vec<String>,
}

/// Normalize a raw table into statement lines.
///
/// Header detection failure degrades to row 0 with a warning; a malformed
/// date or amount skips that row and increments `parse_failures`. The
/// import itself never aborts on row content.
pub fn ingest_table(table: &RawTable) -> Result<IngestResult, IngestError> {
    if table.is_empty() {
        return Err(IngestError::Empty);
    }

    let mut result = IngestResult::default();

    let header_row = match detect_header(table) {
        Some(row) => row,
        None => {
            result.degraded_header = true;
            result
                .warnings
                .push("no header row recognized; treating row 0 as header".to_string());
            0
        }
    };
    result.header_row = header_row;

    // When a header row was detected it necessarily maps (detection and
    // mapping share the keyword table). In degraded mode the assumed
    // header may map nothing usable; the import still returns a result,
    // with every data row counted as unparseable.
    let map = match map_columns(table, header_row) {
        Some(map) => map,
        None => {
            let field = if header_has_date(table, header_row) { "amount" } else { "date" };
            result
                .warnings
                .push(format!("no column recognized for required field '{field}'"));
            result.parse_failures = ((header_row + 1)..table.row_count())
                .filter(|&r| !table.row_is_blank(r))
                .count();
            return Ok(result);
        }
    };

    for row in (header_row + 1)..table.row_count() {
        if table.row_is_blank(row) {
            continue;
        }

        let date = match parse_date(table.cell(row, map.date)) {
            Some(d) => d,
            None => {
                result.parse_failures += 1;
                continue;
            }
        };
        let amount = match parse_amount(table.cell(row, map.amount)) {
            Some(a) => a,
            None => {
                result.parse_failures += 1;
                continue;
            }
        };

        let counterparty_raw = map
            .counterparty
            .map(|c| table.cell(row, c).trim().to_string())
            .unwrap_or_default();
        let memo_raw = map
            .memo
            .map(|c| table.cell(row, c).trim().to_string())
            .unwrap_or_default();

        result.lines.push(StatementLine {
            date,
            amount,
            counterparty_raw,
            memo_raw,
        });
    }

    Ok(result)
}

// Only used to pick which field to blame in the error message.
fn header_has_date(table: &RawTable, header_row: usize) -> bool {
    table
        .rows
        .get(header_row)
        .map(|cells| {
            cells.iter().any(|c| {
                let c = c.trim().to_lowercase();
                c.contains("日期") || c.contains("date")
            })
        })
        .unwrap_or(false)
}

/// Parse a date cell. Accepts the formats bank exports actually use;
/// datetime strings are truncated to their date part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // "2024-01-10 12:30:00" / "2024-01-10T12:30:00" → "2024-01-10"
    let date_part = trimmed
        .split(|c| c == ' ' || c == 'T')
        .next()
        .unwrap_or(trimmed);

    const FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y年%m月%d日", "%Y%m%d", "%Y.%m.%d"];
    for fmt in FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(date_part, fmt) {
            return Some(d);
        }
    }
    None
}

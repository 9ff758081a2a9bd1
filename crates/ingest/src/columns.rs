//! Header-row detection and column-name mapping.
//!
//! Bank exports spell the same columns many ways ("日期" / "交易日期" /
//! "Date" / …). Matching is case-insensitive, trimmed, substring-based
//! against a keyword table per canonical field.

use crate::table::RawTable;

/// How many leading rows are scanned for a header row.
pub const HEADER_SCAN_ROWS: usize = 20;

const DATE_KEYWORDS: &[&str] = &["日期", "交易日", "记账日", "入账日", "date"];
const AMOUNT_KEYWORDS: &[&str] = &["金额", "发生额", "amount"];
const COUNTERPARTY_KEYWORDS: &[&str] = &["对方", "户名", "对手", "交易对象", "counterparty", "payee"];
const MEMO_KEYWORDS: &[&str] = &["摘要", "备注", "用途", "附言", "memo", "description", "narrative"];

fn matches_any(cell: &str, keywords: &[&str]) -> bool {
    let cell = cell.trim().to_lowercase();
    if cell.is_empty() {
        return false;
    }
    keywords.iter().any(|k| cell.contains(k))
}

/// Column indexes for the canonical statement fields.
/// `date` and `amount` are required; the rest degrade to empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub amount: usize,
    pub counterparty: Option<usize>,
    pub memo: Option<usize>,
}

/// Scan the first [`HEADER_SCAN_ROWS`] rows for one containing both a
/// date-like and an amount-like keyword. Returns the row index, or `None`
/// (caller falls back to row 0 in degraded mode).
pub fn detect_header(table: &RawTable) -> Option<usize> {
    for row in 0..table.row_count().min(HEADER_SCAN_ROWS) {
        let cells = match table.rows.get(row) {
            Some(c) => c,
            None => break,
        };
        let has_date = cells.iter().any(|c| matches_any(c, DATE_KEYWORDS));
        let has_amount = cells.iter().any(|c| matches_any(c, AMOUNT_KEYWORDS));
        if has_date && has_amount {
            return Some(row);
        }
    }
    None
}

/// Map the header row's cells to canonical fields. First matching column
/// wins per field.
pub fn map_columns(table: &RawTable, header_row: usize) -> Option<ColumnMap> {
    let cells = table.rows.get(header_row)?;

    let find = |keywords: &[&str]| cells.iter().position(|c| matches_any(c, keywords));

    let date = find(DATE_KEYWORDS)?;
    let amount = find(AMOUNT_KEYWORDS)?;

    Some(ColumnMap {
        date,
        amount,
        counterparty: find(COUNTERPARTY_KEYWORDS),
        memo: find(MEMO_KEYWORDS),
    })
}

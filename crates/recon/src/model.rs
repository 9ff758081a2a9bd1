use serde::Serialize;
use tallybook_core::{BusinessType, StatementLine};

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// How a pair was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Same rounded amount, same date.
    Exact,
    /// Same rounded amount, date within tolerance.
    Fuzzy,
}

/// One statement-line ↔ ledger-transaction pairing. At most one `Match`
/// consumes any given line or transaction per run.
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    /// Index into the run's statement lines.
    pub line_index: usize,
    pub transaction_id: String,
    /// `line.date − transaction.date` in days.
    pub date_delta_days: i64,
    pub method: MatchMethod,
}

/// A statement line with no eligible ledger candidate, enriched with
/// everything needed to create a ledger entry after confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct UnmatchedLine {
    pub line: StatementLine,
    /// Memo with boilerplate stripped.
    pub memo: String,
    /// Canonical counterparty after alias resolution.
    pub counterparty: String,
    pub category: String,
    pub suggested_type: BusinessType,
    pub bank_account: String,
    pub is_cash: bool,
    pub has_invoice: bool,
}

// ---------------------------------------------------------------------------
// Summary + Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconSummary {
    pub total_lines: usize,
    pub matched: usize,
    pub unmatched: usize,
    /// Statement rows dropped during ingestion (unparseable cells).
    pub skipped_unparseable: usize,
}

#[derive(Debug, Serialize)]
pub struct ReconOutcome {
    pub matches: Vec<Match>,
    pub unmatched: Vec<UnmatchedLine>,
    pub summary: ReconSummary,
}

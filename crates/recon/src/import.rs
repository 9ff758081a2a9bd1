//! Direct spreadsheet → ledger import with duplicate suppression.
//!
//! Distinct from bank-statement matching: every non-duplicate line
//! becomes a new transaction. Ids are left empty for the store to assign.

use tallybook_core::{round2, StatementLine, Transaction};

use crate::classify::Classifier;
use crate::config::ReconConfig;
use crate::dedupe::{DedupIndex, Fingerprint};
use crate::error::ValidationIssue;
use crate::resolver::{build_history, infer_category, resolve_counterparty, strip_boilerplate};

/// What an import run would create, plus everything it refused to.
#[derive(Debug, Default)]
pub struct ImportPlan {
    /// New transactions, ids unassigned.
    pub created: Vec<Transaction>,
    /// Rows suppressed as duplicates of existing ledger records (or of
    /// earlier rows in the same import).
    pub skipped_count: usize,
    /// Per-row problems, collected, never raised individually.
    pub issues: Vec<ValidationIssue>,
    pub total_rows: usize,
}

/// Build an import plan from normalized lines against the existing
/// ledger. The dedup index is restricted to the import's date span, so
/// re-importing an identical dataset creates nothing.
pub fn prepare_import(
    config: &ReconConfig,
    lines: &[StatementLine],
    ledger: &[Transaction],
    source_hint: &str,
    classifier: Option<&dyn Classifier>,
) -> ImportPlan {
    let mut plan = ImportPlan {
        total_rows: lines.len(),
        ..Default::default()
    };

    let range = lines
        .iter()
        .map(|l| l.date)
        .min()
        .zip(lines.iter().map(|l| l.date).max());
    let mut index = DedupIndex::from_transactions(ledger, range);
    let history = build_history(ledger);

    let hint = source_hint.to_lowercase();
    let is_cash = hint.contains("现金") || hint.contains("cash");

    for (row, line) in lines.iter().enumerate() {
        if line.amount.is_zero() {
            plan.issues.push(ValidationIssue {
                row,
                field: "amount",
                value: line.amount.to_string(),
                message: "zero amount, row not imported".into(),
            });
            continue;
        }

        let business_type = line.suggested_business_type();
        let amount = round2(line.amount.abs());
        let memo = strip_boilerplate(&line.memo_raw, &config.boilerplate_prefixes);

        let fingerprint = Fingerprint::new(line.date, amount, business_type, &memo);
        if !index.check_and_insert(fingerprint) {
            plan.skipped_count += 1;
            continue;
        }

        let counterparty = resolve_counterparty(&line.counterparty_raw, &config.aliases);
        if counterparty.is_empty() {
            plan.issues.push(ValidationIssue {
                row,
                field: "counterparty",
                value: String::new(),
                message: "empty counterparty, imported as-is".into(),
            });
        }
        let category = infer_category(config, &history, &memo, &counterparty, classifier);

        plan.created.push(Transaction {
            id: String::new(),
            date: line.date,
            business_type,
            amount,
            counterparty,
            bank_account: if is_cash { "现金".into() } else { config.default_account.clone() },
            has_invoice: false,
            category,
            memo,
        });
    }

    plan
}

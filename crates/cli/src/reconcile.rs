//! `tally reconcile` — match statement lines against the ledger.

use std::path::Path;

use tallybook_core::{round2, Transaction};
use tallybook_recon::{query_window, run as run_recon, Classifier, ReconConfig, UnmatchedLine};
use tallybook_store::{create_chunked, LedgerStore, MemoryStore, RetryPolicy};

use crate::input::{ingest_file, source_hint};
use crate::ledger::save_store;

fn to_transaction(um: &UnmatchedLine) -> Transaction {
    Transaction {
        id: String::new(),
        date: um.line.date,
        business_type: um.suggested_type,
        amount: round2(um.line.amount.abs()),
        counterparty: um.counterparty.clone(),
        bank_account: um.bank_account.clone(),
        has_invoice: um.has_invoice,
        category: um.category.clone(),
        memo: um.memo.clone(),
    }
}

pub fn run(
    file: &Path,
    sheet: Option<usize>,
    config: &ReconConfig,
    store: &mut MemoryStore,
    ledger_path: &Path,
    classifier: Option<&dyn Classifier>,
    apply: bool,
    json: bool,
) -> Result<(), String> {
    let ingested = ingest_file(file, sheet)?;
    for warning in &ingested.warnings {
        eprintln!("warning: {warning}");
    }

    let window = query_window(&ingested.lines, config);
    let retry = RetryPolicy::default();
    let ledger = retry
        .run(|| store.list_transactions(window))
        .map_err(|e| e.to_string())?;

    let hint = source_hint(file);
    let mut outcome = run_recon(config, &ingested.lines, &ledger, &hint, classifier);
    outcome.summary.skipped_unparseable = ingested.parse_failures;

    if apply && !outcome.unmatched.is_empty() {
        let new_transactions: Vec<Transaction> =
            outcome.unmatched.iter().map(to_transaction).collect();
        create_chunked(store, &new_transactions).map_err(|e| e.to_string())?;
        save_store(ledger_path, store)?;
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).map_err(|e| e.to_string())?
        );
    } else {
        let s = &outcome.summary;
        println!(
            "{} lines: {} matched, {} unmatched, {} unparseable{}",
            s.total_lines,
            s.matched,
            s.unmatched,
            s.skipped_unparseable,
            if apply {
                " (unmatched appended to ledger)"
            } else {
                " (dry run, use --apply to append unmatched)"
            }
        );
        for um in &outcome.unmatched {
            println!(
                "  + {} {} {} {} [{}]",
                um.line.date, um.suggested_type, um.line.amount, um.counterparty, um.category
            );
        }
    }
    Ok(())
}

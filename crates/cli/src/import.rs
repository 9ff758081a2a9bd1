//! `tally import` — spreadsheet → ledger with duplicate suppression.

use std::path::Path;

use serde::Serialize;
use tallybook_recon::{prepare_import, Classifier, ReconConfig};
use tallybook_store::{create_chunked, MemoryStore};

use crate::input::{ingest_file, source_hint};
use crate::ledger::save_store;

#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub total_rows: usize,
    pub parse_failures: usize,
    pub created: usize,
    pub skipped_duplicates: usize,
    pub issues: usize,
    pub applied: bool,
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

    use tallybook_store::LedgerStore;
    let existing = store.list_transactions(None).map_err(|e| e.to_string())?;
    let hint = source_hint(file);
    let plan = prepare_import(config, &ingested.lines, &existing, &hint, classifier);

    for issue in &plan.issues {
        eprintln!(
            "warning: row {}: {} ({}={})",
            issue.row + 1,
            issue.message,
            issue.field,
            issue.value
        );
    }

    let report = ImportReport {
        total_rows: plan.total_rows,
        parse_failures: ingested.parse_failures,
        created: plan.created.len(),
        skipped_duplicates: plan.skipped_count,
        issues: plan.issues.len(),
        applied: apply,
    };

    if apply {
        create_chunked(store, &plan.created).map_err(|e| e.to_string())?;
        save_store(ledger_path, store)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?);
    } else {
        println!(
            "{} rows: {} created, {} duplicates skipped, {} unparseable, {} issues{}",
            report.total_rows,
            report.created,
            report.skipped_duplicates,
            report.parse_failures,
            report.issues,
            if apply { "" } else { " (dry run, use --apply to write)" }
        );
    }
    Ok(())
}

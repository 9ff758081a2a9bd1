//! Run orchestration: match, then enrich unmatched lines.

use chrono::{Duration, NaiveDate};
use tallybook_core::{StatementLine, Transaction};

use crate::classify::Classifier;
use crate::config::ReconConfig;
use crate::matcher::match_statements;
use crate::model::{ReconOutcome, ReconSummary, UnmatchedLine};
use crate::resolver::{build_history, infer_category, resolve_counterparty, strip_boilerplate};

/// Ledger query window for a statement run: the lines' date span widened
/// by tolerance plus margin, bounding the store's list-then-filter query.
/// `None` when there are no lines.
pub fn query_window(
    lines: &[StatementLine],
    config: &ReconConfig,
) -> Option<(NaiveDate, NaiveDate)> {
    let min = lines.iter().map(|l| l.date).min()?;
    let max = lines.iter().map(|l| l.date).max()?;
    let widen = Duration::days(i64::from(config.tolerance_days + config.widen_days));
    Some((min - widen, max + widen))
}

/// Account heuristics for an imported line. A cash hint in the source
/// name (file stem, sheet name) marks the line as cash; otherwise the
/// configured default account applies.
fn account_for(source_hint: &str, config: &ReconConfig) -> (String, bool) {
    let hint = source_hint.to_lowercase();
    if hint.contains("现金") || hint.contains("cash") {
        ("现金".to_string(), true)
    } else {
        (config.default_account.clone(), false)
    }
}

/// Run one reconciliation pass. Pure given its inputs: the ledger slice
/// is whatever the caller fetched for [`query_window`], and the optional
/// classifier is consulted only for unmatched lines.
pub fn run(
    config: &ReconConfig,
    lines: &[StatementLine],
    ledger: &[Transaction],
    source_hint: &str,
    classifier: Option<&dyn Classifier>,
) -> ReconOutcome {
    let output = match_statements(lines, ledger, config.tolerance_days);
    let history = build_history(ledger);

    let mut unmatched = Vec::with_capacity(output.unmatched_indices.len());
    for &index in &output.unmatched_indices {
        let line = &lines[index];
        let memo = strip_boilerplate(&line.memo_raw, &config.boilerplate_prefixes);
        let counterparty = resolve_counterparty(&line.counterparty_raw, &config.aliases);
        let category = infer_category(config, &history, &memo, &counterparty, classifier);
        let (bank_account, is_cash) = account_for(source_hint, config);

        unmatched.push(UnmatchedLine {
            line: line.clone(),
            memo,
            counterparty,
            category,
            suggested_type: line.suggested_business_type(),
            bank_account,
            is_cash,
            has_invoice: false,
        });
    }

    let summary = ReconSummary {
        total_lines: lines.len(),
        matched: output.matches.len(),
        unmatched: unmatched.len(),
        skipped_unparseable: 0,
    };

    ReconOutcome {
        matches: output.matches,
        unmatched,
        summary,
    }
}

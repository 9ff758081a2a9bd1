//! End-to-end reconciliation scenarios and matcher properties.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tallybook_core::{BusinessType, StatementLine, Transaction};
use tallybook_recon::matcher::match_statements;
use tallybook_recon::{prepare_import, query_window, run, ReconConfig};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn txn(id: &str, d: &str, amount: Decimal) -> Transaction {
    Transaction {
        id: id.into(),
        date: date(d),
        business_type: BusinessType::Receipt,
        amount,
        counterparty: "甲公司".into(),
        bank_account: "银行".into(),
        has_invoice: false,
        category: "货款".into(),
        memo: String::new(),
    }
}

fn line(d: &str, amount: Decimal) -> StatementLine {
    StatementLine {
        date: date(d),
        amount,
        counterparty_raw: "甲公司".into(),
        memo_raw: String::new(),
    }
}

#[test]
fn one_day_gap_within_default_tolerance() {
    let config = ReconConfig::default();
    let ledger = vec![txn("t1", "2024-01-10", dec!(500.00))];
    let lines = vec![line("2024-01-11", dec!(500.00))];
    let outcome = run(&config, &lines, &ledger, "bank", None);
    assert_eq!(outcome.summary.matched, 1);
    assert_eq!(outcome.summary.unmatched, 0);
}

#[test]
fn nine_day_gap_is_unmatched() {
    let config = ReconConfig::default();
    let ledger = vec![txn("t1", "2024-01-10", dec!(500.00))];
    let lines = vec![line("2024-01-20", dec!(500.00))];
    let outcome = run(&config, &lines, &ledger, "bank", None);
    assert_eq!(outcome.summary.matched, 0);
    assert_eq!(outcome.summary.unmatched, 1);
}

#[test]
fn window_bounds_ledger_fetch() {
    let config = ReconConfig::default();
    let lines = vec![line("2024-02-10", dec!(1)), line("2024-02-12", dec!(1))];
    let (start, end) = query_window(&lines, &config).unwrap();
    // tolerance 2 + widen 7 on each side
    assert_eq!(start, date("2024-02-01"));
    assert_eq!(end, date("2024-02-21"));
}

#[test]
fn reimport_is_idempotent_end_to_end() {
    let config = ReconConfig::default();
    let lines: Vec<StatementLine> = (1..=8)
        .map(|i| StatementLine {
            date: date(&format!("2024-03-{i:02}")),
            amount: Decimal::from(i * 10),
            counterparty_raw: format!("客户{i}"),
            memo_raw: format!("货款{i}"),
        })
        .collect();

    let first = prepare_import(&config, &lines, &[], "三月流水", None);
    assert_eq!(first.created.len(), 8);

    let mut ledger = first.created.clone();
    for (i, t) in ledger.iter_mut().enumerate() {
        t.id = format!("txn_{i}");
    }
    let second = prepare_import(&config, &lines, &ledger, "三月流水", None);
    assert_eq!(second.skipped_count, 8);
    assert!(second.created.is_empty());
}

// ---------------------------------------------------------------------------
// Matching soundness under arbitrary inputs
// ---------------------------------------------------------------------------

fn arb_amount() -> impl Strategy<Value = Decimal> {
    // Cents in a narrow band to force collisions between lines and txns
    (1i64..400).prop_map(|cents| Decimal::new(cents * 25, 2))
}

fn arb_day() -> impl Strategy<Value = NaiveDate> {
    (0i64..60).prop_map(|offset| date("2024-01-01") + chrono::Duration::days(offset))
}

proptest! {
    #[test]
    fn no_transaction_or_line_matched_twice(
        txn_specs in prop::collection::vec((arb_day(), arb_amount()), 0..40),
        line_specs in prop::collection::vec((arb_day(), arb_amount()), 0..40),
        tolerance in 0u32..10,
    ) {
        let ledger: Vec<Transaction> = txn_specs
            .iter()
            .enumerate()
            .map(|(i, (d, a))| txn(&format!("t{i}"), &d.to_string(), *a))
            .collect();
        let lines: Vec<StatementLine> = line_specs
            .iter()
            .map(|(d, a)| line(&d.to_string(), *a))
            .collect();

        let out = match_statements(&lines, &ledger, tolerance);

        // Each transaction consumed at most once
        let mut txn_ids: Vec<&str> = out.matches.iter().map(|m| m.transaction_id.as_str()).collect();
        txn_ids.sort_unstable();
        let before = txn_ids.len();
        txn_ids.dedup();
        prop_assert_eq!(before, txn_ids.len());

        // Each line consumed at most once, and partition covers all lines
        let mut line_indices: Vec<usize> = out.matches.iter().map(|m| m.line_index).collect();
        line_indices.extend(&out.unmatched_indices);
        line_indices.sort_unstable();
        let before = line_indices.len();
        line_indices.dedup();
        prop_assert_eq!(before, line_indices.len());
        prop_assert_eq!(line_indices.len(), lines.len());

        // Every reported match respects the tolerance
        for m in &out.matches {
            prop_assert!(m.date_delta_days.unsigned_abs() <= u64::from(tolerance));
        }
    }

    #[test]
    fn exact_amount_within_tolerance_always_pairs(
        day_offset in 0i64..5,
        cents in 1i64..100_000,
    ) {
        // A lone line/transaction pair with equal amounts inside the
        // window must match (completeness under tolerance).
        let amount = Decimal::new(cents, 2);
        let ledger = vec![txn("t1", "2024-01-10", amount)];
        let l = StatementLine {
            date: date("2024-01-10") + chrono::Duration::days(day_offset),
            amount,
            counterparty_raw: String::new(),
            memo_raw: String::new(),
        };
        let out = match_statements(&[l], &ledger, 5);
        prop_assert_eq!(out.matches.len(), 1);
    }
}

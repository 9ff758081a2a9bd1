//! Greedy first-fit statement↔ledger matching.
//!
//! Candidates are bucketed by rounded amount magnitude; each statement
//! line takes the first unconsumed candidate within the date tolerance,
//! scanning in storage order. The result is order-dependent by design:
//! this is a first-fit approximation, not a maximum-weight assignment,
//! and changing the tie-break is a business decision, not a bug fix.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tallybook_core::{round2, StatementLine, Transaction};

use crate::model::{Match, MatchMethod};

/// Raw matcher output; enrichment of unmatched lines happens in the
/// engine, which has the config and history.
#[derive(Debug)]
pub struct MatchOutput {
    pub matches: Vec<Match>,
    /// Indexes into the input lines, in input order.
    pub unmatched_indices: Vec<usize>,
}

pub fn match_statements(
    lines: &[StatementLine],
    transactions: &[Transaction],
    tolerance_days: u32,
) -> MatchOutput {
    // Multimap: rounded amount magnitude → candidate indexes, storage order.
    let mut candidates: BTreeMap<Decimal, Vec<usize>> = BTreeMap::new();
    for (index, txn) in transactions.iter().enumerate() {
        candidates.entry(round2(txn.amount)).or_default().push(index);
    }

    let mut consumed = vec![false; transactions.len()];
    let mut matches = Vec::new();
    let mut unmatched_indices = Vec::new();

    for (line_index, line) in lines.iter().enumerate() {
        let key = round2(line.amount.abs());
        let hit = candidates.get(&key).and_then(|bucket| {
            bucket.iter().copied().find(|&ti| {
                if consumed[ti] {
                    return false;
                }
                let delta = (line.date - transactions[ti].date).num_days();
                delta.unsigned_abs() <= u64::from(tolerance_days)
            })
        });

        match hit {
            Some(ti) => {
                consumed[ti] = true;
                let delta = (line.date - transactions[ti].date).num_days();
                matches.push(Match {
                    line_index,
                    transaction_id: transactions[ti].id.clone(),
                    date_delta_days: delta,
                    method: if delta == 0 { MatchMethod::Exact } else { MatchMethod::Fuzzy },
                });
            }
            None => unmatched_indices.push(line_index),
        }
    }

    MatchOutput { matches, unmatched_indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tallybook_core::BusinessType;

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
    fn within_tolerance_matches() {
        // Ledger 2024-01-10 / 500.00; statement 2024-01-11; tolerance 2.
        let ledger = vec![txn("t1", "2024-01-10", dec!(500.00))];
        let lines = vec![line("2024-01-11", dec!(500.00))];
        let out = match_statements(&lines, &ledger, 2);
        assert_eq!(out.matches.len(), 1);
        assert_eq!(out.unmatched_indices.len(), 0);
        assert_eq!(out.matches[0].transaction_id, "t1");
        assert_eq!(out.matches[0].date_delta_days, 1);
        assert_eq!(out.matches[0].method, MatchMethod::Fuzzy);
    }

    #[test]
    fn beyond_tolerance_is_unmatched() {
        // Same transaction, statement nine days later.
        let ledger = vec![txn("t1", "2024-01-10", dec!(500.00))];
        let lines = vec![line("2024-01-20", dec!(500.00))];
        let out = match_statements(&lines, &ledger, 2);
        assert_eq!(out.matches.len(), 0);
        assert_eq!(out.unmatched_indices, vec![0]);
    }

    #[test]
    fn same_day_is_exact() {
        let ledger = vec![txn("t1", "2024-01-10", dec!(42.00))];
        let lines = vec![line("2024-01-10", dec!(-42.00))];
        let out = match_statements(&lines, &ledger, 2);
        assert_eq!(out.matches[0].method, MatchMethod::Exact);
    }

    #[test]
    fn amounts_compare_rounded() {
        let ledger = vec![txn("t1", "2024-01-10", dec!(500))];
        let lines = vec![line("2024-01-10", dec!(500.004))];
        let out = match_statements(&lines, &ledger, 0);
        assert_eq!(out.matches.len(), 1);
    }

    #[test]
    fn transaction_consumed_at_most_once() {
        let ledger = vec![txn("t1", "2024-01-10", dec!(500.00))];
        let lines = vec![
            line("2024-01-10", dec!(500.00)),
            line("2024-01-11", dec!(500.00)),
        ];
        let out = match_statements(&lines, &ledger, 2);
        assert_eq!(out.matches.len(), 1);
        assert_eq!(out.matches[0].line_index, 0);
        assert_eq!(out.unmatched_indices, vec![1]);
    }

    #[test]
    fn first_fit_takes_storage_order_not_closest_date() {
        // Two candidates both inside tolerance: the one stored first wins
        // even though the second is date-closer.
        let ledger = vec![
            txn("early", "2024-01-09", dec!(100.00)),
            txn("close", "2024-01-11", dec!(100.00)),
        ];
        let lines = vec![line("2024-01-11", dec!(100.00))];
        let out = match_statements(&lines, &ledger, 2);
        assert_eq!(out.matches[0].transaction_id, "early");
    }

    #[test]
    fn earlier_line_consumes_shared_candidate() {
        let ledger = vec![
            txn("t1", "2024-01-10", dec!(100.00)),
            txn("t2", "2024-01-12", dec!(100.00)),
        ];
        let lines = vec![
            line("2024-01-10", dec!(100.00)),
            line("2024-01-12", dec!(100.00)),
        ];
        let out = match_statements(&lines, &ledger, 2);
        assert_eq!(out.matches.len(), 2);
        assert_eq!(out.matches[0].transaction_id, "t1");
        assert_eq!(out.matches[1].transaction_id, "t2");
    }

    #[test]
    fn signed_statement_amount_matches_magnitude() {
        let ledger = vec![txn("t1", "2024-01-10", dec!(1200.50))];
        let lines = vec![line("2024-01-10", dec!(-1200.50))];
        let out = match_statements(&lines, &ledger, 2);
        assert_eq!(out.matches.len(), 1);
    }
}

//! Fingerprint-based duplicate suppression for repeated imports.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tallybook_core::{round2, BusinessType, Transaction};

/// Characters of memo kept in the fingerprint. Deliberately lossy:
/// two genuinely distinct rows that collide on this key are treated as
/// duplicates, preferring under-counting over double-entry.
const MEMO_PREFIX_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    date: NaiveDate,
    amount: Decimal,
    business_type: BusinessType,
    memo_prefix: String,
}

impl Fingerprint {
    pub fn new(date: NaiveDate, amount: Decimal, business_type: BusinessType, memo: &str) -> Self {
        Self {
            date,
            amount: round2(amount),
            business_type,
            memo_prefix: memo.chars().take(MEMO_PREFIX_CHARS).collect(),
        }
    }

    pub fn of(txn: &Transaction) -> Self {
        Self::new(txn.date, txn.amount, txn.business_type, &txn.memo)
    }
}

/// Duplicate index built from existing ledger records restricted to the
/// import's date range.
#[derive(Debug, Default)]
pub struct DedupIndex {
    seen: HashSet<Fingerprint>,
}

impl DedupIndex {
    /// Build from ledger records, keeping only those inside the range
    /// (inclusive) when one is given.
    pub fn from_transactions(
        transactions: &[Transaction],
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Self {
        let seen = transactions
            .iter()
            .filter(|t| match range {
                Some((start, end)) => t.date >= start && t.date <= end,
                None => true,
            })
            .map(Fingerprint::of)
            .collect();
        Self { seen }
    }

    /// Record a fingerprint. Returns false when it was already present
    /// (the caller skips that row).
    pub fn check_and_insert(&mut self, fingerprint: Fingerprint) -> bool {
        self.seen.insert(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

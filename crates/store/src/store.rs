//! Repository trait over the ledger store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tallybook_core::{Order, OutsourcedProcessing, Transaction};

use crate::error::StoreError;

/// Write cap per batch on the backing store.
pub const MAX_BATCH: usize = 100;

/// Partial update for a transaction. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub counterparty: Option<String>,
    pub bank_account: Option<String>,
    pub has_invoice: Option<bool>,
    pub category: Option<String>,
    pub memo: Option<String>,
}

impl TransactionPatch {
    pub fn apply(&self, txn: &mut Transaction) {
        if let Some(date) = self.date {
            txn.date = date;
        }
        if let Some(amount) = self.amount {
            txn.amount = amount;
        }
        if let Some(counterparty) = &self.counterparty {
            txn.counterparty = counterparty.clone();
        }
        if let Some(bank_account) = &self.bank_account {
            txn.bank_account = bank_account.clone();
        }
        if let Some(has_invoice) = self.has_invoice {
            txn.has_invoice = has_invoice;
        }
        if let Some(category) = &self.category {
            txn.category = category.clone();
        }
        if let Some(memo) = &self.memo {
            txn.memo = memo.clone();
        }
    }
}

/// The external tabular store, reduced to what the engine needs.
///
/// The store can only list and filter; callers fetch a window and do the
/// real work locally. Writes are capped at [`MAX_BATCH`] records; use
/// [`create_chunked`] for larger sets.
pub trait LedgerStore {
    /// Transactions, optionally restricted to an inclusive date range.
    fn list_transactions(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Create up to [`MAX_BATCH`] transactions; returns assigned ids in
    /// input order. Larger slices are rejected with `BatchTooLarge`.
    fn batch_create(&mut self, transactions: &[Transaction]) -> Result<Vec<String>, StoreError>;

    fn update_transaction(&mut self, id: &str, patch: &TransactionPatch)
        -> Result<(), StoreError>;

    fn delete_transactions(&mut self, ids: &[String]) -> Result<(), StoreError>;

    fn list_orders(&self) -> Result<Vec<Order>, StoreError>;

    fn update_order(&mut self, order: &Order) -> Result<(), StoreError>;

    /// Refused with `PaymentRecorded` once money has been received.
    fn delete_order(&mut self, id: &str) -> Result<(), StoreError>;

    fn list_outsourced(&self) -> Result<Vec<OutsourcedProcessing>, StoreError>;

    /// Refused with `PaymentRecorded` once the supplier has been paid.
    fn delete_outsourced(&mut self, id: &str) -> Result<(), StoreError>;
}

/// Create transactions in [`MAX_BATCH`]-sized chunks, collecting the
/// assigned ids. Stops at the first failing chunk; records written by
/// earlier chunks remain persisted.
pub fn create_chunked(
    store: &mut dyn LedgerStore,
    transactions: &[Transaction],
) -> Result<Vec<String>, StoreError> {
    let mut ids = Vec::with_capacity(transactions.len());
    for chunk in transactions.chunks(MAX_BATCH) {
        ids.extend(store.batch_create(chunk)?);
    }
    Ok(ids)
}

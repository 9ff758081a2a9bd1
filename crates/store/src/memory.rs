//! In-memory store for tests and the CLI's local mode. Mimics the real
//! store's constraints (batch cap, lifecycle refusals) so code exercised
//! against it does not break in production.

use chrono::NaiveDate;
use tallybook_core::{Order, OutsourcedProcessing, Transaction};

use crate::error::StoreError;
use crate::store::{LedgerStore, TransactionPatch, MAX_BATCH};

#[derive(Debug, Default)]
pub struct MemoryStore {
    transactions: Vec<Transaction>,
    orders: Vec<Order>,
    outsourced: Vec<OutsourcedProcessing>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from already-loaded records (local ledger file).
    pub fn with_data(
        transactions: Vec<Transaction>,
        orders: Vec<Order>,
        outsourced: Vec<OutsourcedProcessing>,
    ) -> Self {
        let next_id = transactions.len() as u64 + 1;
        Self {
            transactions,
            orders,
            outsourced,
            next_id,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    fn assign_id(&mut self) -> String {
        let id = format!("txn_{:06}", self.next_id);
        self.next_id += 1;
        id
    }
}

impl LedgerStore for MemoryStore {
    fn list_transactions(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<Transaction>, StoreError> {
        let mut out: Vec<Transaction> = match range {
            Some((start, end)) => self
                .transactions
                .iter()
                .filter(|t| t.date >= start && t.date <= end)
                .cloned()
                .collect(),
            None => self.transactions.clone(),
        };
        out.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(out)
    }

    fn batch_create(&mut self, transactions: &[Transaction]) -> Result<Vec<String>, StoreError> {
        if transactions.len() > MAX_BATCH {
            return Err(StoreError::BatchTooLarge(transactions.len()));
        }
        let mut ids = Vec::with_capacity(transactions.len());
        for txn in transactions {
            let mut txn = txn.clone();
            if txn.id.is_empty() {
                txn.id = self.assign_id();
            }
            ids.push(txn.id.clone());
            self.transactions.push(txn);
        }
        Ok(ids)
    }

    fn update_transaction(
        &mut self,
        id: &str,
        patch: &TransactionPatch,
    ) -> Result<(), StoreError> {
        let txn = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        patch.apply(txn);
        Ok(())
    }

    fn delete_transactions(&mut self, ids: &[String]) -> Result<(), StoreError> {
        for id in ids {
            if !self.transactions.iter().any(|t| &t.id == id) {
                return Err(StoreError::NotFound(id.clone()));
            }
        }
        self.transactions.retain(|t| !ids.contains(&t.id));
        Ok(())
    }

    fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.orders.clone())
    }

    fn update_order(&mut self, order: &Order) -> Result<(), StoreError> {
        let slot = self
            .orders
            .iter_mut()
            .find(|o| o.id == order.id)
            .ok_or_else(|| StoreError::NotFound(order.id.clone()))?;
        *slot = order.clone();
        Ok(())
    }

    fn delete_order(&mut self, id: &str) -> Result<(), StoreError> {
        let order = self
            .orders
            .iter()
            .find(|o| o.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if !order.received_amount.is_zero() {
            return Err(StoreError::PaymentRecorded(id.to_string()));
        }
        self.orders.retain(|o| o.id != id);
        Ok(())
    }

    fn list_outsourced(&self) -> Result<Vec<OutsourcedProcessing>, StoreError> {
        Ok(self.outsourced.clone())
    }

    fn delete_outsourced(&mut self, id: &str) -> Result<(), StoreError> {
        let item = self
            .outsourced
            .iter()
            .find(|op| op.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if !item.paid_amount.is_zero() {
            return Err(StoreError::PaymentRecorded(id.to_string()));
        }
        self.outsourced.retain(|op| op.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::create_chunked;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tallybook_core::{BusinessType, OrderStatus, PricingUnit};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn txn(d: &str, amount: Decimal) -> Transaction {
        Transaction {
            id: String::new(),
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

    #[test]
    fn create_assigns_sequential_ids() {
        let mut store = MemoryStore::new();
        let ids = store
            .batch_create(&[txn("2024-01-01", dec!(10)), txn("2024-01-02", dec!(20))])
            .unwrap();
        assert_eq!(ids, vec!["txn_000001", "txn_000002"]);
    }

    #[test]
    fn oversized_batch_is_rejected() {
        let mut store = MemoryStore::new();
        let batch: Vec<Transaction> = (0..MAX_BATCH + 1)
            .map(|i| txn("2024-01-01", Decimal::from(i as i64)))
            .collect();
        assert_eq!(
            store.batch_create(&batch),
            Err(StoreError::BatchTooLarge(MAX_BATCH + 1))
        );
    }

    #[test]
    fn chunked_create_crosses_the_cap() {
        let mut store = MemoryStore::new();
        let batch: Vec<Transaction> = (0..250)
            .map(|i| txn("2024-01-01", Decimal::from(i)))
            .collect();
        let ids = create_chunked(&mut store, &batch).unwrap();
        assert_eq!(ids.len(), 250);
        assert_eq!(store.transactions().len(), 250);
    }

    #[test]
    fn list_filters_by_range_and_sorts() {
        let mut store = MemoryStore::new();
        store
            .batch_create(&[
                txn("2024-01-20", dec!(3)),
                txn("2024-01-05", dec!(1)),
                txn("2024-02-10", dec!(9)),
            ])
            .unwrap();
        let listed = store
            .list_transactions(Some((date("2024-01-01"), date("2024-01-31"))))
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].date < listed[1].date);
    }

    #[test]
    fn update_patches_in_place() {
        let mut store = MemoryStore::new();
        let ids = store.batch_create(&[txn("2024-01-01", dec!(10))]).unwrap();
        store
            .update_transaction(
                &ids[0],
                &TransactionPatch {
                    category: Some("加工费".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(store.transactions()[0].category, "加工费");
    }

    #[test]
    fn delete_of_unknown_id_is_not_found() {
        let mut store = MemoryStore::new();
        let err = store.delete_transactions(&["txn_missing".into()]).unwrap_err();
        assert_eq!(err, StoreError::NotFound("txn_missing".into()));
    }

    #[test]
    fn paid_order_cannot_be_deleted() {
        let order = Order {
            id: "ord_1".into(),
            customer: "客户A".into(),
            order_date: date("2024-01-05"),
            quantity: dec!(1),
            pricing_unit: PricingUnit::Piece,
            unit_price: dec!(100),
            base_fee: dec!(100),
            outsourcing_cost: Decimal::ZERO,
            received_amount: dec!(40),
            status: OrderStatus::Delivered,
        };
        let mut store = MemoryStore::with_data(vec![], vec![order], vec![]);
        assert_eq!(
            store.delete_order("ord_1"),
            Err(StoreError::PaymentRecorded("ord_1".into()))
        );

        // Clearing the payment unlocks deletion.
        let mut unpaid = store.list_orders().unwrap().remove(0);
        unpaid.received_amount = Decimal::ZERO;
        store.update_order(&unpaid).unwrap();
        assert!(store.delete_order("ord_1").is_ok());
    }

    #[test]
    fn paid_outsourced_item_cannot_be_deleted() {
        let item = |id: &str, paid: Decimal| OutsourcedProcessing {
            id: id.into(),
            order_id: "ord_1".into(),
            supplier: "外协厂".into(),
            record_date: date("2024-01-08"),
            quantity: dec!(100),
            unit_price: dec!(2.00),
            total_cost: dec!(200.00),
            paid_amount: paid,
        };
        let mut store = MemoryStore::with_data(
            vec![],
            vec![],
            vec![item("op_paid", dec!(50.00)), item("op_open", Decimal::ZERO)],
        );

        assert_eq!(
            store.delete_outsourced("op_paid"),
            Err(StoreError::PaymentRecorded("op_paid".into()))
        );
        assert!(store.delete_outsourced("op_open").is_ok());
        assert_eq!(store.list_outsourced().unwrap().len(), 1);
    }
}

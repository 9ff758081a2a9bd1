//! Local-mode ledger persistence: one JSON document holding the whole
//! book, loaded into a [`MemoryStore`] and written back after `--apply`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tallybook_core::{Order, OutsourcedProcessing, Transaction};
use tallybook_store::MemoryStore;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LedgerFile {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub outsourced: Vec<OutsourcedProcessing>,
}

/// Load the ledger file into a store. A missing file is an empty book,
/// not an error; first runs start from nothing.
pub fn open_store(path: &Path) -> Result<MemoryStore, String> {
    if !path.exists() {
        return Ok(MemoryStore::new());
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let file: LedgerFile = serde_json::from_str(&content)
        .map_err(|e| format!("{} is not a valid ledger file: {e}", path.display()))?;
    Ok(MemoryStore::with_data(
        file.transactions,
        file.orders,
        file.outsourced,
    ))
}

/// Write the store's state back to the ledger file.
pub fn save_store(path: &Path, store: &MemoryStore) -> Result<(), String> {
    use tallybook_store::LedgerStore;

    let file = LedgerFile {
        transactions: store.transactions().to_vec(),
        orders: store.list_orders().map_err(|e| e.to_string())?,
        outsourced: store.list_outsourced().map_err(|e| e.to_string())?,
    };
    let json = serde_json::to_string_pretty(&file).map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_empty_book() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir.path().join("ledger.json")).unwrap();
        assert!(store.transactions().is_empty());
    }

    #[test]
    fn save_then_open_round_trips() {
        use chrono::NaiveDate;
        use rust_decimal_macros::dec;
        use tallybook_core::BusinessType;
        use tallybook_store::LedgerStore;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let mut store = MemoryStore::new();
        store
            .batch_create(&[Transaction {
                id: String::new(),
                date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                business_type: BusinessType::Receipt,
                amount: dec!(500.00),
                counterparty: "甲公司".into(),
                bank_account: "银行".into(),
                has_invoice: false,
                category: "货款".into(),
                memo: "一月货款".into(),
            }])
            .unwrap();
        save_store(&path, &store).unwrap();

        let reopened = open_store(&path).unwrap();
        assert_eq!(reopened.transactions().len(), 1);
        assert_eq!(reopened.transactions()[0].counterparty, "甲公司");
        assert_eq!(reopened.transactions()[0].amount, dec!(500.00));
    }

    #[test]
    fn garbage_file_is_a_readable_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "not json").unwrap();
        let err = open_store(&path).unwrap_err();
        assert!(err.contains("not a valid ledger file"));
    }
}

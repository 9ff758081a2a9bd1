//! Balance sheet as of a date.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tallybook_core::{round2, Order, OutsourcedProcessing, Transaction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheet {
    pub as_of: NaiveDate,
    /// Running balance per bank account (cash counts as an account).
    pub by_account: BTreeMap<String, Decimal>,
    pub cash_and_bank: Decimal,
    pub accounts_receivable: Decimal,
    pub total_assets: Decimal,
    pub accounts_payable: Decimal,
    pub total_liabilities: Decimal,
    /// Plug figure: `total_assets − total_liabilities`.
    pub equity: Decimal,
    /// Always holds with the plug equity, barring rounding drift past 1分.
    pub is_balanced: bool,
}

pub fn balance_sheet(
    transactions: &[Transaction],
    orders: &[Order],
    outsourced: &[OutsourcedProcessing],
    as_of: NaiveDate,
) -> BalanceSheet {
    let mut by_account: BTreeMap<String, Decimal> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.date <= as_of) {
        let delta = if txn.business_type.is_outflow() {
            -txn.amount
        } else {
            txn.amount
        };
        *by_account.entry(txn.bank_account.clone()).or_default() += delta;
    }
    for balance in by_account.values_mut() {
        *balance = round2(*balance);
    }

    let cash_and_bank = round2(by_account.values().copied().sum());
    let accounts_receivable = round2(
        orders
            .iter()
            .filter(|o| o.order_date <= as_of)
            .map(Order::outstanding)
            .sum(),
    );
    let accounts_payable = round2(
        outsourced
            .iter()
            .filter(|op| op.record_date <= as_of)
            .map(OutsourcedProcessing::outstanding)
            .sum(),
    );

    let total_assets = round2(cash_and_bank + accounts_receivable);
    let total_liabilities = accounts_payable;
    let equity = round2(total_assets - total_liabilities);
    let is_balanced = (total_assets - (total_liabilities + equity)).abs() <= Decimal::new(1, 2);

    BalanceSheet {
        as_of,
        by_account,
        cash_and_bank,
        accounts_receivable,
        total_assets,
        accounts_payable,
        total_liabilities,
        equity,
        is_balanced,
    }
}

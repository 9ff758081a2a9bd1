//! Group-by analyses: who brings the revenue, how work is priced, where
//! the money goes.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tallybook_core::{percentage, round2, Order, Transaction};

/// One group's share of a total. Reused across the three analyses; the
/// meaning of `name` depends on the grouping (customer, pricing unit,
/// expense category).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupShare {
    pub name: String,
    pub count: usize,
    pub amount: Decimal,
    pub percentage: Decimal,
}

fn shares(groups: BTreeMap<String, (usize, Decimal)>) -> Vec<GroupShare> {
    let total: Decimal = groups.values().map(|(_, amount)| *amount).sum();
    let mut out: Vec<GroupShare> = groups
        .into_iter()
        .map(|(name, (count, amount))| GroupShare {
            name,
            count,
            amount: round2(amount),
            percentage: percentage(amount, total),
        })
        .collect();
    out.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.name.cmp(&b.name)));
    out
}

/// Customers ranked by order revenue (total fee), descending.
pub fn customer_ranking(orders: &[Order]) -> Vec<GroupShare> {
    let mut groups: BTreeMap<String, (usize, Decimal)> = BTreeMap::new();
    for order in orders {
        let entry = groups.entry(order.customer.clone()).or_default();
        entry.0 += 1;
        entry.1 += order.total_fee();
    }
    shares(groups)
}

/// Fee share per pricing unit.
pub fn pricing_method_mix(orders: &[Order]) -> Vec<GroupShare> {
    let mut groups: BTreeMap<String, (usize, Decimal)> = BTreeMap::new();
    for order in orders {
        let entry = groups.entry(order.pricing_unit.to_string()).or_default();
        entry.0 += 1;
        entry.1 += order.total_fee();
    }
    shares(groups)
}

/// Outflow transactions grouped by category.
pub fn cost_structure(transactions: &[Transaction]) -> Vec<GroupShare> {
    let mut groups: BTreeMap<String, (usize, Decimal)> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.business_type.is_outflow()) {
        let entry = groups.entry(txn.category.clone()).or_default();
        entry.0 += 1;
        entry.1 += txn.amount;
    }
    shares(groups)
}

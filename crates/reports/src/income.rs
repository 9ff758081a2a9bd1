//! Income statement over a date period.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tallybook_core::{percentage, round2, Transaction};

/// Categories treated as cost of goods sold rather than operating expense.
pub const DIRECT_COST_CATEGORIES: &[&str] = &["原材料", "外协加工费"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeStatement {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub revenue: Decimal,
    pub cost_of_goods_sold: Decimal,
    pub gross_profit: Decimal,
    pub operating_expenses: Decimal,
    pub net_profit: Decimal,
    /// `net_profit / revenue × 100`, 2dp, 0 when revenue is 0.
    pub net_margin: Decimal,
}

/// Build the income statement for `[start, end]` inclusive.
pub fn income_statement(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> IncomeStatement {
    let mut revenue = Decimal::ZERO;
    let mut cogs = Decimal::ZERO;
    let mut opex = Decimal::ZERO;

    for txn in transactions {
        if txn.date < start || txn.date > end {
            continue;
        }
        if txn.business_type.is_outflow() {
            if DIRECT_COST_CATEGORIES.contains(&txn.category.as_str()) {
                cogs += txn.amount;
            } else {
                opex += txn.amount;
            }
        } else {
            revenue += txn.amount;
        }
    }

    let revenue = round2(revenue);
    let cogs = round2(cogs);
    let opex = round2(opex);
    let gross = round2(revenue - cogs);
    let net = round2(gross - opex);

    IncomeStatement {
        start,
        end,
        revenue,
        cost_of_goods_sold: cogs,
        gross_profit: gross,
        operating_expenses: opex,
        net_profit: net,
        net_margin: percentage(net, revenue),
    }
}

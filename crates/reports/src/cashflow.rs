//! Cash flow statement over a date period.
//!
//! Only the operating section carries activity; a workshop of this size
//! records no investing or financing movements, so those lines are fixed
//! at zero and kept for statement shape.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tallybook_core::{round2, Transaction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashFlowStatement {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub operating_inflow: Decimal,
    pub operating_outflow: Decimal,
    pub net_operating: Decimal,
    pub investing: Decimal,
    pub financing: Decimal,
    pub net_change: Decimal,
    /// Net bank balance strictly before `start`.
    pub beginning_cash: Decimal,
    pub ending_cash: Decimal,
}

pub fn cash_flow_statement(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> CashFlowStatement {
    let mut inflow = Decimal::ZERO;
    let mut outflow = Decimal::ZERO;
    let mut beginning = Decimal::ZERO;

    for txn in transactions {
        let signed = if txn.business_type.is_outflow() {
            -txn.amount
        } else {
            txn.amount
        };
        if txn.date < start {
            beginning += signed;
        } else if txn.date <= end {
            if signed.is_sign_negative() {
                outflow += txn.amount;
            } else {
                inflow += txn.amount;
            }
        }
    }

    let inflow = round2(inflow);
    let outflow = round2(outflow);
    let net_operating = round2(inflow - outflow);
    let beginning = round2(beginning);

    CashFlowStatement {
        start,
        end,
        operating_inflow: inflow,
        operating_outflow: outflow,
        net_operating,
        investing: Decimal::ZERO,
        financing: Decimal::ZERO,
        net_change: net_operating,
        beginning_cash: beginning,
        ending_cash: round2(beginning + net_operating),
    }
}

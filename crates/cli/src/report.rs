//! `tally report` — financial statements and analyses as JSON.

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;
use tallybook_recon::ReconConfig;
use tallybook_reports::{
    balance_sheet, cash_flow_statement, cost_structure, customer_ranking, income_statement,
    payable_aging, pricing_method_mix, pricing_unit_stats, receivable_aging,
};
use tallybook_store::{LedgerStore, MemoryStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Income statement for a period
    Income,
    /// Balance sheet as of a date
    Balance,
    /// Cash flow statement for a period
    Cashflow,
    /// Receivable and payable aging
    Aging,
    /// Customer revenue ranking
    Customers,
    /// Pricing-method mix and per-unit rollups
    Pricing,
    /// Cost structure by expense category
    Costs,
}

#[derive(Serialize)]
struct AgingPair<R> {
    receivable: R,
    payable: R,
}

#[derive(Serialize)]
struct PricingReport<M, R> {
    mix: M,
    rollups: R,
}

pub fn run(
    kind: ReportKind,
    store: &MemoryStore,
    config: &ReconConfig,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    as_of: Option<NaiveDate>,
) -> Result<(), String> {
    let transactions = store.list_transactions(None).map_err(|e| e.to_string())?;
    let orders = store.list_orders().map_err(|e| e.to_string())?;
    let outsourced = store.list_outsourced().map_err(|e| e.to_string())?;

    // Period defaults to the ledger's full span; as-of defaults to today.
    let span_start = transactions.iter().map(|t| t.date).min();
    let span_end = transactions.iter().map(|t| t.date).max();
    let fallback = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    let start = from.or(span_start).unwrap_or(fallback);
    let end = to.or(span_end).unwrap_or(fallback);
    let as_of = as_of.unwrap_or_else(|| chrono::Local::now().date_naive());

    let json = match kind {
        ReportKind::Income => to_json(&income_statement(&transactions, start, end))?,
        ReportKind::Balance => to_json(&balance_sheet(&transactions, &orders, &outsourced, as_of))?,
        ReportKind::Cashflow => to_json(&cash_flow_statement(&transactions, start, end))?,
        ReportKind::Aging => to_json(&AgingPair {
            receivable: receivable_aging(&orders, as_of, &config.bucket_edges),
            payable: payable_aging(&outsourced, as_of, &config.bucket_edges),
        })?,
        ReportKind::Customers => to_json(&customer_ranking(&orders))?,
        ReportKind::Pricing => to_json(&PricingReport {
            mix: pricing_method_mix(&orders),
            rollups: pricing_unit_stats(&orders),
        })?,
        ReportKind::Costs => to_json(&cost_structure(&transactions))?,
    };
    println!("{json}");
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| e.to_string())
}

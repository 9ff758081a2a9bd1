//! `tallybook-reports` — Cost derivation and financial statements.
//!
//! Every builder is a pure function of already-reconciled ledger state
//! plus a period or as-of date: calling twice with unchanged state yields
//! identical output. Rendering to workbooks or HTML is someone else's job;
//! this crate only produces structured report objects.

pub mod aging;
pub mod analysis;
pub mod balance;
pub mod cashflow;
pub mod cost;
pub mod income;

pub use aging::{payable_aging, receivable_aging, AgingBucket, AgingReport};
pub use analysis::{cost_structure, customer_ranking, pricing_method_mix, GroupShare};
pub use balance::{balance_sheet, BalanceSheet};
pub use cashflow::{cash_flow_statement, CashFlowStatement};
pub use cost::{
    base_fee, outsourcing_cost, pricing_unit_stats, profit_margin, update_order_costs,
    validate_order_costs, CostError, CostMismatch, PricingRollup,
};
pub use income::{income_statement, IncomeStatement};

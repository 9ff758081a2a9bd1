//! `tallybook-core` — Shared domain types for the bookkeeping engine.
//!
//! Pure data crate: transactions, statement lines, orders, outsourced
//! processing records, and money helpers. No IO dependencies.

pub mod model;
pub mod money;
pub mod order;

pub use model::{BusinessType, StatementLine, Transaction};
pub use money::{parse_amount, percentage, round2};
pub use order::{Order, OrderStatus, OutsourcedProcessing, PricingUnit};

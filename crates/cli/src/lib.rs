//! Library surface of the `tally` CLI; the binary in `main.rs` is a thin
//! argument-parsing shell over these modules so tests can drive commands
//! directly.

pub mod classifier;
pub mod exit_codes;
pub mod import;
pub mod input;
pub mod ledger;
pub mod reconcile;
pub mod report;
pub mod validate;

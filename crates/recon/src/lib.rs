//! `tallybook-recon` — Ledger reconciliation engine.
//!
//! Pure engine crate: receives normalized statement lines plus the ledger
//! window, returns matches, enriched unmatched lines, and import plans.
//! No CLI or IO dependencies; the external classifier is an injected trait.

pub mod classify;
pub mod config;
pub mod dedupe;
pub mod engine;
pub mod error;
pub mod import;
pub mod matcher;
pub mod model;
pub mod resolver;

pub use classify::Classifier;
pub use config::ReconConfig;
pub use dedupe::DedupIndex;
pub use engine::{query_window, run};
pub use error::{ReconError, ValidationIssue};
pub use import::{prepare_import, ImportPlan};
pub use model::{Match, ReconOutcome, ReconSummary, UnmatchedLine};

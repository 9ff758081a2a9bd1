//! `tallybook-store` — the boundary to the external tabular ledger store.
//!
//! The backing store is a list-then-filter document service, not a SQL
//! database: no server-side joins or where-clauses, and writes go through
//! size-capped batches. Everything above this crate works against the
//! [`LedgerStore`] trait; [`MemoryStore`] backs tests and the CLI's local
//! mode.

pub mod error;
pub mod memory;
pub mod retry;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use retry::RetryPolicy;
pub use store::{create_chunked, LedgerStore, TransactionPatch, MAX_BATCH};

use std::fmt;

use serde::Serialize;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad tolerance, unsorted bucket edges, etc.).
    ConfigValidation(String),
    /// External store failure surfaced into a run.
    Store(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Store(msg) => write!(f, "store error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}

/// A per-row problem collected during import preparation. Surfaced in
/// batch on the result object, never raised row-by-row.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub row: usize,
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

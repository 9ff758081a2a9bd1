//! External classification boundary.
//!
//! The optional AI/text classifier is a pure capability injected into the
//! run: given a memo and counterparty it may return a category label.
//! Timeouts and retries belong to the implementing adapter, never here,
//! so matching and aggregation stay deterministic.

/// A text-classification backend. Absence of an answer (no key, network
/// down, nonsense response) is `None`; the caller falls through to the
/// default category.
pub trait Classifier {
    fn classify(&self, memo: &str, counterparty: &str) -> Option<String>;
}

/// Maximum accepted label length in characters; anything longer is
/// treated as a malformed response.
const MAX_LABEL_CHARS: usize = 32;

/// Lightly sanitize a classifier response: first line, trimmed,
/// length-capped. Empty or oversized responses are rejected.
pub fn sanitize_label(raw: &str) -> Option<String> {
    let label = raw.lines().next().unwrap_or("").trim();
    if label.is_empty() || label.chars().count() > MAX_LABEL_CHARS {
        return None;
    }
    Some(label.to_string())
}

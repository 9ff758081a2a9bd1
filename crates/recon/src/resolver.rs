//! Counterparty and category resolution for unmatched statement lines.

use std::collections::HashMap;

use tallybook_core::Transaction;

use crate::classify::{sanitize_label, Classifier};
use crate::config::{CategoryRule, ReconConfig};

// ---------------------------------------------------------------------------
// Memo cleanup
// ---------------------------------------------------------------------------

/// Strip recognized boilerplate substrings from a memo.
///
/// Longest-match-first removal, repeated until a full pass changes
/// nothing, so nested fragments ("转账-" inside "网银转账-") collapse too.
pub fn strip_boilerplate(memo: &str, prefixes: &[String]) -> String {
    let mut by_len: Vec<&String> = prefixes.iter().filter(|p| !p.is_empty()).collect();
    by_len.sort_by_key(|p| std::cmp::Reverse(p.chars().count()));

    let mut current = memo.trim().to_string();
    loop {
        let mut changed = false;
        for prefix in &by_len {
            if let Some(pos) = current.find(prefix.as_str()) {
                current.replace_range(pos..pos + prefix.len(), "");
                changed = true;
                break;
            }
        }
        if !changed {
            return current.trim().to_string();
        }
    }
}

// ---------------------------------------------------------------------------
// Counterparty aliases
// ---------------------------------------------------------------------------

/// Resolve a raw counterparty string to a canonical name.
///
/// Exact alias hit first; else the longest alias contained in the raw
/// string, so "张三丰" wins over "张三"; else the trimmed raw string.
/// Equal-length candidates tie-break lexicographically so resolution
/// never depends on map iteration order.
pub fn resolve_counterparty(raw: &str, aliases: &HashMap<String, String>) -> String {
    let trimmed = raw.trim();
    if let Some(canonical) = aliases.get(trimmed) {
        return canonical.clone();
    }

    let mut best: Option<(&String, &String)> = None;
    for (alias, canonical) in aliases {
        if trimmed.contains(alias.as_str()) {
            let better = match best {
                Some((current, _)) => {
                    let (len, cur_len) = (alias.chars().count(), current.chars().count());
                    len > cur_len || (len == cur_len && alias < current)
                }
                None => true,
            };
            if better {
                best = Some((alias, canonical));
            }
        }
    }

    match best {
        Some((_, canonical)) => canonical.clone(),
        None => trimmed.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Category inference
// ---------------------------------------------------------------------------

/// Counterparty → category map from ledger history, most-recent-wins:
/// transactions are walked newest-first and only the first insertion per
/// counterparty sticks.
pub fn build_history(transactions: &[Transaction]) -> HashMap<String, String> {
    let mut by_recency: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| !t.counterparty.trim().is_empty() && !t.category.trim().is_empty())
        .collect();
    by_recency.sort_by(|a, b| b.date.cmp(&a.date));

    let mut history = HashMap::new();
    for txn in by_recency {
        history
            .entry(txn.counterparty.trim().to_string())
            .or_insert_with(|| txn.category.clone());
    }
    history
}

fn rule_category<'a>(rules: &'a [CategoryRule], memo: &str, counterparty: &str) -> Option<&'a str> {
    rules
        .iter()
        .find(|r| memo.contains(&r.keyword) || counterparty.contains(&r.keyword))
        .map(|r| r.category.as_str())
}

/// Infer a category: rule table → ledger history → optional external
/// classifier → default label.
pub fn infer_category(
    config: &ReconConfig,
    history: &HashMap<String, String>,
    memo: &str,
    counterparty: &str,
    classifier: Option<&dyn Classifier>,
) -> String {
    if let Some(category) = rule_category(&config.category_rules, memo, counterparty) {
        return category.to_string();
    }
    if let Some(category) = history.get(counterparty) {
        return category.clone();
    }
    if let Some(backend) = classifier {
        if let Some(label) = backend
            .classify(memo, counterparty)
            .as_deref()
            .and_then(sanitize_label)
        {
            return label;
        }
    }
    config.default_category.clone()
}

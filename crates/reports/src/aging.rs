//! Receivable and payable aging.
//!
//! Buckets exactly partition the unpaid total: every unpaid item lands
//! in exactly one bucket, so summing bucket amounts reproduces the total
//! without rounding slack.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tallybook_core::{percentage, round2, Order, OutsourcedProcessing};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgingBucket {
    pub label: String,
    pub amount: Decimal,
    pub item_count: usize,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgingReport {
    pub as_of: NaiveDate,
    pub total_unpaid: Decimal,
    pub buckets: Vec<AgingBucket>,
}

/// Age customer receivables: one entry per order with an outstanding
/// balance, aged from its order date.
pub fn receivable_aging(orders: &[Order], as_of: NaiveDate, edges: &[u32]) -> AgingReport {
    build(
        orders
            .iter()
            .map(|o| (o.order_date, o.outstanding()))
            .filter(|(_, due)| !due.is_zero()),
        as_of,
        edges,
    )
}

/// Age supplier payables from each outsourced record's date.
pub fn payable_aging(
    items: &[OutsourcedProcessing],
    as_of: NaiveDate,
    edges: &[u32],
) -> AgingReport {
    build(
        items
            .iter()
            .map(|op| (op.record_date, op.outstanding()))
            .filter(|(_, due)| !due.is_zero()),
        as_of,
        edges,
    )
}

fn bucket_labels(edges: &[u32]) -> Vec<String> {
    let mut labels = Vec::with_capacity(edges.len() + 1);
    let mut low = 0u32;
    for &edge in edges {
        labels.push(format!("{low}-{edge}天"));
        low = edge + 1;
    }
    match edges.last() {
        Some(last) => labels.push(format!(">{last}天")),
        None => labels.push("全部".to_string()),
    }
    labels
}

/// First bucket whose edge covers `age_days`; overflow bucket otherwise.
/// Future-dated items (negative age) count as current.
fn bucket_index(age_days: i64, edges: &[u32]) -> usize {
    if age_days <= 0 {
        return 0;
    }
    edges
        .iter()
        .position(|&edge| age_days <= i64::from(edge))
        .unwrap_or(edges.len())
}

fn build(
    entries: impl Iterator<Item = (NaiveDate, Decimal)>,
    as_of: NaiveDate,
    edges: &[u32],
) -> AgingReport {
    let labels = bucket_labels(edges);
    let mut amounts = vec![Decimal::ZERO; labels.len()];
    let mut counts = vec![0usize; labels.len()];

    for (reference_date, due) in entries {
        let age_days = (as_of - reference_date).num_days();
        let index = bucket_index(age_days, edges);
        amounts[index] += due;
        counts[index] += 1;
    }

    let total_unpaid = round2(amounts.iter().copied().sum());
    let buckets = labels
        .into_iter()
        .zip(amounts)
        .zip(counts)
        .map(|((label, amount), item_count)| AgingBucket {
            label,
            amount: round2(amount),
            item_count,
            percentage: percentage(amount, total_unpaid),
        })
        .collect();

    AgingReport {
        as_of,
        total_unpaid,
        buckets,
    }
}

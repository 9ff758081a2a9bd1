//! Cost engine: derive order economics from quantity and price fields.
//!
//! Orders carry stored `base_fee` / `outsourcing_cost` copies of these
//! derivations. [`update_order_costs`] refreshes the stored copies and
//! [`validate_order_costs`] reports where they have drifted.

use rust_decimal::Decimal;
use tallybook_core::{percentage, round2, Order, OutsourcedProcessing, PricingUnit};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CostError {
    /// A quantity or price went negative; the affected order is aborted,
    /// never silently clamped.
    NegativeInput {
        order_id: String,
        field: &'static str,
        value: Decimal,
    },
}

impl std::fmt::Display for CostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeInput { order_id, field, value } => {
                write!(f, "order {order_id}: negative {field} ({value})")
            }
        }
    }
}

impl std::error::Error for CostError {}

fn require_non_negative(
    order_id: &str,
    field: &'static str,
    value: Decimal,
) -> Result<(), CostError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CostError::NegativeInput {
            order_id: order_id.to_string(),
            field,
            value,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Derivations
// ---------------------------------------------------------------------------

/// `round2(quantity × unit_price)`.
pub fn base_fee(order: &Order) -> Result<Decimal, CostError> {
    require_non_negative(&order.id, "quantity", order.quantity)?;
    require_non_negative(&order.id, "unit_price", order.unit_price)?;
    Ok(round2(order.quantity * order.unit_price))
}

/// Sum of `round2(quantity × unit_price)` over the order's outsourced
/// work. Items belonging to other orders are ignored.
pub fn outsourcing_cost(
    order_id: &str,
    items: &[OutsourcedProcessing],
) -> Result<Decimal, CostError> {
    let mut total = Decimal::ZERO;
    for item in items.iter().filter(|i| i.order_id == order_id) {
        require_non_negative(order_id, "outsourced quantity", item.quantity)?;
        require_non_negative(order_id, "outsourced unit_price", item.unit_price)?;
        total += round2(item.quantity * item.unit_price);
    }
    Ok(round2(total))
}

/// Margin of the in-house share over the total, as a 2dp percentage.
/// Zero when the total fee is zero.
pub fn profit_margin(total_fee: Decimal, outsourcing: Decimal) -> Decimal {
    percentage(total_fee - outsourcing, total_fee)
}

/// Recompute and store `base_fee` and `outsourcing_cost` on the order.
/// Idempotent: a second call with the same inputs changes nothing.
pub fn update_order_costs(
    order: &mut Order,
    items: &[OutsourcedProcessing],
) -> Result<(), CostError> {
    let base = base_fee(order)?;
    let outsourced = outsourcing_cost(&order.id, items)?;
    order.base_fee = base;
    order.outsourcing_cost = outsourced;
    Ok(())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// One stored field that no longer matches its recomputation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CostMismatch {
    pub order_id: String,
    pub field: &'static str,
    pub stored: Decimal,
    pub computed: Decimal,
}

/// Compare an order's stored cost fields against fresh derivations.
/// An empty result means the stored copies are trustworthy.
pub fn validate_order_costs(
    order: &Order,
    items: &[OutsourcedProcessing],
) -> Result<Vec<CostMismatch>, CostError> {
    let mut mismatches = Vec::new();

    let computed = base_fee(order)?;
    if round2(order.base_fee) != computed {
        mismatches.push(CostMismatch {
            order_id: order.id.clone(),
            field: "base_fee",
            stored: round2(order.base_fee),
            computed,
        });
    }

    let computed = outsourcing_cost(&order.id, items)?;
    if round2(order.outsourcing_cost) != computed {
        mismatches.push(CostMismatch {
            order_id: order.id.clone(),
            field: "outsourcing_cost",
            stored: round2(order.outsourcing_cost),
            computed,
        });
    }

    Ok(mismatches)
}

// ---------------------------------------------------------------------------
// Pricing-unit rollups
// ---------------------------------------------------------------------------

/// Aggregate figures for one pricing unit (or all of them).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PricingRollup {
    /// `None` for the all-units total row.
    pub unit: Option<PricingUnit>,
    pub order_count: usize,
    pub total_quantity: Decimal,
    pub total_fee: Decimal,
    /// Simple mean of the orders' unit prices, 2dp. Not quantity-weighted;
    /// mixing units in the total row would make a weighted figure meaningless.
    pub average_unit_price: Decimal,
}

/// Per-unit rollups in `PricingUnit` order, followed by an all-units row.
pub fn pricing_unit_stats(orders: &[Order]) -> Vec<PricingRollup> {
    use std::collections::BTreeMap;

    let mut groups: BTreeMap<PricingUnit, Vec<&Order>> = BTreeMap::new();
    for order in orders {
        groups.entry(order.pricing_unit).or_default().push(order);
    }

    let mut rollups: Vec<PricingRollup> = groups
        .into_iter()
        .map(|(unit, members)| rollup(Some(unit), &members))
        .collect();
    rollups.push(rollup(None, &orders.iter().collect::<Vec<_>>()));
    rollups
}

fn rollup(unit: Option<PricingUnit>, members: &[&Order]) -> PricingRollup {
    let total_quantity = members.iter().map(|o| o.quantity).sum();
    let total_fee = round2(members.iter().map(|o| o.total_fee()).sum());
    let average_unit_price = if members.is_empty() {
        Decimal::ZERO
    } else {
        let sum: Decimal = members.iter().map(|o| o.unit_price).sum();
        round2(sum / Decimal::from(members.len()))
    };
    PricingRollup {
        unit,
        order_count: members.len(),
        total_quantity,
        total_fee,
        average_unit_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tallybook_core::OrderStatus;

    fn order(id: &str, quantity: Decimal, unit_price: Decimal) -> Order {
        Order {
            id: id.into(),
            customer: "客户A".into(),
            order_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            quantity,
            pricing_unit: PricingUnit::Meter,
            unit_price,
            base_fee: Decimal::ZERO,
            outsourcing_cost: Decimal::ZERO,
            received_amount: Decimal::ZERO,
            status: OrderStatus::Pending,
        }
    }

    fn outsourced(order_id: &str, quantity: Decimal, unit_price: Decimal) -> OutsourcedProcessing {
        OutsourcedProcessing {
            id: format!("op_{order_id}"),
            order_id: order_id.into(),
            supplier: "外协厂".into(),
            record_date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            quantity,
            unit_price,
            total_cost: round2(quantity * unit_price),
            paid_amount: Decimal::ZERO,
        }
    }

    #[test]
    fn meter_order_with_outsourcing() {
        // 100m at 5.50 with 200.00 of outsourced work.
        let mut o = order("ord_1", dec!(100), dec!(5.50));
        let items = vec![outsourced("ord_1", dec!(100), dec!(2.00))];
        update_order_costs(&mut o, &items).unwrap();

        assert_eq!(o.base_fee, dec!(550.00));
        assert_eq!(o.outsourcing_cost, dec!(200.00));
        assert_eq!(o.total_fee(), dec!(750.00));
        assert_eq!(o.total_fee() - o.outsourcing_cost, dec!(550.00));
        assert_eq!(profit_margin(o.total_fee(), o.outsourcing_cost), dec!(73.33));
    }

    #[test]
    fn update_is_idempotent() {
        let mut o = order("ord_1", dec!(12.5), dec!(3.33));
        let items = vec![outsourced("ord_1", dec!(4), dec!(1.11))];
        update_order_costs(&mut o, &items).unwrap();
        let snapshot = (o.base_fee, o.outsourcing_cost);
        update_order_costs(&mut o, &items).unwrap();
        assert_eq!((o.base_fee, o.outsourcing_cost), snapshot);
    }

    #[test]
    fn other_orders_items_do_not_leak() {
        let cost = outsourcing_cost(
            "ord_1",
            &[
                outsourced("ord_1", dec!(10), dec!(1)),
                outsourced("ord_2", dec!(99), dec!(9)),
            ],
        )
        .unwrap();
        assert_eq!(cost, dec!(10));
    }

    #[test]
    fn negative_quantity_aborts_the_order() {
        let o = order("ord_1", dec!(-1), dec!(5));
        let err = base_fee(&o).unwrap_err();
        assert!(matches!(err, CostError::NegativeInput { field: "quantity", .. }));
    }

    #[test]
    fn negative_outsourced_price_aborts() {
        let err = outsourcing_cost("ord_1", &[outsourced("ord_1", dec!(1), dec!(-2))]).unwrap_err();
        assert!(matches!(err, CostError::NegativeInput { .. }));
    }

    #[test]
    fn drifted_stored_fields_are_reported() {
        let mut o = order("ord_1", dec!(100), dec!(5.50));
        o.base_fee = dec!(500.00); // stale
        o.outsourcing_cost = dec!(200.00);
        let items = vec![outsourced("ord_1", dec!(100), dec!(2.00))];

        let mismatches = validate_order_costs(&o, &items).unwrap();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].field, "base_fee");
        assert_eq!(mismatches[0].stored, dec!(500.00));
        assert_eq!(mismatches[0].computed, dec!(550.00));
    }

    #[test]
    fn clean_order_validates_empty() {
        let mut o = order("ord_1", dec!(100), dec!(5.50));
        let items = vec![outsourced("ord_1", dec!(100), dec!(2.00))];
        update_order_costs(&mut o, &items).unwrap();
        assert!(validate_order_costs(&o, &items).unwrap().is_empty());
    }

    #[test]
    fn rollups_group_by_unit_and_append_total() {
        let mut a = order("a", dec!(100), dec!(5.50));
        a.pricing_unit = PricingUnit::Meter;
        a.base_fee = dec!(550.00);
        let mut b = order("b", dec!(20), dec!(3.00));
        b.pricing_unit = PricingUnit::Kilogram;
        b.base_fee = dec!(60.00);

        let stats = pricing_unit_stats(&[a, b]);
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].unit, Some(PricingUnit::Meter));
        assert_eq!(stats[0].total_fee, dec!(550.00));
        assert_eq!(stats[1].unit, Some(PricingUnit::Kilogram));

        let total = stats.last().unwrap();
        assert_eq!(total.unit, None);
        assert_eq!(total.order_count, 2);
        assert_eq!(total.total_quantity, dec!(120));
        assert_eq!(total.total_fee, dec!(610.00));
        assert_eq!(total.average_unit_price, dec!(4.25));
    }
}

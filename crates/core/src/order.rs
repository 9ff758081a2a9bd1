use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::round2;

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

/// Unit of measure used to price a processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingUnit {
    Piece,
    Strip,
    Unit,
    Item,
    Meter,
    Kilogram,
    SquareMeter,
}

impl std::fmt::Display for PricingUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Piece => write!(f, "piece"),
            Self::Strip => write!(f, "strip"),
            Self::Unit => write!(f, "unit"),
            Self::Item => write!(f, "item"),
            Self::Meter => write!(f, "meter"),
            Self::Kilogram => write!(f, "kilogram"),
            Self::SquareMeter => write!(f, "square_meter"),
        }
    }
}

// ---------------------------------------------------------------------------
// Order lifecycle
// ---------------------------------------------------------------------------

/// Process-tracking status. Advanced only by explicit updates; never gates
/// or alters financial calculations, which depend solely on amount, date,
/// and payment fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Outsourced,
    Completed,
    Delivered,
    Paid,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Outsourced => write!(f, "outsourced"),
            Self::Completed => write!(f, "completed"),
            Self::Delivered => write!(f, "delivered"),
            Self::Paid => write!(f, "paid"),
        }
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// A processing order. `base_fee` and `outsourcing_cost` are derived fields
/// recomputed by the cost engine; the stored copies exist so reports can be
/// cross-checked against them for silent drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer: String,
    pub order_date: NaiveDate,
    pub quantity: Decimal,
    pub pricing_unit: PricingUnit,
    pub unit_price: Decimal,
    pub base_fee: Decimal,
    pub outsourcing_cost: Decimal,
    pub received_amount: Decimal,
    pub status: OrderStatus,
}

impl Order {
    /// Stored total fee: base fee plus outsourcing cost.
    pub fn total_fee(&self) -> Decimal {
        round2(self.base_fee + self.outsourcing_cost)
    }

    /// Amount still owed by the customer, floored at zero.
    pub fn outstanding(&self) -> Decimal {
        let due = self.total_fee() - self.received_amount;
        if due.is_sign_negative() {
            Decimal::ZERO
        } else {
            due
        }
    }
}

/// Work farmed out to a supplier against an order.
/// `total_cost = round2(quantity × unit_price)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutsourcedProcessing {
    pub id: String,
    pub order_id: String,
    pub supplier: String,
    pub record_date: NaiveDate,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_cost: Decimal,
    pub paid_amount: Decimal,
}

impl OutsourcedProcessing {
    /// Amount still owed to the supplier, floored at zero.
    pub fn outstanding(&self) -> Decimal {
        let due = self.total_cost - self.paid_amount;
        if due.is_sign_negative() {
            Decimal::ZERO
        } else {
            due
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order() -> Order {
        Order {
            id: "ord_1".into(),
            customer: "客户A".into(),
            order_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            quantity: dec!(100),
            pricing_unit: PricingUnit::Meter,
            unit_price: dec!(5.50),
            base_fee: dec!(550.00),
            outsourcing_cost: dec!(200.00),
            received_amount: dec!(0),
            status: OrderStatus::Pending,
        }
    }

    #[test]
    fn total_fee_sums_components() {
        assert_eq!(order().total_fee(), dec!(750.00));
    }

    #[test]
    fn outstanding_floors_at_zero() {
        let mut o = order();
        o.received_amount = dec!(800.00);
        assert_eq!(o.outstanding(), Decimal::ZERO);

        o.received_amount = dec!(300.00);
        assert_eq!(o.outstanding(), dec!(450.00));
    }

    #[test]
    fn outsourced_outstanding() {
        let op = OutsourcedProcessing {
            id: "op_1".into(),
            order_id: "ord_1".into(),
            supplier: "外协厂".into(),
            record_date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            quantity: dec!(100),
            unit_price: dec!(2.00),
            total_cost: dec!(200.00),
            paid_amount: dec!(50.00),
        };
        assert_eq!(op.outstanding(), dec!(150.00));
    }
}

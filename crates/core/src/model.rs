use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Ledger transactions
// ---------------------------------------------------------------------------

/// Direction of a ledger transaction. Amounts are stored as non-negative
/// magnitudes; the business type carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Receipt,
    Payment,
    Expense,
}

impl BusinessType {
    /// True for money leaving the business (payments and expenses).
    pub fn is_outflow(&self) -> bool {
        matches!(self, Self::Payment | Self::Expense)
    }
}

impl std::fmt::Display for BusinessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Receipt => write!(f, "receipt"),
            Self::Payment => write!(f, "payment"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// One ledger transaction as stored in the external tabular store.
///
/// Append-mostly: after creation only the invoice/ticket flags and payment
/// allocations are amended, never the structural fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub business_type: BusinessType,
    /// Non-negative magnitude, quantized to 2dp.
    pub amount: Decimal,
    pub counterparty: String,
    pub bank_account: String,
    pub has_invoice: bool,
    pub category: String,
    pub memo: String,
}

// ---------------------------------------------------------------------------
// Statement lines
// ---------------------------------------------------------------------------

/// A normalized row from an imported bank/business statement.
/// Transient: exists only for the duration of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    pub date: NaiveDate,
    /// Signed: negative for outflows.
    pub amount: Decimal,
    pub counterparty_raw: String,
    pub memo_raw: String,
}

impl StatementLine {
    /// The business type a statement line suggests for a new ledger entry.
    pub fn suggested_business_type(&self) -> BusinessType {
        if self.amount.is_sign_negative() {
            BusinessType::Payment
        } else {
            BusinessType::Receipt
        }
    }
}

//! Money helpers. All stored monetary values are quantized to 2 decimal
//! places at every computed boundary; raw floats are never used.

use rust_decimal::Decimal;

/// Quantize to 2 decimal places (cent precision).
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp(2)
}

/// Parse an amount cell into a signed `Decimal`.
///
/// Tolerates currency symbols, thousands separators, surrounding
/// whitespace, and accounting-style parentheses for negatives.
/// Returns `None` for anything that does not parse — callers skip the
/// row and count the failure rather than abort.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut negative = false;
    let mut cleaned = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        match ch {
            ',' | '￥' | '¥' | '$' | '元' | ' ' => {}
            '(' | ')' => negative = true,
            '-' => {
                negative = true;
            }
            _ => cleaned.push(ch),
        }
    }

    let value: Decimal = cleaned.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Percentage share of `part` in `total`, quantized to 2dp.
/// Defined as 0 when `total` is zero.
pub fn percentage(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    round2(part / total * Decimal::ONE_HUNDRED)
}

//! Money arithmetic in integer minor units.
//!
//! All monetary values are carried as `i64` minor units (cents). Sums of
//! cents are exact; the single place where fractional arithmetic occurs
//! (applying a percentage) rounds the final figure only, half away from
//! zero, so no drift accumulates across line items.

/// Monetary amount in minor units (cents). Negative values are legal:
/// a commission payout can exceed a profit share.
pub type Cents = i64;

/// Round a fractional cent amount to the nearest whole cent, half away
/// from zero.
pub fn round_half_away(value: f64) -> Cents {
    if value >= 0.0 {
        (value + 0.5).floor() as Cents
    } else {
        (value - 0.5).ceil() as Cents
    }
}

/// Apply a percentage to an amount, rounding the result half away from
/// zero. Used for commission (`profit × rate / 100`).
pub fn apply_pct(amount: Cents, pct: f64) -> Cents {
    round_half_away(amount as f64 * pct / 100.0)
}

/// Render an amount with two decimals, e.g. `4.50` or `-80.00`.
pub fn display(amount: Cents) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

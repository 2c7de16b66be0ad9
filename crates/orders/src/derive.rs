//! Financial derivation engine.
//!
//! Pure computation from an order's inputs to its derived money fields.
//! Never errors: absent inputs degrade to zero. Sums of minor units are
//! exact; only the commission (a percentage of profit) needs rounding, and
//! it is rounded once, on the final figure, half away from zero.

use shipledger_core::{Cents, money};

use crate::order::LineItem;

/// Output of one derivation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Financials {
    /// `Σ item.price + courier_paid_extra`.
    pub total_paid: Cents,
    /// `total_paid − (Σ item.cost + courier_cost_expense +
    /// packing_cost_expense)`. Commission is *not* subtracted here; it is
    /// paid out of the business share downstream.
    pub profit: Cents,
    /// Snapshot of the rate that was applied (0 when no agent is linked).
    pub commission_pct: f64,
    /// `profit × rate / 100`, rounded half away from zero.
    pub commission_amount: Cents,
}

/// Derive the money fields for one order.
///
/// `agent_rate_pct` is the effective commission rate: the linked agent's
/// default on first link, or a manual override on later edits. `None`
/// means no agent is linked and the commission is zero.
pub fn derive(
    items: &[LineItem],
    courier_paid_extra: Cents,
    courier_cost_expense: Cents,
    packing_cost_expense: Cents,
    agent_rate_pct: Option<f64>,
) -> Financials {
    let revenue: Cents = items.iter().map(|item| item.price).sum();
    let items_cost: Cents = items.iter().map(|item| item.cost).sum();

    let total_paid = revenue + courier_paid_extra;
    let direct_cost = items_cost + courier_cost_expense + packing_cost_expense;
    let profit = total_paid - direct_cost;

    let commission_pct = agent_rate_pct.filter(|rate| rate.is_finite()).unwrap_or(0.0);
    let commission_amount = if commission_pct != 0.0 {
        money::apply_pct(profit, commission_pct)
    } else {
        0
    };

    Financials { total_paid, profit, commission_pct, commission_amount }
}

//! Billing aggregation: per-subject allocation over a date range.
//!
//! Allocation rules are business constants:
//! - owner share       = 50% of profit
//! - operating share   = 50% of profit − all commissions
//! - partner subject   = sum of that partner's courier costs (fee income)
//! - agent subject     = sum of that agent's commissions
//!
//! Returned shipments are counted asymmetrically, and intentionally so:
//! the courier fee was spent with no revenue, so a returned order
//! contributes `−courier_cost_expense` to profit aggregates and zero to
//! sales revenue — while the partner still gets credited the full fee for
//! the failed attempt.

use serde::{Deserialize, Serialize};

use shipledger_core::{Cents, DateRange, money};
use shipledger_orders::{Order, OrderStatus};

use crate::subject::{BillingSubject, InternalRecipient};

/// Result of one billing computation. The explanation carries the actual
/// figures so approval screens can show *why* the amount is what it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingStatement {
    pub amount: Cents,
    pub order_count: usize,
    pub explanation: String,
}

/// Profit contribution of one order to internal share aggregates.
pub fn effective_profit(order: &Order) -> Cents {
    if order.status == OrderStatus::Returned {
        -order.courier_cost_expense
    } else {
        order.profit
    }
}

/// Revenue contribution of one order to sales totals.
pub fn sales_contribution(order: &Order) -> Cents {
    if order.status == OrderStatus::Returned {
        0
    } else {
        order.total_paid
    }
}

/// Compute the invoiced amount for a subject over an inclusive date range.
///
/// Zero matching orders yield amount 0, not an error. A negative amount is
/// a valid outcome (commissions can exceed the profit share) and is
/// preserved, never clamped.
pub fn compute_amount(
    subject: BillingSubject,
    range: DateRange,
    orders: &[Order],
) -> BillingStatement {
    let in_range: Vec<&Order> = orders
        .iter()
        .filter(|order| range.contains(order.date))
        .filter(|order| match subject {
            BillingSubject::Internal(_) => true,
            BillingSubject::Partner(partner_id) => order.partner_id == Some(partner_id),
            BillingSubject::Agent(agent_id) => order.sales_agent_id == Some(agent_id),
        })
        .collect();
    let order_count = in_range.len();

    match subject {
        BillingSubject::Internal(recipient) => {
            let profit: Cents = in_range.iter().map(|o| effective_profit(o)).sum();
            let half = money::apply_pct(profit, 50.0);
            match recipient {
                InternalRecipient::OwnerShare => BillingStatement {
                    amount: half,
                    order_count,
                    explanation: format!(
                        "profit {} × 50% = {}",
                        money::display(profit),
                        money::display(half)
                    ),
                },
                InternalRecipient::OperatingShare => {
                    let commissions: Cents =
                        in_range.iter().map(|o| o.commission_amount).sum();
                    let amount = half - commissions;
                    BillingStatement {
                        amount,
                        order_count,
                        explanation: format!(
                            "(profit {} × 50%) − commissions {} = {}",
                            money::display(profit),
                            money::display(commissions),
                            money::display(amount)
                        ),
                    }
                }
            }
        }
        BillingSubject::Partner(_) => {
            let amount: Cents = in_range.iter().map(|o| o.courier_cost_expense).sum();
            BillingStatement {
                amount,
                order_count,
                explanation: format!(
                    "sum of courier costs over {} orders = {}",
                    order_count,
                    money::display(amount)
                ),
            }
        }
        BillingSubject::Agent(_) => {
            let amount: Cents = in_range.iter().map(|o| o.commission_amount).sum();
            BillingStatement {
                amount,
                order_count,
                explanation: format!(
                    "sum of commissions over {} orders = {}",
                    order_count,
                    money::display(amount)
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shipledger_core::{AgentId, PartnerId, UserId};
    use shipledger_orders::{LineItem, OrderDraft, build_order};

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
        )
        .unwrap()
    }

    fn order(
        partner: Option<PartnerId>,
        agent: Option<(AgentId, f64)>,
        price: Cents,
        courier_cost: Cents,
        status: OrderStatus,
    ) -> Order {
        let draft = OrderDraft {
            customer_name: "Customer".to_string(),
            date: Some("2024-04-10T09:00:00Z".parse().unwrap()),
            items: vec![LineItem { name: "Parcel".to_string(), cost: 0, price }],
            courier_cost_expense: Some(courier_cost),
            status: Some(OrderStatus::Pending),
            ..OrderDraft::default()
        };
        let mut order = build_order(
            &draft,
            "AWB".to_string(),
            "1001".to_string(),
            partner,
            agent.map(|(id, _)| id),
            agent.map(|(_, rate)| rate),
            UserId::new(),
            "2024-04-10T09:00:00Z".parse().unwrap(),
        )
        .unwrap();
        order.status = status;
        order
    }

    #[test]
    fn owner_share_is_half_of_profit() {
        let orders = vec![
            order(None, None, 10_000, 2_000, OrderStatus::Delivered), // profit 80.00
            order(None, None, 6_000, 1_000, OrderStatus::Pending),    // profit 50.00
        ];
        let stmt = compute_amount(
            BillingSubject::Internal(InternalRecipient::OwnerShare),
            range(),
            &orders,
        );
        assert_eq!(stmt.amount, 6_500);
        assert_eq!(stmt.order_count, 2);
        assert_eq!(stmt.explanation, "profit 130.00 × 50% = 65.00");
    }

    #[test]
    fn operating_share_subtracts_commissions() {
        let agent = AgentId::new();
        let orders = vec![
            // profit 80.00, commission 8.00
            order(None, Some((agent, 10.0)), 10_000, 2_000, OrderStatus::Delivered),
        ];
        let stmt = compute_amount(
            BillingSubject::Internal(InternalRecipient::OperatingShare),
            range(),
            &orders,
        );
        assert_eq!(stmt.amount, 4_000 - 800);
        assert!(stmt.explanation.contains("− commissions 8.00"));
    }

    #[test]
    fn operating_share_can_go_negative() {
        let agent = AgentId::new();
        // profit 10.00, commission at 80% = 8.00; half profit 5.00 − 8.00 = −3.00
        let orders =
            vec![order(None, Some((agent, 80.0)), 3_000, 2_000, OrderStatus::Pending)];
        let stmt = compute_amount(
            BillingSubject::Internal(InternalRecipient::OperatingShare),
            range(),
            &orders,
        );
        assert_eq!(stmt.amount, -300);
    }

    #[test]
    fn returned_order_counts_against_profit_but_for_partner() {
        let partner = PartnerId::new();
        let orders =
            vec![order(Some(partner), None, 10_000, 8_000, OrderStatus::Returned)];

        // internal profit share: −80.00 halved
        let stmt = compute_amount(
            BillingSubject::Internal(InternalRecipient::OwnerShare),
            range(),
            &orders,
        );
        assert_eq!(stmt.amount, -4_000);
        assert!(stmt.explanation.contains("profit -80.00"));

        // partner fee income: the full 80.00
        let stmt = compute_amount(BillingSubject::Partner(partner), range(), &orders);
        assert_eq!(stmt.amount, 8_000);

        // sales revenue contribution is zero
        assert_eq!(sales_contribution(&orders[0]), 0);
    }

    #[test]
    fn partner_subject_only_counts_linked_orders() {
        let mine = PartnerId::new();
        let other = PartnerId::new();
        let orders = vec![
            order(Some(mine), None, 5_000, 1_500, OrderStatus::Shipped),
            order(Some(other), None, 5_000, 9_900, OrderStatus::Shipped),
            order(None, None, 5_000, 700, OrderStatus::Shipped),
        ];
        let stmt = compute_amount(BillingSubject::Partner(mine), range(), &orders);
        assert_eq!(stmt.amount, 1_500);
        assert_eq!(stmt.order_count, 1);
    }

    #[test]
    fn agent_subject_sums_commissions() {
        let agent = AgentId::new();
        let orders = vec![
            // profit 80.00 at 10% = 8.00
            order(None, Some((agent, 10.0)), 10_000, 2_000, OrderStatus::Delivered),
            // unlinked order contributes nothing
            order(None, None, 10_000, 2_000, OrderStatus::Delivered),
        ];
        let stmt = compute_amount(BillingSubject::Agent(agent), range(), &orders);
        assert_eq!(stmt.amount, 800);
        assert_eq!(stmt.order_count, 1);
    }

    #[test]
    fn empty_range_yields_zero_not_error() {
        let stmt = compute_amount(
            BillingSubject::Internal(InternalRecipient::OwnerShare),
            range(),
            &[],
        );
        assert_eq!(stmt.amount, 0);
        assert_eq!(stmt.order_count, 0);
    }

    #[test]
    fn range_bounds_are_day_inclusive() {
        let mut first = order(None, None, 10_000, 0, OrderStatus::Pending);
        first.date = "2024-04-01T00:00:00Z".parse().unwrap();
        let mut last = order(None, None, 10_000, 0, OrderStatus::Pending);
        last.date = "2024-04-30T23:59:59.999Z".parse().unwrap();
        let mut outside = order(None, None, 10_000, 0, OrderStatus::Pending);
        outside.date = "2024-05-01T00:00:00Z".parse().unwrap();

        let stmt = compute_amount(
            BillingSubject::Internal(InternalRecipient::OwnerShare),
            range(),
            &[first, last, outside],
        );
        assert_eq!(stmt.order_count, 2);
    }
}

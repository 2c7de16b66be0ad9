//! Field-visibility projection of orders.
//!
//! Restricted viewer logins only see an allow-listed subset of order
//! columns. The projection runs after scope filtering, on records the
//! actor may already see; it redacts columns, never rows.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shipledger_auth::{FieldVisibility, fields};
use shipledger_core::{Cents, OrderId};
use shipledger_orders::{LineItem, Order, OrderStatus, SearchContext};

/// An order as one actor is allowed to see it. Redacted columns serialize
/// as absent rather than null, so a restricted client cannot tell a hidden
/// value from a missing one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderView {
    pub id: OrderId,
    pub slip_no: String,
    /// Resolved partner name, when a partner is linked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entered_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<LineItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courier_paid_extra: Option<Cents>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courier_cost_expense: Option<Cents>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packing_cost_expense: Option<Cents>,
    /// Resolved sales agent name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_paid: Option<Cents>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit: Option<Cents>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_amount: Option<Cents>,
}

impl OrderView {
    /// Project an order through an actor's visibility capability. `ctx`
    /// carries the resolved link names (the caller owns the lookups).
    pub fn project(order: &Order, ctx: &SearchContext<'_>, visibility: &FieldVisibility) -> Self {
        fn keep<T>(visible: bool, value: Option<T>) -> Option<T> {
            if visible { value } else { None }
        }
        let show = |field: &str| visibility.is_visible(field);

        Self {
            id: order.id,
            slip_no: order.slip_no.clone(),
            partner: ctx.partner_name.map(str::to_string),
            entered_by: ctx.entered_by_username.map(str::to_string),
            tracking_id: keep(show(fields::TRACKING_ID), Some(order.tracking_id.clone())),
            date: keep(show(fields::DATE), Some(order.date)),
            customer_name: keep(
                show(fields::CUSTOMER_NAME),
                Some(order.customer_name.clone()),
            ),
            phone_number: keep(show(fields::PHONE_NUMBER), order.phone_number.clone()),
            // The pincode is part of the delivery address block.
            address: keep(show(fields::ADDRESS), order.address.clone()),
            pincode: keep(show(fields::ADDRESS), order.pincode.clone()),
            items: keep(show(fields::PRODUCTS), Some(order.items.clone())),
            courier_paid_extra: keep(
                show(fields::COURIER_PAID),
                Some(order.courier_paid_extra),
            ),
            courier_cost_expense: keep(
                show(fields::COURIER_COST),
                Some(order.courier_cost_expense),
            ),
            packing_cost_expense: keep(
                show(fields::PACKING_COST),
                Some(order.packing_cost_expense),
            ),
            sales_agent: keep(
                show(fields::SALES_EXECUTIVE),
                ctx.agent_name.map(str::to_string),
            ),
            status: keep(show(fields::STATUS), Some(order.status)),
            total_paid: keep(show(fields::TOTAL_PAID), Some(order.total_paid)),
            profit: keep(show(fields::PROFIT), Some(order.profit)),
            commission_pct: keep(show(fields::COMMISSION_PCT), Some(order.commission_pct)),
            commission_amount: keep(
                show(fields::COMMISSION_AMOUNT),
                Some(order.commission_amount),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipledger_core::UserId;
    use shipledger_orders::{OrderDraft, build_order};

    fn sample_order() -> Order {
        let draft = OrderDraft {
            customer_name: "Asha Nair".to_string(),
            phone_number: Some("9876543210".to_string()),
            address: Some("12 Beach Road, Kochi".to_string()),
            pincode: Some("682001".to_string()),
            items: vec![LineItem { name: "Phone Case".to_string(), cost: 100, price: 150 }],
            ..OrderDraft::default()
        };
        build_order(
            &draft,
            "AWB9000".to_string(),
            "1001".to_string(),
            None,
            None,
            None,
            UserId::new(),
            "2024-04-02T10:00:00Z".parse().unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn unrestricted_view_keeps_every_field() {
        let order = sample_order();
        let view = OrderView::project(&order, &SearchContext::default(), &FieldVisibility::All);
        assert_eq!(view.customer_name.as_deref(), Some("Asha Nair"));
        assert_eq!(view.profit, Some(order.profit));
        assert_eq!(view.commission_amount, Some(0));
        assert!(view.items.is_some());
    }

    #[test]
    fn restricted_view_redacts_hidden_columns() {
        let order = sample_order();
        let visibility = FieldVisibility::parse("customerName,status,trackingId");
        let view = OrderView::project(&order, &SearchContext::default(), &visibility);
        assert_eq!(view.customer_name.as_deref(), Some("Asha Nair"));
        assert_eq!(view.status, Some(OrderStatus::Pending));
        assert_eq!(view.tracking_id.as_deref(), Some("AWB9000"));
        assert!(view.profit.is_none());
        assert!(view.commission_amount.is_none());
        assert!(view.items.is_none());
        assert!(view.phone_number.is_none());
        assert!(view.address.is_none());
        assert!(view.pincode.is_none());
    }

    #[test]
    fn redacted_fields_are_absent_from_json() {
        let order = sample_order();
        let visibility = FieldVisibility::parse("status");
        let view = OrderView::project(&order, &SearchContext::default(), &visibility);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("profit").is_none());
        assert!(json.get("status").is_some());
    }

    #[test]
    fn address_visibility_covers_the_pincode() {
        let order = sample_order();
        let visibility = FieldVisibility::parse("address");
        let view = OrderView::project(&order, &SearchContext::default(), &visibility);
        assert_eq!(view.pincode.as_deref(), Some("682001"));
    }
}

//! Order creation and partial-update merge semantics.
//!
//! A draft becomes an order in one derivation pass. A patch merges over
//! the stored record; the derivation re-runs only when the patch touches
//! line items, payment figures, cost figures, the agent link, or the
//! commission rate. Status-only and free-text updates keep the stored
//! derived fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shipledger_core::{AgentId, Cents, DomainError, DomainResult, OrderId, PartnerId, UserId};

use crate::order::{LineItem, Order, OrderStatus, ensure_dispatch_ready};

/// Payload for creating an order. Optional monetary inputs default to
/// zero; optional date defaults to the request time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDraft {
    pub tracking_id: Option<String>,
    pub slip_no: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub customer_name: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub pincode: Option<String>,
    pub items: Vec<LineItem>,
    pub courier_paid_extra: Option<Cents>,
    pub courier_cost_expense: Option<Cents>,
    pub packing_cost_expense: Option<Cents>,
    pub sales_agent_id: Option<AgentId>,
    pub partner_id: Option<PartnerId>,
    /// Manual rate override; otherwise the linked agent's default applies.
    pub commission_pct: Option<f64>,
    pub status: Option<OrderStatus>,
}

/// Build a new order from a draft whose linkage the caller has already
/// resolved (partner force-set for partner actors, staff auto-link,
/// generated slip number and placeholder tracking id).
///
/// `agent_rate_pct` is the linked agent's default commission rate; a
/// `commission_pct` override in the draft wins over it.
#[allow(clippy::too_many_arguments)]
pub fn build_order(
    draft: &OrderDraft,
    tracking_id: String,
    slip_no: String,
    partner_id: Option<PartnerId>,
    sales_agent_id: Option<AgentId>,
    agent_rate_pct: Option<f64>,
    entered_by: UserId,
    now: DateTime<Utc>,
) -> DomainResult<Order> {
    if draft.customer_name.trim().is_empty() {
        return Err(DomainError::validation("customer name is required"));
    }
    let items = validated_items(&draft.items)?;

    let status = draft.status.unwrap_or(OrderStatus::Pending);
    ensure_dispatch_ready(status, &tracking_id, partner_id)?;

    let mut order = Order {
        id: OrderId::new(),
        tracking_id,
        slip_no,
        date: draft.date.unwrap_or(now),
        customer_name: draft.customer_name.trim().to_string(),
        phone_number: draft.phone_number.clone(),
        address: draft.address.clone(),
        pincode: draft.pincode.clone(),
        items,
        courier_paid_extra: draft.courier_paid_extra.unwrap_or_default(),
        courier_cost_expense: draft.courier_cost_expense.unwrap_or_default(),
        packing_cost_expense: draft.packing_cost_expense.unwrap_or_default(),
        sales_agent_id,
        partner_id,
        status,
        total_paid: 0,
        profit: 0,
        commission_pct: 0.0,
        commission_amount: 0,
        entered_by,
        created_at: now,
        updated_at: now,
    };
    order.recompute(draft.commission_pct.or(agent_rate_pct));
    Ok(order)
}

/// Partial update. `None` keeps the stored value; for the nullable link
/// fields, `Some(None)` unlinks and `Some(Some(id))` relinks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderPatch {
    pub tracking_id: Option<String>,
    pub slip_no: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub customer_name: Option<String>,
    pub phone_number: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub pincode: Option<Option<String>>,
    pub items: Option<Vec<LineItem>>,
    pub courier_paid_extra: Option<Cents>,
    pub courier_cost_expense: Option<Cents>,
    pub packing_cost_expense: Option<Cents>,
    pub sales_agent_id: Option<Option<AgentId>>,
    pub partner_id: Option<Option<PartnerId>>,
    pub commission_pct: Option<f64>,
    pub status: Option<OrderStatus>,
}

impl OrderPatch {
    /// Does this patch touch anything the derivation depends on?
    pub fn touches_financials(&self) -> bool {
        self.items.is_some()
            || self.courier_paid_extra.is_some()
            || self.courier_cost_expense.is_some()
            || self.packing_cost_expense.is_some()
            || self.sales_agent_id.is_some()
            || self.commission_pct.is_some()
    }
}

/// Merge a patch into an order.
///
/// The dispatch guard is evaluated against the merged record: a status
/// change that omits the tracking id or partner is judged on the stored
/// values. `default_rate_for` resolves an agent's default commission rate
/// and is only consulted when the patch relinks the agent without an
/// explicit rate override.
pub fn apply_patch(
    order: &mut Order,
    patch: &OrderPatch,
    default_rate_for: impl Fn(AgentId) -> Option<f64>,
    now: DateTime<Utc>,
) -> DomainResult<()> {
    let merged_tracking = patch.tracking_id.as_deref().unwrap_or(&order.tracking_id);
    let merged_partner = match patch.partner_id {
        Some(linked) => linked,
        None => order.partner_id,
    };
    if let Some(status) = patch.status {
        ensure_dispatch_ready(status, merged_tracking, merged_partner)?;
    }

    if let Some(name) = &patch.customer_name {
        if name.trim().is_empty() {
            return Err(DomainError::validation("customer name is required"));
        }
    }
    let new_items = match &patch.items {
        Some(items) => Some(validated_items(items)?),
        None => None,
    };

    let agent_relinked = matches!(patch.sales_agent_id, Some(Some(id)) if Some(id) != order.sales_agent_id);

    if let Some(tracking_id) = &patch.tracking_id {
        order.tracking_id = tracking_id.clone();
    }
    if let Some(slip_no) = &patch.slip_no {
        order.slip_no = slip_no.clone();
    }
    if let Some(date) = patch.date {
        order.date = date;
    }
    if let Some(name) = &patch.customer_name {
        order.customer_name = name.trim().to_string();
    }
    if let Some(phone) = &patch.phone_number {
        order.phone_number = phone.clone();
    }
    if let Some(address) = &patch.address {
        order.address = address.clone();
    }
    if let Some(pincode) = &patch.pincode {
        order.pincode = pincode.clone();
    }
    if let Some(items) = new_items {
        order.items = items;
    }
    if let Some(extra) = patch.courier_paid_extra {
        order.courier_paid_extra = extra;
    }
    if let Some(cost) = patch.courier_cost_expense {
        order.courier_cost_expense = cost;
    }
    if let Some(cost) = patch.packing_cost_expense {
        order.packing_cost_expense = cost;
    }
    if let Some(linked) = patch.sales_agent_id {
        order.sales_agent_id = linked;
    }
    if let Some(linked) = patch.partner_id {
        order.partner_id = linked;
    }
    if let Some(status) = patch.status {
        order.status = status;
    }
    order.updated_at = now;

    if patch.touches_financials() {
        let rate = match order.sales_agent_id {
            None => None,
            Some(agent_id) => Some(match patch.commission_pct {
                Some(rate) => rate,
                None if agent_relinked => default_rate_for(agent_id).unwrap_or(0.0),
                None => order.commission_pct,
            }),
        };
        order.recompute(rate);
    }

    Ok(())
}

fn validated_items(items: &[LineItem]) -> DomainResult<Vec<LineItem>> {
    items
        .iter()
        .map(|item| LineItem::new(item.name.clone(), item.cost, item.price))
        .collect()
}

//! Order operations: listing, create, update, delete, entry autocomplete.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use shipledger_auth::{Actor, OrderScope, Role, WriteOperation, can_write};
use shipledger_core::{
    AgentId, Cents, DateRange, DomainError, DomainResult, OrderId, PartnerId, UserId,
};
use shipledger_orders::{
    Order, OrderDraft, OrderPatch, SearchContext, TEMP_TRACKING_PREFIX, apply_patch,
    build_order, matches,
};
use shipledger_store::Store;

use crate::view::OrderView;

/// Listing filters. Search terms are whitespace-tokenized; every token
/// must hit at least one searchable field.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    pub search: Option<String>,
    pub range: Option<DateRange>,
}

struct LinkNames {
    agents: HashMap<AgentId, String>,
    partners: HashMap<PartnerId, String>,
    users: HashMap<UserId, String>,
}

impl LinkNames {
    fn load(store: &impl Store) -> DomainResult<Self> {
        Ok(Self {
            agents: store.agents()?.into_iter().map(|a| (a.id, a.name)).collect(),
            partners: store.partners()?.into_iter().map(|p| (p.id, p.name)).collect(),
            users: store.users()?.into_iter().map(|u| (u.id, u.username)).collect(),
        })
    }

    fn context_for(&self, order: &Order) -> SearchContext<'_> {
        SearchContext {
            agent_name: order
                .sales_agent_id
                .and_then(|id| self.agents.get(&id))
                .map(String::as_str),
            partner_name: order
                .partner_id
                .and_then(|id| self.partners.get(&id))
                .map(String::as_str),
            entered_by_username: self.users.get(&order.entered_by).map(String::as_str),
        }
    }
}

/// List the orders the actor may see, newest first, with the actor's
/// field-visibility projection applied last.
pub fn list_orders(
    store: &impl Store,
    actor: &Actor,
    query: &OrderQuery,
) -> DomainResult<Vec<OrderView>> {
    let scope = OrderScope::for_actor(actor);
    let names = LinkNames::load(store)?;

    let mut orders: Vec<Order> = store
        .orders()?
        .into_iter()
        .filter(|order| scope.allows(order.entered_by, order.partner_id))
        .filter(|order| query.range.is_none_or(|range| range.contains(order.date)))
        .collect();
    if let Some(search) = query.search.as_deref() {
        orders.retain(|order| matches(order, &names.context_for(order), search));
    }
    orders.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(orders
        .iter()
        .map(|order| {
            OrderView::project(order, &names.context_for(order), &actor.visible_fields)
        })
        .collect())
}

/// Create an order on behalf of the actor.
///
/// Partner actors are force-linked to their own partner profile (a
/// client-supplied partner id is never trusted for them); staff actors
/// with no explicit agent selection are auto-linked to their own sales
/// agent profile so their commission accrues. A missing tracking id gets
/// a temporary placeholder, a missing slip number the next sequence
/// value.
pub fn create_order(
    store: &impl Store,
    actor: &Actor,
    draft: &OrderDraft,
    now: DateTime<Utc>,
) -> DomainResult<OrderView> {
    if !can_write(actor, WriteOperation::CreateOrder) {
        return Err(DomainError::Unauthorized);
    }

    let partner_id = match actor.role {
        Role::Partner => Some(actor.partner_id.ok_or(DomainError::Unauthorized)?),
        _ => match draft.partner_id {
            Some(id) => {
                store.partner(id)?.ok_or(DomainError::NotFound)?;
                Some(id)
            }
            None => None,
        },
    };

    let sales_agent_id = match draft.sales_agent_id {
        Some(id) => Some(id),
        None if actor.role == Role::Staff => {
            store.agent_by_user(actor.user_id)?.map(|agent| agent.id)
        }
        None => None,
    };
    let agent_rate_pct = match sales_agent_id {
        Some(id) => Some(store.agent(id)?.ok_or(DomainError::NotFound)?.rate_pct),
        None => None,
    };

    let tracking_id = match draft.tracking_id.as_deref().map(str::trim) {
        Some(tracking) if !tracking.is_empty() => tracking.to_string(),
        _ => format!("{}{}", TEMP_TRACKING_PREFIX, now.timestamp_millis()),
    };
    let slip_no = match draft.slip_no.as_deref().map(str::trim) {
        Some(slip) if !slip.is_empty() => slip.to_string(),
        _ => store.next_slip_no()?,
    };

    let order = build_order(
        draft,
        tracking_id,
        slip_no,
        partner_id,
        sales_agent_id,
        agent_rate_pct,
        actor.user_id,
        now,
    )?;
    let order = store.insert_order(order)?;
    tracing::info!(order_id = %order.id, slip_no = %order.slip_no, "order created");
    view_of(store, &order, actor)
}

/// Apply a partial update to an order the actor owns.
///
/// Ownership is re-checked against the stored record before anything is
/// merged; an out-of-scope id is indistinguishable from a missing one.
pub fn update_order(
    store: &impl Store,
    actor: &Actor,
    id: OrderId,
    patch: &OrderPatch,
    now: DateTime<Utc>,
) -> DomainResult<OrderView> {
    if !can_write(actor, WriteOperation::UpdateOrder) {
        return Err(DomainError::Unauthorized);
    }
    let mut order = store.order(id)?.ok_or(DomainError::NotFound)?;
    let scope = OrderScope::for_actor(actor);
    if !scope.allows(order.entered_by, order.partner_id) {
        return Err(DomainError::NotFound);
    }

    let mut patch = patch.clone();
    if actor.role == Role::Partner && patch.partner_id.is_some() {
        // Partner actors can neither relink nor unlink the partner.
        patch.partner_id = Some(Some(actor.partner_id.ok_or(DomainError::Unauthorized)?));
    }
    if let Some(Some(agent_id)) = patch.sales_agent_id {
        store.agent(agent_id)?.ok_or(DomainError::NotFound)?;
    }
    if let Some(Some(partner_id)) = patch.partner_id {
        store.partner(partner_id)?.ok_or(DomainError::NotFound)?;
    }

    apply_patch(
        &mut order,
        &patch,
        |agent_id| store.agent(agent_id).ok().flatten().map(|agent| agent.rate_pct),
        now,
    )?;
    let order = store.save_order(order)?;
    view_of(store, &order, actor)
}

/// Delete an order. Admin tier only.
pub fn delete_order(store: &impl Store, actor: &Actor, id: OrderId) -> DomainResult<()> {
    if !can_write(actor, WriteOperation::DeleteOrder) {
        return Err(DomainError::Unauthorized);
    }
    store.remove_order(id)?;
    tracing::info!(order_id = %id, "order deleted");
    Ok(())
}

/// Order-entry autocomplete: distinct line-item names with their most
/// recently used cost and price, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSuggestion {
    pub name: String,
    pub cost: Cents,
    pub price: Cents,
}

pub fn product_suggestions(
    store: &impl Store,
    actor: &Actor,
) -> DomainResult<Vec<ProductSuggestion>> {
    let scope = OrderScope::for_actor(actor);
    let mut orders: Vec<Order> = store
        .orders()?
        .into_iter()
        .filter(|order| scope.allows(order.entered_by, order.partner_id))
        .collect();
    orders.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    let mut seen: HashSet<String> = HashSet::new();
    let mut suggestions = Vec::new();
    for order in &orders {
        for item in &order.items {
            if seen.insert(item.name.to_lowercase()) {
                suggestions.push(ProductSuggestion {
                    name: item.name.clone(),
                    cost: item.cost,
                    price: item.price,
                });
            }
        }
    }
    Ok(suggestions)
}

fn view_of(store: &impl Store, order: &Order, actor: &Actor) -> DomainResult<OrderView> {
    let agent_name = match order.sales_agent_id {
        Some(id) => store.agent(id)?.map(|agent| agent.name),
        None => None,
    };
    let partner_name = match order.partner_id {
        Some(id) => store.partner(id)?.map(|partner| partner.name),
        None => None,
    };
    let entered_by = store.user(order.entered_by)?.map(|user| user.username);
    let ctx = SearchContext {
        agent_name: agent_name.as_deref(),
        partner_name: partner_name.as_deref(),
        entered_by_username: entered_by.as_deref(),
    };
    Ok(OrderView::project(order, &ctx, &actor.visible_fields))
}

//! Free-text order search.
//!
//! The query is whitespace-tokenized; every token must match at least one
//! searchable field (AND of ORs), case-insensitively. Linked names (agent,
//! partner, creator) are supplied by the caller, which owns the lookups.

use crate::order::Order;

/// Resolved display names for an order's links.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchContext<'a> {
    pub agent_name: Option<&'a str>,
    pub partner_name: Option<&'a str>,
    pub entered_by_username: Option<&'a str>,
}

/// Does the order match every token of `query`?
///
/// An empty or whitespace-only query matches everything.
pub fn matches(order: &Order, ctx: &SearchContext<'_>, query: &str) -> bool {
    query
        .split_whitespace()
        .all(|term| matches_term(order, ctx, &term.to_lowercase()))
}

fn matches_term(order: &Order, ctx: &SearchContext<'_>, term: &str) -> bool {
    let hit = |value: &str| value.to_lowercase().contains(term);
    let hit_opt = |value: &Option<String>| value.as_deref().is_some_and(hit);

    hit(&order.tracking_id)
        || hit(&order.customer_name)
        || hit_opt(&order.phone_number)
        || hit(&order.slip_no)
        || hit_opt(&order.address)
        || hit_opt(&order.pincode)
        || hit(order.status.as_str())
        || order.items.iter().any(|item| hit(&item.name))
        || ctx.agent_name.is_some_and(hit)
        || ctx.partner_name.is_some_and(hit)
        || ctx.entered_by_username.is_some_and(hit)
}

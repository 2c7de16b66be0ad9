//! Dashboard statistics, scoped per actor.

use chrono::{DateTime, Utc};

use shipledger_auth::{Actor, OrderScope, Role};
use shipledger_billing::{DashboardStats, StatsView, dashboard_stats};
use shipledger_core::{DateRange, DomainResult};
use shipledger_orders::Order;
use shipledger_store::Store;

/// Dashboard figures over the orders the actor may see.
///
/// Partner actors get their earnings view (the courier fees owed to
/// them); everyone else gets the business profit view.
pub fn get_stats(
    store: &impl Store,
    actor: &Actor,
    range: Option<DateRange>,
    now: DateTime<Utc>,
) -> DomainResult<DashboardStats> {
    let scope = OrderScope::for_actor(actor);
    let orders: Vec<Order> = store
        .orders()?
        .into_iter()
        .filter(|order| scope.allows(order.entered_by, order.partner_id))
        .collect();
    let view = match actor.role {
        Role::Partner => StatsView::PartnerEarnings,
        _ => StatsView::Business,
    };
    Ok(dashboard_stats(&orders, view, range, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipledger_core::UserId;
    use shipledger_directory::Partner;
    use shipledger_orders::{LineItem, OrderDraft};
    use shipledger_store::InMemoryStore;

    use crate::orders::create_order;

    fn now() -> DateTime<Utc> {
        "2024-04-10T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn partner_sees_earnings_where_admin_sees_profit() {
        let store = InMemoryStore::new();
        let admin = Actor::new(UserId::new(), "admin", Role::Admin);
        let partner = store.insert_partner(Partner::new("DTDC", None).unwrap()).unwrap();
        let partner_actor =
            Actor::new(UserId::new(), "dtdc-desk", Role::Partner).with_partner(partner.id);

        let draft = OrderDraft {
            customer_name: "Asha Nair".to_string(),
            partner_id: Some(partner.id),
            items: vec![LineItem { name: "Parcel".to_string(), cost: 0, price: 10_000 }],
            courier_cost_expense: Some(2_000),
            ..OrderDraft::default()
        };
        create_order(&store, &admin, &draft, now()).unwrap();

        let business = get_stats(&store, &admin, None, now()).unwrap();
        assert_eq!(business.profit_or_earnings, 8_000);
        assert_eq!(business.sales_total, 10_000);

        let earnings = get_stats(&store, &partner_actor, None, now()).unwrap();
        assert_eq!(earnings.profit_or_earnings, 2_000);
        assert_eq!(earnings.order_count, 1);
    }

    #[test]
    fn partner_stats_exclude_other_partners_orders() {
        let store = InMemoryStore::new();
        let admin = Actor::new(UserId::new(), "admin", Role::Admin);
        let mine = store.insert_partner(Partner::new("DTDC", None).unwrap()).unwrap();
        let other =
            store.insert_partner(Partner::new("Speed and Safe", None).unwrap()).unwrap();

        for (partner_id, price) in [(mine.id, 10_000), (other.id, 99_000)] {
            let draft = OrderDraft {
                customer_name: "Customer".to_string(),
                tracking_id: Some(format!("AWB-{price}")),
                partner_id: Some(partner_id),
                items: vec![LineItem { name: "Parcel".to_string(), cost: 0, price }],
                courier_cost_expense: Some(1_000),
                ..OrderDraft::default()
            };
            create_order(&store, &admin, &draft, now()).unwrap();
        }

        let actor = Actor::new(UserId::new(), "dtdc-desk", Role::Partner).with_partner(mine.id);
        let stats = get_stats(&store, &actor, None, now()).unwrap();
        assert_eq!(stats.order_count, 1);
        assert_eq!(stats.profit_or_earnings, 1_000);
    }
}

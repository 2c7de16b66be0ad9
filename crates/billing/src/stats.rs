//! Dashboard and billing-page statistics.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use shipledger_core::{Cents, DateRange, money};
use shipledger_orders::Order;

use crate::aggregate::{effective_profit, sales_contribution};

/// Which money figure the dashboard leads with.
///
/// Partners see their own earnings (the courier fees owed to them);
/// everyone else sees business profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsView {
    Business,
    PartnerEarnings,
}

/// One day of the trailing series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// Short weekday label ("Mon", "Tue", ...).
    pub label: String,
    pub profit_or_earnings: Cents,
    pub expenses: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub order_count: usize,
    pub profit_or_earnings: Cents,
    pub sales_total: Cents,
    pub today_count: usize,
    /// Orders still moving (status neither Delivered nor Returned).
    pub active_count: usize,
    /// Trailing seven calendar days, oldest first.
    pub daily_series: Vec<DailyPoint>,
}

/// Compute dashboard statistics over already-scoped orders.
///
/// `range` further restricts the headline figures when given; the daily
/// series always covers the seven days ending at `now`.
pub fn dashboard_stats(
    orders: &[Order],
    view: StatsView,
    range: Option<DateRange>,
    now: DateTime<Utc>,
) -> DashboardStats {
    let in_range: Vec<&Order> = orders
        .iter()
        .filter(|order| range.is_none_or(|r| r.contains(order.date)))
        .collect();

    let profit_or_earnings = in_range.iter().map(|o| headline(o, view)).sum();
    let sales_total = in_range.iter().map(|o| sales_contribution(o)).sum();

    let today = now.date_naive();
    let today_count = in_range
        .iter()
        .filter(|o| o.date.date_naive() == today)
        .count();
    let active_count = in_range.iter().filter(|o| o.status.is_active()).count();

    let daily_series = (0..7)
        .rev()
        .map(|back| {
            let day = today - Days::new(back);
            daily_point(&in_range, view, day)
        })
        .collect();

    DashboardStats {
        order_count: in_range.len(),
        profit_or_earnings,
        sales_total,
        today_count,
        active_count,
        daily_series,
    }
}

fn headline(order: &Order, view: StatsView) -> Cents {
    match view {
        StatsView::Business => effective_profit(order),
        StatsView::PartnerEarnings => order.courier_cost_expense,
    }
}

fn daily_point(orders: &[&Order], view: StatsView, day: NaiveDate) -> DailyPoint {
    let of_day: Vec<&&Order> = orders
        .iter()
        .filter(|o| o.date.date_naive() == day)
        .collect();
    let profit_or_earnings = of_day.iter().map(|o| headline(o, view)).sum();
    let expenses = match view {
        // Partners are not shown the business expense breakdown.
        StatsView::PartnerEarnings => 0,
        StatsView::Business => of_day
            .iter()
            .map(|o| o.courier_cost_expense + o.packing_cost_expense + o.commission_amount)
            .sum(),
    };
    DailyPoint {
        label: day.format("%a").to_string(),
        profit_or_earnings,
        expenses,
    }
}

/// Cross-cutting billing summary for admin dashboards: the four standing
/// share figures over a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingSummary {
    pub owner_share: Cents,
    pub operating_share: Cents,
    pub partner_fee_total: Cents,
    pub commission_total: Cents,
    pub order_count: usize,
}

pub fn billing_summary(orders: &[Order], range: Option<DateRange>) -> BillingSummary {
    let in_range: Vec<&Order> = orders
        .iter()
        .filter(|order| range.is_none_or(|r| r.contains(order.date)))
        .collect();

    let profit: Cents = in_range.iter().map(|o| effective_profit(o)).sum();
    let commission_total: Cents = in_range.iter().map(|o| o.commission_amount).sum();
    let partner_fee_total: Cents = in_range.iter().map(|o| o.courier_cost_expense).sum();
    let half = money::apply_pct(profit, 50.0);

    BillingSummary {
        owner_share: half,
        operating_share: half - commission_total,
        partner_fee_total,
        commission_total,
        order_count: in_range.len(),
    }
}

/// Personal billing figures for a partner or staff login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalSummary {
    pub monthly_orders: usize,
    pub monthly_earnings: Cents,
    /// Lifetime earnings minus everything already paid out via invoices.
    pub total_due: Cents,
    /// Month name for display ("April").
    pub month: String,
}

/// Earnings view for a subject's own billing page. `earn` maps one order
/// to what the subject is owed for it (courier cost for partners,
/// commission for agents); `paid_invoice_total` is the sum of that
/// subject's Paid invoice amounts.
pub fn personal_summary(
    orders: &[Order],
    earn: impl Fn(&Order) -> Cents,
    paid_invoice_total: Cents,
    now: DateTime<Utc>,
) -> PersonalSummary {
    let month_start =
        NaiveDate::from_ymd_opt(now.year(), now.month(), 1).unwrap_or(now.date_naive());
    let this_month = |order: &&Order| {
        let d = order.date.date_naive();
        d.year() == month_start.year() && d.month() == month_start.month()
    };

    let monthly: Vec<&Order> = orders.iter().filter(this_month).collect();
    let monthly_earnings = monthly.iter().map(|o| earn(o)).sum();
    let lifetime_earnings: Cents = orders.iter().map(&earn).sum();

    PersonalSummary {
        monthly_orders: monthly.len(),
        monthly_earnings,
        total_due: lifetime_earnings - paid_invoice_total,
        month: month_start.format("%B").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipledger_core::UserId;
    use shipledger_orders::{LineItem, OrderDraft, OrderStatus, build_order};

    fn order_on(date: &str, price: Cents, courier_cost: Cents, status: OrderStatus) -> Order {
        let draft = OrderDraft {
            customer_name: "Customer".to_string(),
            date: Some(date.parse().unwrap()),
            items: vec![LineItem { name: "Parcel".to_string(), cost: 0, price }],
            courier_cost_expense: Some(courier_cost),
            ..OrderDraft::default()
        };
        let mut order = build_order(
            &draft,
            "AWB".to_string(),
            "1001".to_string(),
            None,
            None,
            None,
            UserId::new(),
            date.parse().unwrap(),
        )
        .unwrap();
        order.status = status;
        order
    }

    fn now() -> DateTime<Utc> {
        "2024-04-10T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn business_view_counts_profit_and_sales() {
        let orders = vec![
            order_on("2024-04-10T08:00:00Z", 10_000, 2_000, OrderStatus::Pending),
            order_on("2024-04-09T08:00:00Z", 5_000, 1_000, OrderStatus::Delivered),
        ];
        let stats = dashboard_stats(&orders, StatsView::Business, None, now());
        assert_eq!(stats.order_count, 2);
        assert_eq!(stats.profit_or_earnings, 8_000 + 4_000);
        assert_eq!(stats.sales_total, 15_000);
        assert_eq!(stats.today_count, 1);
        assert_eq!(stats.active_count, 1);
        assert_eq!(stats.daily_series.len(), 7);
    }

    #[test]
    fn returned_orders_are_loss_in_business_view() {
        let orders =
            vec![order_on("2024-04-10T08:00:00Z", 10_000, 8_000, OrderStatus::Returned)];
        let stats = dashboard_stats(&orders, StatsView::Business, None, now());
        assert_eq!(stats.profit_or_earnings, -8_000);
        assert_eq!(stats.sales_total, 0);
        assert_eq!(stats.active_count, 0);
    }

    #[test]
    fn partner_view_shows_fees_including_returned() {
        let orders = vec![
            order_on("2024-04-10T08:00:00Z", 10_000, 8_000, OrderStatus::Returned),
            order_on("2024-04-09T08:00:00Z", 10_000, 1_500, OrderStatus::Shipped),
        ];
        let stats = dashboard_stats(&orders, StatsView::PartnerEarnings, None, now());
        assert_eq!(stats.profit_or_earnings, 9_500);
        // expenses are hidden from partners
        assert!(stats.daily_series.iter().all(|p| p.expenses == 0));
    }

    #[test]
    fn daily_series_covers_trailing_week_oldest_first() {
        let orders =
            vec![order_on("2024-04-04T08:00:00Z", 10_000, 0, OrderStatus::Pending)];
        let stats = dashboard_stats(&orders, StatsView::Business, None, now());
        // 2024-04-04 is the oldest day of the window ending 2024-04-10
        assert_eq!(stats.daily_series[0].label, "Thu");
        assert_eq!(stats.daily_series[0].profit_or_earnings, 10_000);
        assert_eq!(stats.daily_series[6].label, "Wed");
    }

    #[test]
    fn billing_summary_reports_four_shares() {
        let orders = vec![
            order_on("2024-04-10T08:00:00Z", 10_000, 2_000, OrderStatus::Delivered),
        ];
        let summary = billing_summary(&orders, None);
        assert_eq!(summary.owner_share, 4_000);
        assert_eq!(summary.operating_share, 4_000);
        assert_eq!(summary.partner_fee_total, 2_000);
        assert_eq!(summary.commission_total, 0);
        assert_eq!(summary.order_count, 1);
    }

    #[test]
    fn personal_summary_splits_month_and_lifetime() {
        let orders = vec![
            order_on("2024-04-05T08:00:00Z", 10_000, 1_000, OrderStatus::Delivered),
            order_on("2024-03-20T08:00:00Z", 10_000, 2_000, OrderStatus::Delivered),
        ];
        let summary =
            personal_summary(&orders, |o| o.courier_cost_expense, 500, now());
        assert_eq!(summary.monthly_orders, 1);
        assert_eq!(summary.monthly_earnings, 1_000);
        assert_eq!(summary.total_due, 3_000 - 500);
        assert_eq!(summary.month, "April");
    }
}

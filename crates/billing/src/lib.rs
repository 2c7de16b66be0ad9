//! Billing aggregation domain module.
//!
//! Turns scoped order sets into per-subject invoiced amounts and
//! dashboard statistics. Deterministic domain logic only; the caller
//! supplies the orders (one snapshot read) and, where relevant, the clock.

pub mod aggregate;
pub mod stats;
pub mod subject;

pub use aggregate::{BillingStatement, compute_amount, effective_profit, sales_contribution};
pub use stats::{
    BillingSummary, DailyPoint, DashboardStats, PersonalSummary, StatsView, billing_summary,
    dashboard_stats, personal_summary,
};
pub use subject::{BillingSubject, InternalRecipient};

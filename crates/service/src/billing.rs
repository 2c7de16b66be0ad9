//! Billing previews, summaries and history.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use shipledger_auth::Actor;
use shipledger_billing::{BillingStatement, BillingSubject, BillingSummary, PersonalSummary};
use shipledger_core::{Cents, DateRange, DomainError, DomainResult};
use shipledger_invoicing::{Invoice, InvoiceStatus, subject_of_actor, suggested_next_start};
use shipledger_orders::Order;
use shipledger_store::Store;

/// Admin tier may view any subject; a partner or staff login only its
/// own.
fn authorize_subject_view(actor: &Actor, subject: BillingSubject) -> DomainResult<()> {
    let allowed = match subject {
        BillingSubject::Internal(_) => actor.role.is_admin_tier(),
        BillingSubject::Partner(partner_id) => {
            actor.role.is_admin_tier() || actor.partner_id == Some(partner_id)
        }
        BillingSubject::Agent(agent_id) => {
            actor.role.is_admin_tier() || actor.agent_id == Some(agent_id)
        }
    };
    if allowed { Ok(()) } else { Err(DomainError::Unauthorized) }
}

/// Preview the amount a subject would be invoiced for over a range.
pub fn billing_amount(
    store: &impl Store,
    actor: &Actor,
    subject: BillingSubject,
    range: DateRange,
) -> DomainResult<BillingStatement> {
    authorize_subject_view(actor, subject)?;
    let orders = store.orders()?;
    Ok(shipledger_billing::compute_amount(subject, range, &orders))
}

/// The four standing share figures over a range. Admin tier only.
pub fn billing_summary(
    store: &impl Store,
    actor: &Actor,
    range: Option<DateRange>,
) -> DomainResult<BillingSummary> {
    if !actor.role.is_admin_tier() {
        return Err(DomainError::Unauthorized);
    }
    let orders = store.orders()?;
    Ok(shipledger_billing::billing_summary(&orders, range))
}

/// The actor's own billing-page figures: current-month orders and
/// earnings, plus lifetime due net of already-paid invoices. Logins with
/// no billing subject (admins, unlinked staff) get zeros.
pub fn personal_summary(
    store: &impl Store,
    actor: &Actor,
    now: DateTime<Utc>,
) -> DomainResult<PersonalSummary> {
    let subject = match subject_of_actor(actor) {
        Some(subject) if !actor.role.is_admin_tier() => subject,
        _ => {
            return Ok(PersonalSummary {
                monthly_orders: 0,
                monthly_earnings: 0,
                total_due: 0,
                month: now.format("%B").to_string(),
            });
        }
    };

    let orders: Vec<Order> = store
        .orders()?
        .into_iter()
        .filter(|order| order_belongs_to(order, subject))
        .collect();
    let paid_invoice_total: Cents = store
        .invoices()?
        .iter()
        .filter(|invoice| invoice.subject == subject && invoice.status == InvoiceStatus::Paid)
        .map(|invoice| invoice.amount)
        .sum();

    Ok(shipledger_billing::personal_summary(
        &orders,
        earnings_of(subject),
        paid_invoice_total,
        now,
    ))
}

/// A subject's invoices (newest period first) plus the advisory next
/// billing period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillingHistory {
    pub invoices: Vec<Invoice>,
    pub suggested_start: NaiveDate,
    pub suggested_end: NaiveDate,
}

pub fn billing_history(
    store: &impl Store,
    actor: &Actor,
    subject: BillingSubject,
    now: DateTime<Utc>,
) -> DomainResult<BillingHistory> {
    authorize_subject_view(actor, subject)?;

    let mut invoices: Vec<Invoice> = store
        .invoices()?
        .into_iter()
        .filter(|invoice| invoice.subject == subject)
        .collect();
    invoices.sort_by(|a, b| {
        let end = |invoice: &Invoice| invoice.period.map(|period| period.end);
        end(b).cmp(&end(a)).then(b.created_at.cmp(&a.created_at))
    });

    let earliest_order = store
        .orders()?
        .iter()
        .filter(|order| order_belongs_to(order, subject))
        .map(|order| order.date.date_naive())
        .min();

    let suggested_start = suggested_next_start(&invoices, earliest_order);
    Ok(BillingHistory { invoices, suggested_start, suggested_end: now.date_naive() })
}

fn order_belongs_to(order: &Order, subject: BillingSubject) -> bool {
    match subject {
        BillingSubject::Internal(_) => true,
        BillingSubject::Partner(partner_id) => order.partner_id == Some(partner_id),
        BillingSubject::Agent(agent_id) => order.sales_agent_id == Some(agent_id),
    }
}

fn earnings_of(subject: BillingSubject) -> impl Fn(&Order) -> Cents {
    move |order| match subject {
        // What the partner charged us to carry the parcels.
        BillingSubject::Partner(_) => order.courier_cost_expense,
        BillingSubject::Agent(_) => order.commission_amount,
        BillingSubject::Internal(_) => 0,
    }
}

//! Lifecycle policy around invoices.
//!
//! Which transitions are legal, which actor counts as an invoice's own
//! subject, and the advisory suggestion for the next billing period start.

use chrono::NaiveDate;

use shipledger_auth::Actor;
use shipledger_billing::BillingSubject;
use shipledger_core::{DomainError, DomainResult};

use crate::invoice::{Invoice, InvoiceStatus};

/// A resolution moves a Pending invoice into a terminal state; Pending is
/// never a target.
pub fn ensure_resolution_target(new_status: InvoiceStatus) -> DomainResult<()> {
    if !new_status.is_terminal() {
        return Err(DomainError::validation(
            "an invoice can only be resolved to Paid or Rejected",
        ));
    }
    Ok(())
}

/// The billing subject an actor files and pays invoices as, resolved from
/// its linked entity profile. Partner links win over agent links; actors
/// with neither have no subject.
pub fn subject_of_actor(actor: &Actor) -> Option<BillingSubject> {
    if let Some(partner_id) = actor.partner_id {
        return Some(BillingSubject::Partner(partner_id));
    }
    actor.agent_id.map(BillingSubject::Agent)
}

/// Whether the actor is the invoice's own subject (the self-service pay
/// path). Internal-recipient invoices belong to no login.
pub fn owns_invoice(actor: &Actor, invoice: &Invoice) -> bool {
    match invoice.subject {
        BillingSubject::Internal(_) => false,
        BillingSubject::Partner(partner_id) => actor.partner_id == Some(partner_id),
        BillingSubject::Agent(agent_id) => actor.agent_id == Some(agent_id),
    }
}

/// Advisory start date for a subject's next invoice: the day after the
/// most recent invoice period's end (any status), else the subject's
/// earliest order date, else the epoch. Overlaps are not rejected; this is
/// a suggestion surfaced to the operator, not an enforced constraint.
pub fn suggested_next_start(
    invoices: &[Invoice],
    earliest_order: Option<NaiveDate>,
) -> NaiveDate {
    let last_end = invoices
        .iter()
        .filter_map(|invoice| invoice.period.map(|period| period.end))
        .max();
    match last_end {
        Some(end) => end.succ_opt().unwrap_or(end),
        None => earliest_order.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use shipledger_auth::Role;
    use shipledger_billing::InternalRecipient;
    use shipledger_core::{AgentId, DateRange, PartnerId, UserId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> DateTime<Utc> {
        "2024-05-01T09:00:00Z".parse().unwrap()
    }

    fn invoice_for(subject: BillingSubject, period: Option<DateRange>) -> Invoice {
        Invoice::pending(subject, 10_000, period, Some("2024-04".to_string()), now()).unwrap()
    }

    #[test]
    fn pending_is_not_a_resolution_target() {
        assert!(ensure_resolution_target(InvoiceStatus::Pending).is_err());
        assert!(ensure_resolution_target(InvoiceStatus::Paid).is_ok());
        assert!(ensure_resolution_target(InvoiceStatus::Rejected).is_ok());
    }

    #[test]
    fn actor_subject_prefers_partner_link() {
        let partner_id = PartnerId::new();
        let agent_id = AgentId::new();
        let actor = Actor::new(UserId::new(), "someone", Role::Partner)
            .with_partner(partner_id)
            .with_agent(agent_id);
        assert_eq!(subject_of_actor(&actor), Some(BillingSubject::Partner(partner_id)));

        let staff = Actor::new(UserId::new(), "desk", Role::Staff).with_agent(agent_id);
        assert_eq!(subject_of_actor(&staff), Some(BillingSubject::Agent(agent_id)));

        let unlinked = Actor::new(UserId::new(), "nobody", Role::Staff);
        assert_eq!(subject_of_actor(&unlinked), None);
    }

    #[test]
    fn ownership_matches_linked_entity_only() {
        let mine = PartnerId::new();
        let invoice = invoice_for(BillingSubject::Partner(mine), None);
        let owner = Actor::new(UserId::new(), "mine", Role::Partner).with_partner(mine);
        let other =
            Actor::new(UserId::new(), "other", Role::Partner).with_partner(PartnerId::new());
        assert!(owns_invoice(&owner, &invoice));
        assert!(!owns_invoice(&other, &invoice));
    }

    #[test]
    fn internal_invoices_belong_to_no_login() {
        let invoice =
            invoice_for(BillingSubject::Internal(InternalRecipient::OwnerShare), None);
        let admin = Actor::new(UserId::new(), "root", Role::SuperAdmin);
        assert!(!owns_invoice(&admin, &invoice));
    }

    #[test]
    fn next_start_is_day_after_latest_period() {
        let subject = BillingSubject::Partner(PartnerId::new());
        let invoices = vec![
            invoice_for(
                subject,
                Some(DateRange::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap()),
            ),
            invoice_for(
                subject,
                Some(DateRange::new(date(2024, 4, 1), date(2024, 4, 30)).unwrap()),
            ),
        ];
        assert_eq!(suggested_next_start(&invoices, None), date(2024, 5, 1));
    }

    #[test]
    fn next_start_falls_back_to_earliest_order_then_epoch() {
        let subject = BillingSubject::Partner(PartnerId::new());
        // Month-only invoices carry no period and do not anchor the
        // suggestion.
        let invoices = vec![invoice_for(subject, None)];
        assert_eq!(
            suggested_next_start(&invoices, Some(date(2024, 2, 14))),
            date(2024, 2, 14)
        );
        assert_eq!(suggested_next_start(&[], None), date(1970, 1, 1));
    }
}

//! Invoice generation and lifecycle operations.

use chrono::{DateTime, Utc};

use shipledger_auth::{Actor, Role, WriteOperation, can_write};
use shipledger_billing::{BillingSubject, InternalRecipient};
use shipledger_core::{Cents, DateRange, DomainError, DomainResult, InvoiceId};
use shipledger_invoicing::{
    Invoice, InvoiceStatus, PaymentMode, ensure_resolution_target, owns_invoice,
    subject_of_actor,
};
use shipledger_store::Store;

/// Generate a Pending invoice for an internal business-share recipient.
pub fn generate_internal(
    store: &impl Store,
    actor: &Actor,
    recipient: InternalRecipient,
    range: DateRange,
    amount: Cents,
    now: DateTime<Utc>,
) -> DomainResult<Invoice> {
    if !can_write(actor, WriteOperation::GenerateInternalInvoice) {
        return Err(DomainError::Unauthorized);
    }
    let invoice =
        Invoice::pending(BillingSubject::Internal(recipient), amount, Some(range), None, now)?;
    let invoice = store.insert_invoice(invoice)?;
    tracing::info!(invoice_id = %invoice.id, recipient = %recipient, "internal invoice generated");
    Ok(invoice)
}

/// Generate a Pending invoice for a partner or sales agent, by an
/// admin-tier actor or by the subject itself.
pub fn generate_for_entity(
    store: &impl Store,
    actor: &Actor,
    subject: BillingSubject,
    range: DateRange,
    amount: Cents,
    now: DateTime<Utc>,
) -> DomainResult<Invoice> {
    match subject {
        BillingSubject::Internal(_) => {
            return Err(DomainError::validation(
                "internal recipients are billed via the internal generation path",
            ));
        }
        BillingSubject::Partner(partner_id) => {
            store.partner(partner_id)?.ok_or(DomainError::NotFound)?;
        }
        BillingSubject::Agent(agent_id) => {
            store.agent(agent_id)?.ok_or(DomainError::NotFound)?;
        }
    }
    let own_subject = subject_of_actor(actor) == Some(subject);
    if !actor.role.is_admin_tier() && !own_subject {
        return Err(DomainError::Unauthorized);
    }
    let invoice = Invoice::pending(subject, amount, Some(range), None, now)?;
    store.insert_invoice(invoice)
}

/// Self-service monthly filing: a staff or partner actor bills its own
/// accrued amount. Admin approval is still required for the invoice to
/// reach Paid, except via [`accept_and_pay`].
pub fn self_file(
    store: &impl Store,
    actor: &Actor,
    amount: Cents,
    month: &str,
    now: DateTime<Utc>,
) -> DomainResult<Invoice> {
    if !matches!(actor.role, Role::Staff | Role::Partner) {
        return Err(DomainError::Unauthorized);
    }
    let subject = subject_of_actor(actor).ok_or_else(|| {
        DomainError::validation("no linked billing profile to file an invoice for")
    })?;
    let invoice = Invoice::pending(subject, amount, None, Some(month.to_string()), now)?;
    store.insert_invoice(invoice)
}

/// The "accept and pay" flow: the invoice's own subject settles its own
/// Pending invoice directly to Paid, recording how it was settled. The
/// one lifecycle path a non-admin actor completes.
pub fn accept_and_pay(
    store: &impl Store,
    actor: &Actor,
    invoice_id: InvoiceId,
    payment_mode: PaymentMode,
) -> DomainResult<Invoice> {
    let invoice = store.invoice(invoice_id)?.ok_or(DomainError::NotFound)?;
    if !owns_invoice(actor, &invoice) {
        return Err(DomainError::Unauthorized);
    }
    let invoice = store.resolve_invoice(invoice_id, InvoiceStatus::Paid, Some(payment_mode))?;
    tracing::info!(invoice_id = %invoice.id, mode = %payment_mode, "invoice self-paid");
    Ok(invoice)
}

/// Admin-tier resolution of a Pending invoice to Paid or Rejected. The
/// store's compare-and-set rejects the losing side of a race.
pub fn set_invoice_status(
    store: &impl Store,
    actor: &Actor,
    invoice_id: InvoiceId,
    new_status: InvoiceStatus,
) -> DomainResult<Invoice> {
    if !can_write(actor, WriteOperation::ResolveInvoice) {
        return Err(DomainError::Unauthorized);
    }
    ensure_resolution_target(new_status)?;
    store.resolve_invoice(invoice_id, new_status, None)
}

/// Invoices the actor may see: all of them for admin tier, otherwise
/// only those whose subject is the actor's own. Newest first.
pub fn list_invoices(store: &impl Store, actor: &Actor) -> DomainResult<Vec<Invoice>> {
    let mut invoices = store.invoices()?;
    if !actor.role.is_admin_tier() {
        invoices.retain(|invoice| owns_invoice(actor, invoice));
    }
    invoices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(invoices)
}

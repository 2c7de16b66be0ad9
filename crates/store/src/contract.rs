//! The storage contract.

use shipledger_core::{AgentId, DomainResult, InvoiceId, OrderId, PartnerId, UserId};
use shipledger_directory::{Partner, SalesAgent, UserAccount};
use shipledger_invoicing::{Invoice, InvoiceStatus, PaymentMode};
use shipledger_orders::Order;

/// What the persistence backend must provide.
///
/// Reads return owned snapshots: an aggregation sees one consistent view
/// of the data it was handed, regardless of later writes. Lookups return
/// `Ok(None)` for missing records; it is the caller's job to turn that
/// into `NotFound` (and to keep out-of-scope ids indistinguishable from
/// missing ones).
pub trait Store {
    // Orders

    /// Insert a new order. Fails with a conflict when the tracking id is
    /// already taken.
    fn insert_order(&self, order: Order) -> DomainResult<Order>;

    /// Replace a stored order. Fails with `NotFound` when the id is
    /// unknown and with a conflict when the tracking id collides with a
    /// different order.
    fn save_order(&self, order: Order) -> DomainResult<Order>;

    fn remove_order(&self, id: OrderId) -> DomainResult<()>;

    fn order(&self, id: OrderId) -> DomainResult<Option<Order>>;

    /// Snapshot of every order.
    fn orders(&self) -> DomainResult<Vec<Order>>;

    /// Next slip number from the monotonic sequence. Concurrent creates
    /// each draw a distinct value; the sequence is seeded above any slip
    /// number already stored.
    fn next_slip_no(&self) -> DomainResult<String>;

    // Partners

    /// Insert a new partner. Fails with a conflict when the name is taken.
    fn insert_partner(&self, partner: Partner) -> DomainResult<Partner>;

    fn save_partner(&self, partner: Partner) -> DomainResult<Partner>;

    fn remove_partner(&self, id: PartnerId) -> DomainResult<()>;

    fn partner(&self, id: PartnerId) -> DomainResult<Option<Partner>>;

    fn partner_by_user(&self, user_id: UserId) -> DomainResult<Option<Partner>>;

    fn partners(&self) -> DomainResult<Vec<Partner>>;

    // Sales agents

    fn insert_agent(&self, agent: SalesAgent) -> DomainResult<SalesAgent>;

    fn agent(&self, id: AgentId) -> DomainResult<Option<SalesAgent>>;

    fn agent_by_user(&self, user_id: UserId) -> DomainResult<Option<SalesAgent>>;

    fn agents(&self) -> DomainResult<Vec<SalesAgent>>;

    // User accounts

    /// Insert a new account. Fails with a conflict when the username is
    /// taken.
    fn insert_user(&self, user: UserAccount) -> DomainResult<UserAccount>;

    fn save_user(&self, user: UserAccount) -> DomainResult<UserAccount>;

    fn remove_user(&self, id: UserId) -> DomainResult<()>;

    fn user(&self, id: UserId) -> DomainResult<Option<UserAccount>>;

    fn users(&self) -> DomainResult<Vec<UserAccount>>;

    // Invoices

    fn insert_invoice(&self, invoice: Invoice) -> DomainResult<Invoice>;

    fn invoice(&self, id: InvoiceId) -> DomainResult<Option<Invoice>>;

    fn invoices(&self) -> DomainResult<Vec<Invoice>>;

    /// Atomically resolve a Pending invoice to a terminal status.
    ///
    /// The compare-and-set re-verifies the invoice is still Pending under
    /// the write lock; a lost race surfaces as a conflict, so concurrent
    /// pay/reject attempts can never both succeed.
    fn resolve_invoice(
        &self,
        id: InvoiceId,
        new_status: InvoiceStatus,
        payment_mode: Option<PaymentMode>,
    ) -> DomainResult<Invoice>;
}

//! In-memory store.
//!
//! Intended for tests/dev. One `RwLock` over the whole state keeps every
//! read a consistent snapshot and makes the invoice compare-and-set
//! trivially atomic. Not optimized for performance.

use std::collections::HashMap;
use std::sync::RwLock;

use shipledger_core::{
    AgentId, DomainError, DomainResult, InvoiceId, OrderId, PartnerId, UserId,
};
use shipledger_directory::{Partner, SalesAgent, UserAccount};
use shipledger_invoicing::{Invoice, InvoiceStatus, PaymentMode};
use shipledger_orders::Order;

use crate::contract::Store;

#[derive(Debug, Default)]
struct State {
    orders: HashMap<OrderId, Order>,
    partners: HashMap<PartnerId, Partner>,
    agents: HashMap<AgentId, SalesAgent>,
    users: HashMap<UserId, UserAccount>,
    invoices: HashMap<InvoiceId, Invoice>,
    slip_seq: u64,
}

/// In-memory reference implementation of [`Store`].
#[derive(Debug)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

/// First generated slip number is `SLIP_SEQ_FLOOR + 1`.
const SLIP_SEQ_FLOOR: u64 = 1000;

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State { slip_seq: SLIP_SEQ_FLOOR, ..State::default() }),
        }
    }

    fn read(&self) -> DomainResult<std::sync::RwLockReadGuard<'_, State>> {
        self.state.read().map_err(|_| DomainError::internal("store lock poisoned"))
    }

    fn write(&self) -> DomainResult<std::sync::RwLockWriteGuard<'_, State>> {
        self.state.write().map_err(|_| DomainError::internal("store lock poisoned"))
    }

    /// Keep the slip sequence above any slip number written past it, so a
    /// client-supplied slip never collides with a later generated one.
    fn seed_slip_seq(state: &mut State, slip_no: &str) {
        if let Ok(value) = slip_no.trim().parse::<u64>() {
            if value > state.slip_seq {
                state.slip_seq = value;
            }
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for InMemoryStore {
    fn insert_order(&self, order: Order) -> DomainResult<Order> {
        let mut state = self.write()?;
        let taken = state
            .orders
            .values()
            .any(|existing| existing.tracking_id == order.tracking_id);
        if taken {
            return Err(DomainError::conflict(format!(
                "tracking id '{}' already exists",
                order.tracking_id
            )));
        }
        Self::seed_slip_seq(&mut state, &order.slip_no);
        state.orders.insert(order.id, order.clone());
        Ok(order)
    }

    fn save_order(&self, order: Order) -> DomainResult<Order> {
        let mut state = self.write()?;
        if !state.orders.contains_key(&order.id) {
            return Err(DomainError::not_found());
        }
        let taken = state
            .orders
            .values()
            .any(|existing| existing.id != order.id && existing.tracking_id == order.tracking_id);
        if taken {
            return Err(DomainError::conflict(format!(
                "tracking id '{}' already exists",
                order.tracking_id
            )));
        }
        Self::seed_slip_seq(&mut state, &order.slip_no);
        state.orders.insert(order.id, order.clone());
        Ok(order)
    }

    fn remove_order(&self, id: OrderId) -> DomainResult<()> {
        let mut state = self.write()?;
        state.orders.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    fn order(&self, id: OrderId) -> DomainResult<Option<Order>> {
        Ok(self.read()?.orders.get(&id).cloned())
    }

    fn orders(&self) -> DomainResult<Vec<Order>> {
        Ok(self.read()?.orders.values().cloned().collect())
    }

    fn next_slip_no(&self) -> DomainResult<String> {
        let mut state = self.write()?;
        state.slip_seq += 1;
        Ok(state.slip_seq.to_string())
    }

    fn insert_partner(&self, partner: Partner) -> DomainResult<Partner> {
        let mut state = self.write()?;
        let taken = state.partners.values().any(|existing| existing.name == partner.name);
        if taken {
            return Err(DomainError::conflict(format!(
                "partner '{}' already exists",
                partner.name
            )));
        }
        state.partners.insert(partner.id, partner.clone());
        Ok(partner)
    }

    fn save_partner(&self, partner: Partner) -> DomainResult<Partner> {
        let mut state = self.write()?;
        if !state.partners.contains_key(&partner.id) {
            return Err(DomainError::not_found());
        }
        let taken = state
            .partners
            .values()
            .any(|existing| existing.id != partner.id && existing.name == partner.name);
        if taken {
            return Err(DomainError::conflict(format!(
                "partner '{}' already exists",
                partner.name
            )));
        }
        state.partners.insert(partner.id, partner.clone());
        Ok(partner)
    }

    fn remove_partner(&self, id: PartnerId) -> DomainResult<()> {
        let mut state = self.write()?;
        state.partners.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    fn partner(&self, id: PartnerId) -> DomainResult<Option<Partner>> {
        Ok(self.read()?.partners.get(&id).cloned())
    }

    fn partner_by_user(&self, user_id: UserId) -> DomainResult<Option<Partner>> {
        Ok(self
            .read()?
            .partners
            .values()
            .find(|partner| partner.user_id == Some(user_id))
            .cloned())
    }

    fn partners(&self) -> DomainResult<Vec<Partner>> {
        Ok(self.read()?.partners.values().cloned().collect())
    }

    fn insert_agent(&self, agent: SalesAgent) -> DomainResult<SalesAgent> {
        let mut state = self.write()?;
        state.agents.insert(agent.id, agent.clone());
        Ok(agent)
    }

    fn agent(&self, id: AgentId) -> DomainResult<Option<SalesAgent>> {
        Ok(self.read()?.agents.get(&id).cloned())
    }

    fn agent_by_user(&self, user_id: UserId) -> DomainResult<Option<SalesAgent>> {
        Ok(self
            .read()?
            .agents
            .values()
            .find(|agent| agent.user_id == Some(user_id))
            .cloned())
    }

    fn agents(&self) -> DomainResult<Vec<SalesAgent>> {
        Ok(self.read()?.agents.values().cloned().collect())
    }

    fn insert_user(&self, user: UserAccount) -> DomainResult<UserAccount> {
        let mut state = self.write()?;
        let taken = state.users.values().any(|existing| existing.username == user.username);
        if taken {
            return Err(DomainError::conflict(format!(
                "username '{}' already exists",
                user.username
            )));
        }
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn save_user(&self, user: UserAccount) -> DomainResult<UserAccount> {
        let mut state = self.write()?;
        if !state.users.contains_key(&user.id) {
            return Err(DomainError::not_found());
        }
        let taken = state
            .users
            .values()
            .any(|existing| existing.id != user.id && existing.username == user.username);
        if taken {
            return Err(DomainError::conflict(format!(
                "username '{}' already exists",
                user.username
            )));
        }
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn remove_user(&self, id: UserId) -> DomainResult<()> {
        let mut state = self.write()?;
        state.users.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    fn user(&self, id: UserId) -> DomainResult<Option<UserAccount>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    fn users(&self) -> DomainResult<Vec<UserAccount>> {
        Ok(self.read()?.users.values().cloned().collect())
    }

    fn insert_invoice(&self, invoice: Invoice) -> DomainResult<Invoice> {
        let mut state = self.write()?;
        state.invoices.insert(invoice.id, invoice.clone());
        Ok(invoice)
    }

    fn invoice(&self, id: InvoiceId) -> DomainResult<Option<Invoice>> {
        Ok(self.read()?.invoices.get(&id).cloned())
    }

    fn invoices(&self) -> DomainResult<Vec<Invoice>> {
        Ok(self.read()?.invoices.values().cloned().collect())
    }

    fn resolve_invoice(
        &self,
        id: InvoiceId,
        new_status: InvoiceStatus,
        payment_mode: Option<PaymentMode>,
    ) -> DomainResult<Invoice> {
        let mut state = self.write()?;
        let invoice = state.invoices.get_mut(&id).ok_or(DomainError::NotFound)?;
        // Re-verify under the write lock: the invoice must still be
        // Pending, so a concurrent resolution loses with a conflict.
        if invoice.status != InvoiceStatus::Pending {
            return Err(DomainError::conflict(format!(
                "invoice is already {}",
                invoice.status
            )));
        }
        invoice.status = new_status;
        if payment_mode.is_some() {
            invoice.payment_mode = payment_mode;
        }
        Ok(invoice.clone())
    }
}

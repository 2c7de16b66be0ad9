//! Order visibility scope and write-permission checks.
//!
//! Pure policy: no IO, no storage. The scope is resolved once per request
//! from the actor and consulted both when listing (filter) and before any
//! single-record mutation (ownership re-check), so an actor cannot reach an
//! order outside its scope by guessing its id.

use shipledger_core::{PartnerId, UserId};

use crate::{Actor, Role};

/// Which orders an actor may see (and, scope permitting, write).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    /// Unrestricted (admin tier and read-only viewers).
    All,
    /// Only orders the actor personally entered (staff).
    EnteredBy(UserId),
    /// Only orders linked to the actor's own partner profile.
    PartnerOrders(PartnerId),
    /// Nothing. A partner or staff login with no linked entity profile
    /// fails safe rather than erroring.
    Nothing,
}

impl OrderScope {
    pub fn for_actor(actor: &Actor) -> Self {
        match actor.role {
            Role::SuperAdmin | Role::Admin | Role::Viewer => OrderScope::All,
            Role::Staff => OrderScope::EnteredBy(actor.user_id),
            Role::Partner => match actor.partner_id {
                Some(partner_id) => OrderScope::PartnerOrders(partner_id),
                None => OrderScope::Nothing,
            },
        }
    }

    /// Whether an order with the given ownership fields falls inside this
    /// scope.
    pub fn allows(&self, entered_by: UserId, partner_id: Option<PartnerId>) -> bool {
        match self {
            OrderScope::All => true,
            OrderScope::EnteredBy(user_id) => entered_by == *user_id,
            OrderScope::PartnerOrders(own) => partner_id == Some(*own),
            OrderScope::Nothing => false,
        }
    }
}

/// Mutating operations gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOperation {
    CreateOrder,
    UpdateOrder,
    DeleteOrder,
    ManagePartners,
    ManageAgents,
    ManageUsers,
    /// Generating an invoice for an internal business-share recipient.
    GenerateInternalInvoice,
    /// Resolving a pending invoice to Paid or Rejected.
    ResolveInvoice,
}

/// Role-level write gate. Ownership (scope) is checked separately against
/// the target record.
pub fn can_write(actor: &Actor, operation: WriteOperation) -> bool {
    if actor.role.is_read_only() {
        return false;
    }
    match operation {
        WriteOperation::CreateOrder | WriteOperation::UpdateOrder => true,
        WriteOperation::DeleteOrder
        | WriteOperation::ManagePartners
        | WriteOperation::ManageAgents
        | WriteOperation::ManageUsers
        | WriteOperation::ResolveInvoice => actor.role.is_admin_tier(),
        WriteOperation::GenerateInternalInvoice => actor.role == Role::SuperAdmin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipledger_core::{PartnerId, UserId};

    fn actor(role: Role) -> Actor {
        Actor::new(UserId::new(), "someone", role)
    }

    #[test]
    fn admin_tier_sees_everything() {
        for role in [Role::SuperAdmin, Role::Admin, Role::Viewer] {
            let scope = OrderScope::for_actor(&actor(role));
            assert_eq!(scope, OrderScope::All);
            assert!(scope.allows(UserId::new(), None));
        }
    }

    #[test]
    fn staff_scope_is_own_entries_only() {
        let staff = actor(Role::Staff);
        let scope = OrderScope::for_actor(&staff);
        assert!(scope.allows(staff.user_id, None));
        assert!(!scope.allows(UserId::new(), None));
    }

    #[test]
    fn partner_scope_is_own_partner_only() {
        let own = PartnerId::new();
        let other = PartnerId::new();
        let partner = actor(Role::Partner).with_partner(own);
        let scope = OrderScope::for_actor(&partner);
        assert!(scope.allows(UserId::new(), Some(own)));
        assert!(!scope.allows(UserId::new(), Some(other)));
        assert!(!scope.allows(UserId::new(), None));
    }

    #[test]
    fn unlinked_partner_sees_nothing() {
        let scope = OrderScope::for_actor(&actor(Role::Partner));
        assert_eq!(scope, OrderScope::Nothing);
        assert!(!scope.allows(UserId::new(), Some(PartnerId::new())));
    }

    #[test]
    fn viewer_cannot_write_anything() {
        let viewer = actor(Role::Viewer);
        assert!(!can_write(&viewer, WriteOperation::CreateOrder));
        assert!(!can_write(&viewer, WriteOperation::UpdateOrder));
        assert!(!can_write(&viewer, WriteOperation::DeleteOrder));
    }

    #[test]
    fn delete_requires_admin_tier() {
        assert!(can_write(&actor(Role::Admin), WriteOperation::DeleteOrder));
        assert!(can_write(&actor(Role::SuperAdmin), WriteOperation::DeleteOrder));
        assert!(!can_write(&actor(Role::Staff), WriteOperation::DeleteOrder));
        assert!(!can_write(
            &actor(Role::Partner).with_partner(PartnerId::new()),
            WriteOperation::DeleteOrder
        ));
    }

    #[test]
    fn internal_invoice_generation_is_super_admin_only() {
        assert!(can_write(
            &actor(Role::SuperAdmin),
            WriteOperation::GenerateInternalInvoice
        ));
        assert!(!can_write(
            &actor(Role::Admin),
            WriteOperation::GenerateInternalInvoice
        ));
    }

    #[test]
    fn staff_and_partner_can_create_orders() {
        assert!(can_write(&actor(Role::Staff), WriteOperation::CreateOrder));
        let partner = actor(Role::Partner).with_partner(PartnerId::new());
        assert!(can_write(&partner, WriteOperation::CreateOrder));
    }
}

//! Directory administration: partners, sales agents, login accounts.

use chrono::{DateTime, Utc};

use shipledger_auth::{Actor, FieldVisibility, Role, WriteOperation, can_write};
use shipledger_core::{DomainError, DomainResult, PartnerId, UserId};
use shipledger_directory::{Partner, SalesAgent, UserAccount};
use shipledger_store::Store;

/// Any authenticated actor may read the partner directory (order entry
/// needs it for the courier-service picker).
pub fn list_partners(store: &impl Store, _actor: &Actor) -> DomainResult<Vec<Partner>> {
    let mut partners = store.partners()?;
    partners.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(partners)
}

pub fn create_partner(
    store: &impl Store,
    actor: &Actor,
    name: &str,
    rate_pct: Option<f64>,
) -> DomainResult<Partner> {
    if !can_write(actor, WriteOperation::ManagePartners) {
        return Err(DomainError::Unauthorized);
    }
    store.insert_partner(Partner::new(name, rate_pct)?)
}

pub fn update_partner(
    store: &impl Store,
    actor: &Actor,
    id: PartnerId,
    name: Option<String>,
    rate_pct: Option<f64>,
) -> DomainResult<Partner> {
    if !can_write(actor, WriteOperation::ManagePartners) {
        return Err(DomainError::Unauthorized);
    }
    let mut partner = store.partner(id)?.ok_or(DomainError::NotFound)?;
    partner.update(name, rate_pct)?;
    store.save_partner(partner)
}

/// Delete a partner. Blocked while orders still reference it, so order
/// history never dangles.
pub fn delete_partner(store: &impl Store, actor: &Actor, id: PartnerId) -> DomainResult<()> {
    if !can_write(actor, WriteOperation::ManagePartners) {
        return Err(DomainError::Unauthorized);
    }
    store.partner(id)?.ok_or(DomainError::NotFound)?;
    let referencing = store
        .orders()?
        .iter()
        .filter(|order| order.partner_id == Some(id))
        .count();
    if referencing > 0 {
        return Err(DomainError::validation(format!(
            "cannot delete partner: {referencing} orders still reference it"
        )));
    }
    store.remove_partner(id)
}

pub fn list_agents(store: &impl Store, _actor: &Actor) -> DomainResult<Vec<SalesAgent>> {
    let mut agents = store.agents()?;
    agents.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(agents)
}

pub fn create_agent(
    store: &impl Store,
    actor: &Actor,
    name: &str,
    rate_pct: f64,
) -> DomainResult<SalesAgent> {
    if !can_write(actor, WriteOperation::ManageAgents) {
        return Err(DomainError::Unauthorized);
    }
    store.insert_agent(SalesAgent::new(name, rate_pct)?)
}

pub fn list_users(store: &impl Store, actor: &Actor) -> DomainResult<Vec<UserAccount>> {
    if !actor.role.is_admin_tier() {
        return Err(DomainError::Unauthorized);
    }
    let mut users = store.users()?;
    users.sort_by(|a, b| a.username.cmp(&b.username));
    Ok(users)
}

/// Payload for creating a login account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub role: Role,
    pub visible_fields: FieldVisibility,
}

/// Create a login account. A Partner-role account also gets a partner
/// profile named after the username, linked one-to-one, so the login can
/// see and file its own orders immediately; if that profile cannot be
/// created (say the name is taken) the account still stands and the
/// operator links one manually.
pub fn create_user(
    store: &impl Store,
    actor: &Actor,
    new_user: NewUser,
    now: DateTime<Utc>,
) -> DomainResult<UserAccount> {
    if !can_write(actor, WriteOperation::ManageUsers) {
        return Err(DomainError::Unauthorized);
    }
    let user =
        store.insert_user(UserAccount::new(new_user.username, new_user.role, new_user.visible_fields, now)?)?;

    if user.role == Role::Partner {
        let profile = Partner::new(user.username.clone(), None)
            .map(|partner| partner.linked_to(user.id))
            .and_then(|partner| store.insert_partner(partner));
        if let Err(err) = profile {
            tracing::warn!(
                username = %user.username,
                error = %err,
                "could not auto-create partner profile for new partner login"
            );
        }
    }
    Ok(user)
}

pub fn update_user(
    store: &impl Store,
    actor: &Actor,
    id: UserId,
    role: Option<Role>,
    visible_fields: Option<FieldVisibility>,
) -> DomainResult<UserAccount> {
    if !can_write(actor, WriteOperation::ManageUsers) {
        return Err(DomainError::Unauthorized);
    }
    let mut user = store.user(id)?.ok_or(DomainError::NotFound)?;
    if let Some(role) = role {
        user.role = role;
    }
    if let Some(visible_fields) = visible_fields {
        user.visible_fields = visible_fields;
    }
    store.save_user(user)
}

pub fn delete_user(store: &impl Store, actor: &Actor, id: UserId) -> DomainResult<()> {
    if !can_write(actor, WriteOperation::ManageUsers) {
        return Err(DomainError::Unauthorized);
    }
    store.remove_user(id)
}

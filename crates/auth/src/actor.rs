//! Request-scoped actor context.

use serde::{Deserialize, Serialize};

use shipledger_core::{AgentId, PartnerId, UserId};

use crate::{FieldVisibility, Role};

/// The authenticated actor for one request.
///
/// Built by the transport layer from a verified session and passed
/// explicitly into every operation; the core never reads ambient global
/// state. The optional entity links are resolved once, at context
/// construction, from the login identity's one-to-one Partner/SalesAgent
/// profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    /// Linked Partner profile, when the login identity has one.
    pub partner_id: Option<PartnerId>,
    /// Linked SalesAgent profile, when the login identity has one.
    pub agent_id: Option<AgentId>,
    /// Field-level visibility capability (relevant for `Viewer`).
    pub visible_fields: FieldVisibility,
}

impl Actor {
    pub fn new(user_id: UserId, username: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
            partner_id: None,
            agent_id: None,
            visible_fields: FieldVisibility::All,
        }
    }

    pub fn with_partner(mut self, partner_id: PartnerId) -> Self {
        self.partner_id = Some(partner_id);
        self
    }

    pub fn with_agent(mut self, agent_id: AgentId) -> Self {
        self.agent_id = Some(agent_id);
        self
    }

    pub fn with_visibility(mut self, visible_fields: FieldVisibility) -> Self {
        self.visible_fields = visible_fields;
        self
    }
}

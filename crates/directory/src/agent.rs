//! Sales agent records.

use serde::{Deserialize, Serialize};

use shipledger_core::{AgentId, DomainError, DomainResult, UserId};

/// Referral/sales staff earning a commission on order profit.
///
/// `rate_pct` is the agent's *default* commission rate. The rate applied
/// to an order is captured onto the order as a snapshot at save time;
/// changing this default later never retroactively changes past orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesAgent {
    pub id: AgentId,
    pub name: String,
    /// Default commission rate in percent.
    pub rate_pct: f64,
    /// Optional one-to-one link to a login identity, so a staff login
    /// accrues commission on its own entries automatically.
    pub user_id: Option<UserId>,
}

impl SalesAgent {
    pub fn new(name: impl Into<String>, rate_pct: f64) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("agent name cannot be empty"));
        }
        if !rate_pct.is_finite() || rate_pct < 0.0 {
            return Err(DomainError::validation("rate must be a non-negative number"));
        }
        Ok(Self {
            id: AgentId::new(),
            name: name.trim().to_string(),
            rate_pct,
            user_id: None,
        })
    }

    pub fn linked_to(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

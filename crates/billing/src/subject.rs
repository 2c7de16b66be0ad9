//! Billing subjects: who an amount is computed (and invoiced) for.

use serde::{Deserialize, Serialize};

use shipledger_core::{AgentId, PartnerId};

/// Fixed internal business-share recipients. These are business constants,
/// not configurable entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InternalRecipient {
    /// Business owner share: half of profit.
    OwnerShare,
    /// Operating partner share: the other half of profit, less all agent
    /// commissions (commissions are paid out of this side).
    OperatingShare,
}

impl InternalRecipient {
    pub fn as_str(&self) -> &'static str {
        match self {
            InternalRecipient::OwnerShare => "Owner Share",
            InternalRecipient::OperatingShare => "Operating Share",
        }
    }
}

impl core::fmt::Display for InternalRecipient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exactly one billing subject per computation/invoice: an internal
/// recipient tag, a partner, or a sales agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillingSubject {
    Internal(InternalRecipient),
    Partner(PartnerId),
    Agent(AgentId),
}

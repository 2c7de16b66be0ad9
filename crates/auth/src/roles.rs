//! The authoritative role set.
//!
//! One closed enum for the whole system; every authorization decision is
//! derived from it. `SuperAdmin` sits strictly above `Admin` (cross-cutting
//! billing views and internal-recipient invoice generation); both form the
//! admin tier for record administration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    Staff,
    Partner,
    Viewer,
}

impl Role {
    /// Admin tier: full read/write over orders, record administration,
    /// invoice resolution.
    pub fn is_admin_tier(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }

    /// Read-only actors never mutate anything.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Role::Viewer)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::Staff => "STAFF",
            Role::Partner => "PARTNER",
            Role::Viewer => "VIEWER",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

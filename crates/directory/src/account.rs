//! Login identity metadata.
//!
//! Credential material (password hashes, sessions) belongs to the excluded
//! authentication layer; this record carries only what the domain needs:
//! role, visibility allow-list, and the username other records reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shipledger_auth::{FieldVisibility, Role};
use shipledger_core::{DomainError, DomainResult, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    /// Unique across accounts (store-enforced).
    pub username: String,
    pub role: Role,
    pub visible_fields: FieldVisibility,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn new(
        username: impl Into<String>,
        role: Role,
        visible_fields: FieldVisibility,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(DomainError::validation("username cannot be empty"));
        }
        Ok(Self {
            id: UserId::new(),
            username: username.trim().to_string(),
            role,
            visible_fields,
            created_at,
        })
    }
}

//! Shipping partner records.

use serde::{Deserialize, Serialize};

use shipledger_core::{DomainError, DomainResult, PartnerId, UserId};

/// External shipping service provider. Billed/paid via the courier fee it
/// charges on each order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: PartnerId,
    /// Unique across partners (store-enforced).
    pub name: String,
    /// Default fee rate in percent. Informational; the money a partner is
    /// owed is the per-order courier cost, not a live application of this
    /// rate.
    pub rate_pct: Option<f64>,
    /// Optional one-to-one link to a login identity. A partner login sees
    /// and files only orders linked to its own record.
    pub user_id: Option<UserId>,
}

impl Partner {
    pub fn new(name: impl Into<String>, rate_pct: Option<f64>) -> DomainResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        validate_rate(rate_pct)?;
        Ok(Self {
            id: PartnerId::new(),
            name: name.trim().to_string(),
            rate_pct,
            user_id: None,
        })
    }

    pub fn linked_to(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Rename and/or change the default rate.
    pub fn update(&mut self, name: Option<String>, rate_pct: Option<f64>) -> DomainResult<()> {
        if let Some(name) = name {
            validate_name(&name)?;
            self.name = name.trim().to_string();
        }
        if rate_pct.is_some() {
            validate_rate(rate_pct)?;
            self.rate_pct = rate_pct;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("partner name cannot be empty"));
    }
    Ok(())
}

fn validate_rate(rate_pct: Option<f64>) -> DomainResult<()> {
    if let Some(rate) = rate_pct {
        if !rate.is_finite() || rate < 0.0 {
            return Err(DomainError::validation("rate must be a non-negative number"));
        }
    }
    Ok(())
}

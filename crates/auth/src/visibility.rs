//! Per-user field-level visibility capability.
//!
//! Some viewer logins are only allowed to see a subset of order columns.
//! The capability is carried on the actor as a typed set of field names and
//! applied as a projection step after scope filtering — never mixed into
//! the query predicate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Canonical field names accepted in a visibility allow-list. These match
/// the column keys the administration UI offers when configuring a login.
pub mod fields {
    pub const CUSTOMER_NAME: &str = "customerName";
    pub const PHONE_NUMBER: &str = "phoneNumber";
    pub const PRODUCTS: &str = "products";
    pub const SALES_EXECUTIVE: &str = "salesExecutive";
    pub const COMMISSION_PCT: &str = "commissionPct";
    pub const COMMISSION_AMOUNT: &str = "commissionAmount";
    pub const COURIER_PAID: &str = "courierPaid";
    pub const TOTAL_PAID: &str = "totalPaid";
    pub const ADDRESS: &str = "address";
    pub const COURIER_COST: &str = "courierCost";
    pub const STATUS: &str = "status";
    pub const TRACKING_ID: &str = "trackingId";
    pub const PACKING_COST: &str = "packingCost";
    pub const PROFIT: &str = "profit";
    pub const DATE: &str = "date";
}

/// Visibility capability: everything, or an explicit allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldVisibility {
    /// Unrestricted (stored as `*`).
    All,
    /// Only the named fields are visible. An empty set hides every
    /// restrictable field.
    Restricted(BTreeSet<String>),
}

impl FieldVisibility {
    /// Parse the stored representation: `*` (or blank) means unrestricted,
    /// otherwise a comma-separated list of field names.
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        if spec.is_empty() || spec == "*" {
            return FieldVisibility::All;
        }
        let set = spec
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        FieldVisibility::Restricted(set)
    }

    pub fn is_visible(&self, field: &str) -> bool {
        match self {
            FieldVisibility::All => true,
            FieldVisibility::Restricted(set) => set.contains(field),
        }
    }

    /// Stored representation (`*` or comma-separated list).
    pub fn as_spec(&self) -> String {
        match self {
            FieldVisibility::All => "*".to_string(),
            FieldVisibility::Restricted(set) => {
                set.iter().cloned().collect::<Vec<_>>().join(",")
            }
        }
    }
}

impl Default for FieldVisibility {
    fn default() -> Self {
        FieldVisibility::All
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_means_everything() {
        let vis = FieldVisibility::parse("*");
        assert!(vis.is_visible(fields::PROFIT));
        assert!(vis.is_visible("anything"));
        assert_eq!(vis.as_spec(), "*");
    }

    #[test]
    fn allow_list_restricts() {
        let vis = FieldVisibility::parse("customerName,status,trackingId");
        assert!(vis.is_visible(fields::CUSTOMER_NAME));
        assert!(vis.is_visible(fields::STATUS));
        assert!(!vis.is_visible(fields::PROFIT));
        assert!(!vis.is_visible(fields::COMMISSION_AMOUNT));
    }

    #[test]
    fn whitespace_and_empties_are_tolerated() {
        let vis = FieldVisibility::parse(" customerName , ,profit ");
        assert!(vis.is_visible(fields::CUSTOMER_NAME));
        assert!(vis.is_visible(fields::PROFIT));
        assert!(!vis.is_visible(fields::STATUS));
    }

    #[test]
    fn empty_spec_is_unrestricted() {
        assert_eq!(FieldVisibility::parse(""), FieldVisibility::All);
        assert_eq!(FieldVisibility::parse("  "), FieldVisibility::All);
    }

    #[test]
    fn round_trips_through_spec() {
        let vis = FieldVisibility::parse("profit,status");
        let again = FieldVisibility::parse(&vis.as_spec());
        assert_eq!(vis, again);
    }
}

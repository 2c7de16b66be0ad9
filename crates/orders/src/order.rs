//! The courier order record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shipledger_core::{AgentId, Cents, DomainError, DomainResult, OrderId, PartnerId, UserId};

use crate::derive::{Financials, derive};

/// Prefix marking a placeholder tracking id, assigned when staff enter an
/// order before the carrier has issued the real code.
pub const TEMP_TRACKING_PREFIX: &str = "TEMP-";

/// Whether a tracking id is still the temporary placeholder.
pub fn is_temporary_tracking(tracking_id: &str) -> bool {
    tracking_id.starts_with(TEMP_TRACKING_PREFIX)
}

/// Shipment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Paid,
    Packed,
    Sent,
    Shipped,
    Delivered,
    Returned,
}

impl OrderStatus {
    /// Statuses that mean the parcel has been handed to a carrier; they
    /// require a real tracking id and a linked partner.
    pub fn requires_dispatch_details(&self) -> bool {
        matches!(self, OrderStatus::Packed | OrderStatus::Sent | OrderStatus::Shipped)
    }

    /// An order still moving through the pipeline (not Delivered/Returned).
    pub fn is_active(&self) -> bool {
        !matches!(self, OrderStatus::Delivered | OrderStatus::Returned)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Paid => "Paid",
            OrderStatus::Packed => "Packed",
            OrderStatus::Sent => "Sent",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Returned => "Returned",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One product within an order.
///
/// `cost` is the internal purchase cost (hidden from restricted viewers);
/// `price` is what the customer pays. Line items are owned by their order
/// and replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    /// Internal unit cost, minor units.
    pub cost: Cents,
    /// Customer-facing unit price, minor units.
    pub price: Cents,
}

impl LineItem {
    pub fn new(name: impl Into<String>, cost: Cents, price: Cents) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        Ok(Self { name: name.trim().to_string(), cost, price })
    }
}

/// A courier shipment record with derived financial fields.
///
/// Invariant: `total_paid`, `profit`, `commission_pct` and
/// `commission_amount` are recomputed from the line items, raw cost/payment
/// inputs and the snapshot agent rate on every financial write. A targeted
/// partial update (status-only, free-text-only) intentionally leaves them
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Unique human tracking code; may be a `TEMP-` placeholder.
    pub tracking_id: String,
    /// Auto-sequenced slip number when the client supplies none.
    pub slip_no: String,
    pub date: DateTime<Utc>,
    pub customer_name: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub pincode: Option<String>,
    pub items: Vec<LineItem>,
    /// Extra courier charge collected from the customer.
    pub courier_paid_extra: Cents,
    /// What the partner charges us to carry the parcel.
    pub courier_cost_expense: Cents,
    pub packing_cost_expense: Cents,
    pub sales_agent_id: Option<AgentId>,
    pub partner_id: Option<PartnerId>,
    pub status: OrderStatus,
    // Derived at write time.
    pub total_paid: Cents,
    pub profit: Cents,
    /// Commission rate snapshot taken when the agent was linked or the
    /// rate was last overridden; never a live join to the agent record.
    pub commission_pct: f64,
    pub commission_amount: Cents,
    pub entered_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Re-run the derivation from the current inputs and store the result.
    pub(crate) fn recompute(&mut self, agent_rate_pct: Option<f64>) {
        let Financials { total_paid, profit, commission_pct, commission_amount } = derive(
            &self.items,
            self.courier_paid_extra,
            self.courier_cost_expense,
            self.packing_cost_expense,
            if self.sales_agent_id.is_some() { agent_rate_pct } else { None },
        );
        self.total_paid = total_paid;
        self.profit = profit;
        self.commission_pct = commission_pct;
        self.commission_amount = commission_amount;
    }
}

/// Guard for transitions into dispatch statuses (Packed/Sent/Shipped).
///
/// Checked against the *merged* record, not just a patch payload: the
/// caller passes the values that will hold after the update.
pub fn ensure_dispatch_ready(
    status: OrderStatus,
    tracking_id: &str,
    partner_id: Option<PartnerId>,
) -> DomainResult<()> {
    if !status.requires_dispatch_details() {
        return Ok(());
    }
    if is_temporary_tracking(tracking_id) {
        return Err(DomainError::validation(
            "Real Tracking ID is required to change status.",
        ));
    }
    if partner_id.is_none() {
        return Err(DomainError::validation(
            "Courier Service (Partner) is required.",
        ));
    }
    Ok(())
}

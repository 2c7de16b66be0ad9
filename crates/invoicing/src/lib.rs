//! Invoice lifecycle domain module.
//!
//! The invoice record and the rules that govern it: Pending → Paid/Rejected,
//! payment modes, subject ownership, and the advisory next-billing-period
//! suggestion. Deterministic domain logic only; the atomic compare-and-set
//! on status transitions is the store's concern.

pub mod invoice;
pub mod lifecycle;

pub use invoice::{Invoice, InvoiceStatus, PaymentMode};
pub use lifecycle::{
    ensure_resolution_target, owns_invoice, subject_of_actor, suggested_next_start,
};

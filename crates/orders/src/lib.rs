//! Order ledger domain module.
//!
//! The courier order record, the financial derivation engine, the
//! create/patch merge rules and the free-text search matcher, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod change;
pub mod derive;
pub mod order;
pub mod search;

pub use change::{OrderDraft, OrderPatch, apply_patch, build_order};
pub use derive::{Financials, derive};
pub use order::{
    LineItem, Order, OrderStatus, TEMP_TRACKING_PREFIX, ensure_dispatch_ready,
    is_temporary_tracking,
};
pub use search::{SearchContext, matches};

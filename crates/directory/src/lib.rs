//! Entity catalog: partners, sales agents, and login-identity metadata.
//!
//! Leaf data referenced by orders and invoices. Pure records with
//! validating constructors; uniqueness is the store's concern.

pub mod account;
pub mod agent;
pub mod partner;

pub use account::UserAccount;
pub use agent::SalesAgent;
pub use partner::Partner;

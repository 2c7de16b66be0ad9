//! `shipledger-auth` — pure authorization boundary.
//!
//! Roles, the request-scoped actor context, order scope resolution and
//! field-level visibility. Intentionally decoupled from HTTP and storage;
//! session issuance and credential handling live in the transport layer.

pub mod actor;
pub mod roles;
pub mod scope;
pub mod visibility;

pub use actor::Actor;
pub use roles::Role;
pub use scope::{OrderScope, WriteOperation, can_write};
pub use visibility::{FieldVisibility, fields};

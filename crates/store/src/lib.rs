//! Storage contract and the in-memory reference implementation.
//!
//! The [`Store`] trait is the schema-level contract the relational backend
//! must honor: unique constraints on tracking ids, partner names and
//! usernames, a monotonic slip-number sequence, snapshot reads, and an
//! atomic compare-and-set for invoice resolution. [`InMemoryStore`] stands
//! in for the relational backend in tests and development.

pub mod contract;
pub mod memory;

pub use contract::Store;
pub use memory::InMemoryStore;

//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation,
/// authorization, conflicts). Every variant is recoverable at the boundary
/// and maps to a user-facing message; none is fatal to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or policy-violating input (e.g. non-positive invoice
    /// amount, a blocked status transition).
    #[error("{0}")]
    Validation(String),

    /// The actor lacks the role or ownership required for the operation.
    #[error("access denied")]
    Unauthorized,

    /// Unique-constraint violation or a lost compare-and-set race.
    #[error("{0}")]
    Conflict(String),

    /// The referenced record does not exist, or is outside the actor's
    /// scope. The two cases are deliberately indistinguishable so that
    /// out-of-scope ids leak nothing.
    #[error("not found")]
    NotFound,

    /// Unexpected internal failure. Displays as an opaque message; the
    /// detail is for logs only.
    #[error("operation failed")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }
}

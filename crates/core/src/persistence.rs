//! Errors reported by storage implementations.
//!
//! Repositories translate driver errors into these variants so the domain
//! can tell a constraint the database enforced apart from an outage.

use thiserror::Error;

/// Storage failure as seen by the domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// Two confirmed stays on one property would overlap.
    #[error("Overlapping confirmed stay rejected by storage")]
    OverlapViolation,

    /// A uniqueness constraint was violated.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(String),
}

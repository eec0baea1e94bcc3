//! Translation of `SeaORM` errors into domain persistence errors.

use sea_orm::{DbErr, RuntimeErr};

use roomify_core::persistence::PersistenceError;

/// PostgreSQL `exclusion_violation`.
const EXCLUSION_VIOLATION: &str = "23P01";
/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Classify a database error by its SQLSTATE.
pub(crate) fn classify(err: DbErr) -> PersistenceError {
    match sqlstate(&err).as_deref() {
        Some(EXCLUSION_VIOLATION) => PersistenceError::OverlapViolation,
        Some(UNIQUE_VIOLATION) => PersistenceError::UniqueViolation(err.to_string()),
        _ => {
            tracing::error!(error = %err, "database operation failed");
            PersistenceError::Database(err.to_string())
        }
    }
}

fn sqlstate(err: &DbErr) -> Option<String> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(sqlx_err))
        | DbErr::Query(RuntimeErr::SqlxError(sqlx_err)) => sqlx_err
            .as_database_error()
            .and_then(|db_err| db_err.code())
            .map(|code| code.into_owned()),
        _ => None,
    }
}

/// Error for a stored value the domain cannot represent.
pub(crate) fn corrupt(what: &str, detail: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::Database(format!("invalid stored {what}: {detail}"))
}

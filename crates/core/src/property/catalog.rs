//! Property lookup seam.

use roomify_shared::types::{PropertyId, UserId};

use crate::persistence::PersistenceError;
use crate::property::types::Property;

/// Read access to listed properties.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait PropertyCatalog: Send + Sync {
    /// Find a property by ID.
    fn find_one(
        &self,
        id: PropertyId,
    ) -> impl std::future::Future<Output = Result<Option<Property>, PersistenceError>> + Send;

    /// List every property owned by a user.
    fn find_by_owner(
        &self,
        owner_id: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Property>, PersistenceError>> + Send;
}

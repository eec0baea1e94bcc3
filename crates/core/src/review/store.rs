//! Review persistence seam.

use roomify_shared::types::{PropertyId, ReviewId, UserId};

use crate::persistence::PersistenceError;
use crate::review::types::{RatingTotals, Review};

/// Repository trait for review persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
/// Storage enforces one review per (reviewer, property) and reports a second
/// insert as `PersistenceError::UniqueViolation`.
pub trait ReviewStore: Send + Sync {
    /// Insert a new review.
    fn insert(
        &self,
        review: Review,
    ) -> impl std::future::Future<Output = Result<Review, PersistenceError>> + Send;

    /// Find review by ID.
    fn find_by_id(
        &self,
        id: ReviewId,
    ) -> impl std::future::Future<Output = Result<Option<Review>, PersistenceError>> + Send;

    /// Find the review a user wrote for a property, if any.
    fn find_by_reviewer_and_property(
        &self,
        reviewer_id: UserId,
        property_id: PropertyId,
    ) -> impl std::future::Future<Output = Result<Option<Review>, PersistenceError>> + Send;

    /// List a property's reviews, newest first.
    fn list_by_property(
        &self,
        property_id: PropertyId,
    ) -> impl std::future::Future<Output = Result<Vec<Review>, PersistenceError>> + Send;

    /// List a user's reviews, newest first.
    fn list_by_reviewer(
        &self,
        reviewer_id: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Review>, PersistenceError>> + Send;

    /// Overwrite rating and comment. Returns `None` if the review is gone.
    fn update(
        &self,
        review: Review,
    ) -> impl std::future::Future<Output = Result<Option<Review>, PersistenceError>> + Send;

    /// Delete review by ID.
    fn delete(
        &self,
        id: ReviewId,
    ) -> impl std::future::Future<Output = Result<bool, PersistenceError>> + Send;

    /// Count and sum of a property's ratings.
    fn rating_totals(
        &self,
        property_id: PropertyId,
    ) -> impl std::future::Future<Output = Result<RatingTotals, PersistenceError>> + Send;
}

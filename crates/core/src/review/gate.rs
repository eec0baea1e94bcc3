//! Review gate: who may review, edit and remove reviews.
//!
//! A review is only accepted from a guest with a completed stay at the
//! property (admins are exempt), and at most once per guest and property.

use std::sync::Arc;

use chrono::Utc;

use roomify_shared::types::{PropertyId, ReviewId, UserId};

use crate::access::{AccessPolicy, Principal};
use crate::booking::ledger::BookingLedger;
use crate::booking::store::BookingStore;
use crate::property::{Property, PropertyCatalog};
use crate::review::error::ReviewError;
use crate::review::store::ReviewStore;
use crate::review::types::{
    CreateReviewInput, MAX_RATING, MIN_RATING, PropertyRating, Review, UpdateReviewInput,
};

/// Review service.
pub struct ReviewGate<R: ReviewStore, B: BookingStore, P: PropertyCatalog> {
    reviews: Arc<R>,
    ledger: Arc<BookingLedger<B, P>>,
    properties: Arc<P>,
}

impl<R: ReviewStore, B: BookingStore, P: PropertyCatalog> ReviewGate<R, B, P> {
    /// Create a new review gate.
    #[must_use]
    pub fn new(reviews: Arc<R>, ledger: Arc<BookingLedger<B, P>>, properties: Arc<P>) -> Self {
        Self {
            reviews,
            ledger,
            properties,
        }
    }

    /// Review a property.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The property does not exist
    /// - The rating is outside 1..=5 or the comment is blank
    /// - A non-admin requester has no completed stay at the property
    /// - The requester already reviewed the property
    pub async fn create_review(
        &self,
        input: CreateReviewInput,
        requester: &Principal,
    ) -> Result<Review, ReviewError> {
        let property = self.find_property(input.property_id).await?;
        validate_rating(input.rating)?;
        let comment = validate_comment(&input.comment)?;

        if AccessPolicy::requires_completed_stay(requester)
            && !self
                .ledger
                .has_completed_stay(requester.id, property.id)
                .await?
        {
            return Err(ReviewError::Forbidden(
                "you can only review properties you have stayed at".to_string(),
            ));
        }

        // Absent means proceed; the unique index still backs this up.
        if self
            .reviews
            .find_by_reviewer_and_property(requester.id, property.id)
            .await?
            .is_some()
        {
            return Err(ReviewError::DuplicateReview);
        }

        let now = Utc::now();
        let review = Review {
            id: ReviewId::new(),
            property_id: property.id,
            reviewer_id: requester.id,
            rating: input.rating,
            comment,
            created_at: now,
            updated_at: now,
        };

        Ok(self.reviews.insert(review).await?)
    }

    /// A property's reviews, newest first.
    pub async fn list_reviews(&self, property_id: PropertyId) -> Result<Vec<Review>, ReviewError> {
        Ok(self.reviews.list_by_property(property_id).await?)
    }

    /// Fetch one review.
    pub async fn get_review(&self, id: ReviewId) -> Result<Review, ReviewError> {
        self.reviews
            .find_by_id(id)
            .await?
            .ok_or(ReviewError::ReviewNotFound(id))
    }

    /// A user's reviews, newest first.
    pub async fn list_reviews_by_user(&self, user_id: UserId) -> Result<Vec<Review>, ReviewError> {
        Ok(self.reviews.list_by_reviewer(user_id).await?)
    }

    /// Edit rating or comment. Reviewer or admin only.
    pub async fn update_review(
        &self,
        id: ReviewId,
        patch: UpdateReviewInput,
        requester: &Principal,
    ) -> Result<Review, ReviewError> {
        let mut review = self.get_review(id).await?;
        if !AccessPolicy::can_edit_review(requester, &review) {
            return Err(ReviewError::Forbidden(
                "you can only edit your own reviews".to_string(),
            ));
        }

        if let Some(rating) = patch.rating {
            validate_rating(rating)?;
            review.rating = rating;
        }
        if let Some(comment) = patch.comment {
            review.comment = validate_comment(&comment)?;
        }
        review.updated_at = Utc::now();

        self.reviews
            .update(review)
            .await?
            .ok_or(ReviewError::ReviewNotFound(id))
    }

    /// Delete a review. Reviewer, property owner or admin only.
    pub async fn remove_review(&self, id: ReviewId, requester: &Principal) -> Result<(), ReviewError> {
        let review = self.get_review(id).await?;
        let property = self.find_property(review.property_id).await?;
        if !AccessPolicy::can_remove_review(requester, &review, &property) {
            return Err(ReviewError::Forbidden(
                "not allowed to delete this review".to_string(),
            ));
        }

        if self.reviews.delete(id).await? {
            Ok(())
        } else {
            Err(ReviewError::ReviewNotFound(id))
        }
    }

    /// Average rating and review count of a property.
    pub async fn property_rating(
        &self,
        property_id: PropertyId,
    ) -> Result<PropertyRating, ReviewError> {
        let totals = self.reviews.rating_totals(property_id).await?;
        Ok(PropertyRating::from(totals))
    }

    async fn find_property(&self, id: PropertyId) -> Result<Property, ReviewError> {
        self.properties
            .find_one(id)
            .await?
            .ok_or(ReviewError::PropertyNotFound(id))
    }
}

fn validate_rating(rating: u8) -> Result<(), ReviewError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(ReviewError::InvalidRating(rating))
    }
}

fn validate_comment(comment: &str) -> Result<String, ReviewError> {
    let trimmed = comment.trim();
    if trimmed.is_empty() {
        return Err(ReviewError::EmptyComment);
    }
    Ok(trimmed.to_string())
}

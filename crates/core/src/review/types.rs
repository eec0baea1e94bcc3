//! Review domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use roomify_shared::types::{PropertyId, ReviewId, UserId};

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;

/// A guest's review of a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Review id.
    pub id: ReviewId,
    /// Reviewed property.
    pub property_id: PropertyId,
    /// Author.
    pub reviewer_id: UserId,
    /// Star rating, 1 to 5.
    pub rating: u8,
    /// Review text, never blank.
    pub comment: String,
    /// When the review was written.
    pub created_at: DateTime<Utc>,
    /// When the review was last edited.
    pub updated_at: DateTime<Utc>,
}

/// Request to review a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReviewInput {
    /// Property being reviewed.
    pub property_id: PropertyId,
    /// Star rating.
    pub rating: u8,
    /// Review text.
    pub comment: String,
}

/// Partial edit of a review.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReviewInput {
    /// New rating.
    pub rating: Option<u8>,
    /// New text.
    pub comment: Option<String>,
}

/// Count and sum of ratings for one property, as aggregated by storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingTotals {
    /// Number of reviews.
    pub review_count: u64,
    /// Sum of all ratings.
    pub rating_sum: u64,
}

/// Average rating of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRating {
    /// Mean rating rounded to one decimal place, zero without reviews.
    pub average_rating: Decimal,
    /// Number of reviews.
    pub review_count: u64,
}

impl From<RatingTotals> for PropertyRating {
    fn from(totals: RatingTotals) -> Self {
        let average_rating = if totals.review_count == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(totals.rating_sum) / Decimal::from(totals.review_count))
                .round_dp_with_strategy(1, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        };
        Self {
            average_rating,
            review_count: totals.review_count,
        }
    }
}

//! Property reviews.
//!
//! Reviews are gated on a completed stay and limited to one per guest and
//! property. Aggregates are computed from storage totals.

pub mod error;
pub mod gate;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReviewError;
pub use gate::ReviewGate;
pub use store::ReviewStore;
pub use types::{
    CreateReviewInput, PropertyRating, RatingTotals, Review, UpdateReviewInput, MAX_RATING,
    MIN_RATING,
};

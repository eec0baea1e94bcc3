//! Review error types.

use thiserror::Error;

use roomify_shared::types::{PropertyId, ReviewId};

use crate::booking::error::BookingError;
use crate::persistence::PersistenceError;

/// Errors that can occur during review operations.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Review not found.
    #[error("Review {0} not found")]
    ReviewNotFound(ReviewId),

    /// Property not found.
    #[error("Property {0} not found")]
    PropertyNotFound(PropertyId),

    /// Requester is not allowed to perform the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The reviewer already reviewed this property.
    #[error("You have already reviewed this property")]
    DuplicateReview,

    /// Rating outside the accepted range.
    #[error("Rating {0} must be between 1 and 5")]
    InvalidRating(u8),

    /// Comment is empty or whitespace.
    #[error("Comment cannot be empty")]
    EmptyComment,

    /// Storage failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ReviewError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRating(_) | Self::EmptyComment => 400,
            Self::Forbidden(_) => 403,
            Self::ReviewNotFound(_) | Self::PropertyNotFound(_) => 404,
            Self::DuplicateReview => 409,
            Self::Storage(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ReviewNotFound(_) => "REVIEW_NOT_FOUND",
            Self::PropertyNotFound(_) => "PROPERTY_NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::DuplicateReview => "DUPLICATE_REVIEW",
            Self::InvalidRating(_) | Self::EmptyComment => "INVALID_REVIEW",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<PersistenceError> for ReviewError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::UniqueViolation(_) => Self::DuplicateReview,
            PersistenceError::OverlapViolation => Self::Storage(err.to_string()),
            PersistenceError::Database(msg) => Self::Storage(msg),
        }
    }
}

impl From<BookingError> for ReviewError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::PropertyNotFound(id) => Self::PropertyNotFound(id),
            BookingError::Storage(msg) => Self::Storage(msg),
            other => Self::Storage(other.to_string()),
        }
    }
}

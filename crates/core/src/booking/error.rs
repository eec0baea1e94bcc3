//! Booking error types.
//!
//! This module defines all error types that can occur during
//! booking operations such as creation, updates and status transitions.

use thiserror::Error;

use roomify_shared::types::{BookingId, PropertyId};

use crate::booking::types::BookingStatus;
use crate::persistence::PersistenceError;

/// Errors that can occur during booking operations.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Check-in is in the past or check-out does not follow check-in.
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    /// More guests than the property accepts.
    #[error("Guest count {requested} exceeds property capacity of {max}")]
    CapacityExceeded {
        /// Requested guest count.
        requested: u32,
        /// Property maximum.
        max: u32,
    },

    /// A confirmed stay already covers some of the requested nights.
    #[error("Property is not available for the selected dates")]
    AvailabilityConflict,

    /// Booking not found.
    #[error("Booking {0} not found")]
    BookingNotFound(BookingId),

    /// Property not found.
    #[error("Property {0} not found")]
    PropertyNotFound(PropertyId),

    /// Property is not accepting bookings.
    #[error("Property {0} is not available for booking")]
    PropertyInactive(PropertyId),

    /// Requester is not allowed to perform the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Status transition not allowed from the current status.
    #[error("Cannot move booking from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: BookingStatus,
        /// The attempted target status.
        to: BookingStatus,
    },

    /// Details cannot change in the current status.
    #[error("Cannot update a {0} booking")]
    NotEditable(BookingStatus),

    /// Storage failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BookingError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidDateRange(_)
            | Self::CapacityExceeded { .. }
            | Self::PropertyInactive(_)
            | Self::InvalidTransition { .. }
            | Self::NotEditable(_) => 400,

            Self::Forbidden(_) => 403,

            Self::BookingNotFound(_) | Self::PropertyNotFound(_) => 404,

            Self::AvailabilityConflict => 409,

            Self::Storage(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDateRange(_) => "INVALID_DATE_RANGE",
            Self::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            Self::AvailabilityConflict => "AVAILABILITY_CONFLICT",
            Self::BookingNotFound(_) => "BOOKING_NOT_FOUND",
            Self::PropertyNotFound(_) => "PROPERTY_NOT_FOUND",
            Self::PropertyInactive(_) => "PROPERTY_INACTIVE",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidTransition { .. } | Self::NotEditable(_) => "INVALID_STATE",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<PersistenceError> for BookingError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::OverlapViolation => Self::AvailabilityConflict,
            PersistenceError::UniqueViolation(msg) | PersistenceError::Database(msg) => {
                Self::Storage(msg)
            }
        }
    }
}

//! Booking status state machine.
//!
//! This module decides which status moves are legal. It never touches
//! storage; the ledger applies the returned status with a compare-and-set.

use crate::booking::error::BookingError;
use crate::booking::types::{BookingAction, BookingStatus};

/// Stateless service for booking status transitions.
pub struct BookingWorkflow;

impl BookingWorkflow {
    /// Confirm a pending booking.
    ///
    /// # Returns
    /// * `Ok(BookingStatus::Confirmed)` if the booking is pending
    /// * `Err(BookingError::InvalidTransition)` otherwise
    pub fn confirm(current_status: BookingStatus) -> Result<BookingStatus, BookingError> {
        Self::step(current_status, BookingStatus::Confirmed)
    }

    /// Cancel a pending or confirmed booking.
    ///
    /// Completed and already-cancelled bookings are terminal.
    pub fn cancel(current_status: BookingStatus) -> Result<BookingStatus, BookingError> {
        Self::step(current_status, BookingStatus::Cancelled)
    }

    /// Complete a confirmed booking.
    pub fn complete(current_status: BookingStatus) -> Result<BookingStatus, BookingError> {
        Self::step(current_status, BookingStatus::Completed)
    }

    /// Dispatch an action to the matching transition.
    pub fn apply(
        current_status: BookingStatus,
        action: BookingAction,
    ) -> Result<BookingStatus, BookingError> {
        Self::step(current_status, action.target_status())
    }

    /// Check if a transition is valid without performing it.
    #[must_use]
    pub fn is_valid_transition(from: BookingStatus, to: BookingStatus) -> bool {
        matches!(
            (from, to),
            (BookingStatus::Pending, BookingStatus::Confirmed | BookingStatus::Cancelled)
                | (
                    BookingStatus::Confirmed,
                    BookingStatus::Cancelled | BookingStatus::Completed
                )
        )
    }

    fn step(from: BookingStatus, to: BookingStatus) -> Result<BookingStatus, BookingError> {
        if Self::is_valid_transition(from, to) {
            Ok(to)
        } else {
            Err(BookingError::InvalidTransition { from, to })
        }
    }

    /// Reject detail changes on confirmed or completed bookings.
    pub fn ensure_editable(current_status: BookingStatus) -> Result<(), BookingError> {
        if current_status.is_editable() {
            Ok(())
        } else {
            Err(BookingError::NotEditable(current_status))
        }
    }
}

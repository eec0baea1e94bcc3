//! Bookings: stay validation, availability, pricing and the status lifecycle.
//!
//! This module provides:
//! - `StayWindow` date arithmetic and overlap detection
//! - `BookingWorkflow`, the status state machine
//! - `BookingLedger`, the service that ties both to storage under
//!   per-property locks

pub mod error;
pub mod ledger;
pub mod locks;
pub mod stay;
pub mod store;
pub mod types;
pub mod workflow;

#[cfg(test)]
mod stay_props;
#[cfg(test)]
mod workflow_props;

pub use error::BookingError;
pub use ledger::BookingLedger;
pub use locks::{PropertyGuard, PropertyLocks};
pub use stay::{StayWindow, validate_stay};
pub use store::BookingStore;
pub use types::{
    Booking, BookingAction, BookingStatus, CreateBookingInput, UpdateBookingInput,
};
pub use workflow::BookingWorkflow;

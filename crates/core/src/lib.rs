//! Core business logic for Roomify.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and the booking state machine live here;
//! storage is reached through traits the db crate implements.
//!
//! # Modules
//!
//! - `access` - Roles, principals and authorization predicates
//! - `property` - The property attributes bookings depend on
//! - `booking` - Stay validation, availability, pricing and lifecycle
//! - `review` - Completed-stay gated reviews and ratings
//! - `clock` - Source of "today"
//! - `persistence` - Storage errors shared by every store trait

pub mod access;
pub mod booking;
pub mod clock;
pub mod persistence;
pub mod property;
pub mod review;

#[cfg(test)]
mod testing;

pub use access::{AccessPolicy, Principal, Role};
pub use booking::{
    Booking, BookingError, BookingLedger, BookingStatus, BookingStore, CreateBookingInput,
    StayWindow, UpdateBookingInput,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use persistence::PersistenceError;
pub use property::{Property, PropertyCatalog, PropertyStatus};
pub use review::{
    CreateReviewInput, PropertyRating, Review, ReviewError, ReviewGate, ReviewStore,
    UpdateReviewInput,
};

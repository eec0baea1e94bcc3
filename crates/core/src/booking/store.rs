//! Booking persistence seam.

use roomify_shared::types::{BookingId, PropertyId, UserId};

use crate::booking::stay::StayWindow;
use crate::booking::types::{Booking, BookingStatus};
use crate::persistence::PersistenceError;

/// Repository trait for booking persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
/// Status-sensitive writes are compare-and-set: they return `None` when the
/// stored status no longer matches the one the caller read.
pub trait BookingStore: Send + Sync {
    /// Insert a new booking.
    fn insert(
        &self,
        booking: Booking,
    ) -> impl std::future::Future<Output = Result<Booking, PersistenceError>> + Send;

    /// Find booking by ID.
    fn find_by_id(
        &self,
        id: BookingId,
    ) -> impl std::future::Future<Output = Result<Option<Booking>, PersistenceError>> + Send;

    /// List every booking, newest first.
    fn list_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, PersistenceError>> + Send;

    /// List a guest's bookings, newest first.
    fn list_by_guest(
        &self,
        guest_id: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, PersistenceError>> + Send;

    /// List bookings on any of the given properties, newest first.
    fn list_by_properties(
        &self,
        property_ids: Vec<PropertyId>,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, PersistenceError>> + Send;

    /// List a guest's bookings on one property, optionally filtered by status.
    fn list_by_guest_and_property(
        &self,
        guest_id: UserId,
        property_id: PropertyId,
        status: Option<BookingStatus>,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, PersistenceError>> + Send;

    /// Find confirmed bookings on a property sharing a night with `stay`.
    fn find_confirmed_overlapping(
        &self,
        property_id: PropertyId,
        stay: StayWindow,
        exclude: Option<BookingId>,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, PersistenceError>> + Send;

    /// Write dates, guest count, price and requests if the status is still
    /// `expected_status`.
    fn update_details(
        &self,
        booking: Booking,
        expected_status: BookingStatus,
    ) -> impl std::future::Future<Output = Result<Option<Booking>, PersistenceError>> + Send;

    /// Move `from` → `to` if the stored status is still `from`.
    fn transition_status(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> impl std::future::Future<Output = Result<Option<Booking>, PersistenceError>> + Send;

    /// Delete booking by ID.
    fn delete(
        &self,
        id: BookingId,
    ) -> impl std::future::Future<Output = Result<bool, PersistenceError>> + Send;
}

//! Booking ledger: the lifecycle and availability engine.
//!
//! Every mutation takes the lock of the booking's property, re-reads the
//! state it depends on, checks it, and only then writes. Status writes are
//! additionally compare-and-set in storage, so a second process racing on
//! the same row loses with `INVALID_STATE` instead of overwriting.

use std::sync::Arc;

use chrono::Utc;

use roomify_shared::types::{BookingId, PropertyId, UserId};

use crate::access::{AccessPolicy, Principal, Role};
use crate::booking::error::BookingError;
use crate::booking::locks::{PropertyGuard, PropertyLocks};
use crate::booking::stay::{StayWindow, validate_stay};
use crate::booking::store::BookingStore;
use crate::booking::types::{
    Booking, BookingAction, BookingStatus, CreateBookingInput, UpdateBookingInput,
};
use crate::booking::workflow::BookingWorkflow;
use crate::clock::{Clock, SystemClock};
use crate::property::{Property, PropertyCatalog};

/// Booking lifecycle service.
pub struct BookingLedger<B: BookingStore, P: PropertyCatalog> {
    bookings: Arc<B>,
    properties: Arc<P>,
    clock: Arc<dyn Clock>,
    locks: PropertyLocks,
}

impl<B: BookingStore, P: PropertyCatalog> BookingLedger<B, P> {
    /// Create a ledger using the system clock.
    #[must_use]
    pub fn new(bookings: Arc<B>, properties: Arc<P>) -> Self {
        Self::with_clock(bookings, properties, Arc::new(SystemClock))
    }

    /// Create a ledger with an explicit source of "today".
    #[must_use]
    pub fn with_clock(bookings: Arc<B>, properties: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            bookings,
            properties,
            clock,
            locks: PropertyLocks::new(),
        }
    }

    /// Create a pending booking for the requester.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Check-in is in the past or check-out is not after check-in
    /// - The property does not exist or is not active
    /// - The guest count is zero or above the property's capacity
    /// - A confirmed booking already covers one of the nights
    pub async fn create_booking(
        &self,
        input: CreateBookingInput,
        requester: &Principal,
    ) -> Result<Booking, BookingError> {
        let stay = validate_stay(input.check_in_date, input.check_out_date, self.clock.today())?;

        let property = self.find_property(input.property_id).await?;
        if !property.is_bookable() {
            return Err(BookingError::PropertyInactive(property.id));
        }
        check_capacity(input.guest_count, &property)?;

        let _guard = self.locks.acquire(property.id).await;
        self.ensure_available(property.id, stay, None).await?;

        let now = Utc::now();
        let booking = Booking {
            id: BookingId::new(),
            property_id: property.id,
            guest_id: requester.id,
            check_in_date: stay.check_in,
            check_out_date: stay.check_out,
            guest_count: input.guest_count,
            total_price: stay.price(property.price_per_night),
            status: BookingStatus::Pending,
            special_requests: input.special_requests,
            is_paid: false,
            payment_intent_id: None,
            created_at: now,
            updated_at: now,
        };

        Ok(self.bookings.insert(booking).await?)
    }

    /// List the bookings the requester is entitled to see.
    ///
    /// Admins see everything, hosts see bookings on the properties they own,
    /// guests see their own.
    pub async fn list_bookings(&self, requester: &Principal) -> Result<Vec<Booking>, BookingError> {
        let bookings = match requester.role {
            Role::Admin => self.bookings.list_all().await?,
            Role::Host => {
                let owned: Vec<PropertyId> = self
                    .properties
                    .find_by_owner(requester.id)
                    .await?
                    .into_iter()
                    .map(|p| p.id)
                    .collect();
                if owned.is_empty() {
                    Vec::new()
                } else {
                    self.bookings.list_by_properties(owned).await?
                }
            }
            Role::Guest => self.bookings.list_by_guest(requester.id).await?,
        };
        Ok(bookings)
    }

    /// Fetch one booking.
    ///
    /// # Errors
    ///
    /// `BookingNotFound` if absent, `Forbidden` unless the requester is an
    /// admin, the guest, or the owning host.
    pub async fn get_booking(
        &self,
        id: BookingId,
        requester: &Principal,
    ) -> Result<Booking, BookingError> {
        let booking = self.find_booking(id).await?;
        let property = self.find_property(booking.property_id).await?;
        authorize_view(requester, &booking, &property)?;
        Ok(booking)
    }

    /// Change dates, guest count or special requests.
    ///
    /// A date change re-validates the merged pair, recomputes the total from
    /// the property's current nightly rate and re-runs the availability
    /// check against everyone but this booking.
    pub async fn update_booking(
        &self,
        id: BookingId,
        patch: UpdateBookingInput,
        requester: &Principal,
    ) -> Result<Booking, BookingError> {
        let (_guard, current, property) = self.lock_booking(id).await?;
        authorize_view(requester, &current, &property)?;
        if !AccessPolicy::can_edit_booking(requester, &current) {
            return Err(BookingError::Forbidden(
                "only the guest or an admin can update this booking".to_string(),
            ));
        }
        BookingWorkflow::ensure_editable(current.status)?;

        let mut updated = current.clone();

        if patch.changes_dates() {
            let check_in = patch.check_in_date.unwrap_or(current.check_in_date);
            let check_out = patch.check_out_date.unwrap_or(current.check_out_date);
            let stay = validate_stay(check_in, check_out, self.clock.today())?;
            self.ensure_available(property.id, stay, Some(id)).await?;

            updated.check_in_date = stay.check_in;
            updated.check_out_date = stay.check_out;
            updated.total_price = stay.price(property.price_per_night);
        }

        if let Some(guest_count) = patch.guest_count {
            check_capacity(guest_count, &property)?;
            updated.guest_count = guest_count;
        }

        if let Some(special_requests) = patch.special_requests {
            updated.special_requests = special_requests;
        }

        updated.updated_at = Utc::now();

        match self.bookings.update_details(updated, current.status).await? {
            Some(saved) => Ok(saved),
            None => Err(self.stale_edit(id).await),
        }
    }

    /// Host or admin accepts a pending booking.
    ///
    /// Fails with `AVAILABILITY_CONFLICT` if another booking covering any of
    /// the same nights was confirmed first.
    pub async fn confirm_booking(
        &self,
        id: BookingId,
        requester: &Principal,
    ) -> Result<Booking, BookingError> {
        self.transition(id, BookingAction::Confirm, requester).await
    }

    /// Guest, owning host or admin calls the stay off.
    pub async fn cancel_booking(
        &self,
        id: BookingId,
        requester: &Principal,
    ) -> Result<Booking, BookingError> {
        self.transition(id, BookingAction::Cancel, requester).await
    }

    /// Host or admin marks a confirmed stay as done.
    pub async fn complete_booking(
        &self,
        id: BookingId,
        requester: &Principal,
    ) -> Result<Booking, BookingError> {
        self.transition(id, BookingAction::Complete, requester).await
    }

    /// Hard-delete a booking in any status. Admin only; a missing booking is
    /// reported as not found before permissions are checked.
    pub async fn remove_booking(
        &self,
        id: BookingId,
        requester: &Principal,
    ) -> Result<(), BookingError> {
        let property_id = self.find_booking(id).await?.property_id;
        if !AccessPolicy::can_remove_booking(requester) {
            return Err(BookingError::Forbidden(
                "only admins can delete bookings".to_string(),
            ));
        }

        let _guard = self.locks.acquire(property_id).await;

        if self.bookings.delete(id).await? {
            Ok(())
        } else {
            Err(BookingError::BookingNotFound(id))
        }
    }

    /// A guest's bookings on one property, optionally only in one status.
    pub async fn find_by_guest_and_property(
        &self,
        guest_id: UserId,
        property_id: PropertyId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, BookingError> {
        Ok(self
            .bookings
            .list_by_guest_and_property(guest_id, property_id, status)
            .await?)
    }

    /// True if the guest has at least one completed stay at the property.
    pub async fn has_completed_stay(
        &self,
        guest_id: UserId,
        property_id: PropertyId,
    ) -> Result<bool, BookingError> {
        let completed = self
            .find_by_guest_and_property(guest_id, property_id, Some(BookingStatus::Completed))
            .await?;
        Ok(!completed.is_empty())
    }

    async fn transition(
        &self,
        id: BookingId,
        action: BookingAction,
        requester: &Principal,
    ) -> Result<Booking, BookingError> {
        let (_guard, booking, property) = self.lock_booking(id).await?;

        let allowed = match action {
            BookingAction::Confirm | BookingAction::Complete => {
                AccessPolicy::can_manage_booking(requester, &property)
            }
            BookingAction::Cancel => AccessPolicy::can_cancel_booking(requester, &booking, &property),
        };
        if !allowed {
            return Err(BookingError::Forbidden(format!(
                "not allowed to {} this booking",
                action.as_str()
            )));
        }

        let next = BookingWorkflow::apply(booking.status, action)?;

        if action == BookingAction::Confirm {
            self.ensure_available(property.id, booking.stay(), Some(id))
                .await?;
        }

        match self
            .bookings
            .transition_status(id, booking.status, next)
            .await?
        {
            Some(saved) => Ok(saved),
            None => Err(self.stale_transition(id, next).await),
        }
    }

    /// Takes the property lock for a booking and re-reads it under the lock.
    async fn lock_booking(
        &self,
        id: BookingId,
    ) -> Result<(PropertyGuard<'_>, Booking, Property), BookingError> {
        let property_id = self.find_booking(id).await?.property_id;
        let guard = self.locks.acquire(property_id).await;
        let booking = self.find_booking(id).await?;
        let property = self.find_property(booking.property_id).await?;
        Ok((guard, booking, property))
    }

    async fn ensure_available(
        &self,
        property_id: PropertyId,
        stay: StayWindow,
        exclude: Option<BookingId>,
    ) -> Result<(), BookingError> {
        let clashes = self
            .bookings
            .find_confirmed_overlapping(property_id, stay, exclude)
            .await?;
        if clashes.is_empty() {
            Ok(())
        } else {
            Err(BookingError::AvailabilityConflict)
        }
    }

    async fn find_booking(&self, id: BookingId) -> Result<Booking, BookingError> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or(BookingError::BookingNotFound(id))
    }

    async fn find_property(&self, id: PropertyId) -> Result<Property, BookingError> {
        self.properties
            .find_one(id)
            .await?
            .ok_or(BookingError::PropertyNotFound(id))
    }

    /// Explains a lost compare-and-set on the details of a booking.
    async fn stale_edit(&self, id: BookingId) -> BookingError {
        match self.find_booking(id).await {
            Ok(now) => BookingError::NotEditable(now.status),
            Err(err) => err,
        }
    }

    /// Explains a lost compare-and-set on a status move.
    async fn stale_transition(&self, id: BookingId, to: BookingStatus) -> BookingError {
        match self.find_booking(id).await {
            Ok(now) => BookingError::InvalidTransition {
                from: now.status,
                to,
            },
            Err(err) => err,
        }
    }
}

fn authorize_view(
    requester: &Principal,
    booking: &Booking,
    property: &Property,
) -> Result<(), BookingError> {
    if AccessPolicy::can_view_booking(requester, booking, property) {
        Ok(())
    } else {
        Err(BookingError::Forbidden(
            "not a party to this booking".to_string(),
        ))
    }
}

fn check_capacity(guest_count: u32, property: &Property) -> Result<(), BookingError> {
    if guest_count == 0 || guest_count > property.max_guests {
        return Err(BookingError::CapacityExceeded {
            requested: guest_count,
            max: property.max_guests,
        });
    }
    Ok(())
}

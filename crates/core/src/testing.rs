//! In-memory stores and fixtures for service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;

use roomify_shared::types::{BookingId, PropertyId, ReviewId, UserId};

use crate::booking::stay::StayWindow;
use crate::booking::store::BookingStore;
use crate::booking::types::{Booking, BookingStatus};
use crate::persistence::PersistenceError;
use crate::property::{Property, PropertyCatalog, PropertyStatus};
use crate::review::store::ReviewStore;
use crate::review::types::{RatingTotals, Review};

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Active property at 100/night for up to four guests.
pub(crate) fn property_owned_by(owner_id: UserId) -> Property {
    Property {
        id: PropertyId::new(),
        owner_id,
        title: "Harbour View Loft".to_string(),
        price_per_night: dec!(100),
        max_guests: 4,
        status: PropertyStatus::Active,
    }
}

/// Pending four-night booking, 2025-03-10 to 2025-03-14.
pub(crate) fn booking_on(property: &Property, guest_id: UserId) -> Booking {
    let now = Utc::now();
    Booking {
        id: BookingId::new(),
        property_id: property.id,
        guest_id,
        check_in_date: date(2025, 3, 10),
        check_out_date: date(2025, 3, 14),
        guest_count: 2,
        total_price: dec!(400),
        status: BookingStatus::Pending,
        special_requests: None,
        is_paid: false,
        payment_intent_id: None,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn review_by(reviewer_id: UserId, property_id: PropertyId) -> Review {
    let now = Utc::now();
    Review {
        id: ReviewId::new(),
        property_id,
        reviewer_id,
        rating: 4,
        comment: "Lovely place".to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[derive(Default)]
pub(crate) struct MemoryProperties {
    properties: Mutex<HashMap<PropertyId, Property>>,
}

impl MemoryProperties {
    pub(crate) fn add(&self, property: Property) {
        self.properties
            .lock()
            .unwrap()
            .insert(property.id, property);
    }
}

impl PropertyCatalog for MemoryProperties {
    async fn find_one(&self, id: PropertyId) -> Result<Option<Property>, PersistenceError> {
        Ok(self.properties.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Property>, PersistenceError> {
        Ok(self
            .properties
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

/// Booking store that mirrors the database constraints: status writes are
/// compare-and-set and two confirmed stays on one property cannot overlap.
#[derive(Default)]
pub(crate) struct MemoryBookings {
    bookings: Mutex<HashMap<BookingId, Booking>>,
}

impl MemoryBookings {
    pub(crate) fn add(&self, booking: Booking) {
        self.bookings.lock().unwrap().insert(booking.id, booking);
    }

    pub(crate) fn get(&self, id: BookingId) -> Option<Booking> {
        self.bookings.lock().unwrap().get(&id).cloned()
    }

    /// Overwrite a stored status, simulating another process.
    pub(crate) fn force_status(&self, id: BookingId, status: BookingStatus) {
        if let Some(b) = self.bookings.lock().unwrap().get_mut(&id) {
            b.status = status;
        }
    }

    pub(crate) fn confirmed_count(&self, property_id: PropertyId) -> usize {
        self.bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.property_id == property_id && b.status == BookingStatus::Confirmed)
            .count()
    }

    fn filtered(&self, keep: impl Fn(&Booking) -> bool) -> Vec<Booking> {
        let mut out: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| keep(b))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }
}

impl BookingStore for MemoryBookings {
    async fn insert(&self, booking: Booking) -> Result<Booking, PersistenceError> {
        self.add(booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, PersistenceError> {
        Ok(self.get(id))
    }

    async fn list_all(&self) -> Result<Vec<Booking>, PersistenceError> {
        Ok(self.filtered(|_| true))
    }

    async fn list_by_guest(&self, guest_id: UserId) -> Result<Vec<Booking>, PersistenceError> {
        Ok(self.filtered(|b| b.guest_id == guest_id))
    }

    async fn list_by_properties(
        &self,
        property_ids: Vec<PropertyId>,
    ) -> Result<Vec<Booking>, PersistenceError> {
        Ok(self.filtered(|b| property_ids.contains(&b.property_id)))
    }

    async fn list_by_guest_and_property(
        &self,
        guest_id: UserId,
        property_id: PropertyId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, PersistenceError> {
        Ok(self.filtered(|b| {
            b.guest_id == guest_id
                && b.property_id == property_id
                && status.is_none_or(|s| b.status == s)
        }))
    }

    async fn find_confirmed_overlapping(
        &self,
        property_id: PropertyId,
        stay: StayWindow,
        exclude: Option<BookingId>,
    ) -> Result<Vec<Booking>, PersistenceError> {
        Ok(self.filtered(|b| {
            b.property_id == property_id
                && b.status == BookingStatus::Confirmed
                && Some(b.id) != exclude
                && b.stay().overlaps(&stay)
        }))
    }

    async fn update_details(
        &self,
        booking: Booking,
        expected_status: BookingStatus,
    ) -> Result<Option<Booking>, PersistenceError> {
        let mut guard = self.bookings.lock().unwrap();
        match guard.get_mut(&booking.id) {
            Some(stored) if stored.status == expected_status => {
                *stored = booking.clone();
                Ok(Some(booking))
            }
            _ => Ok(None),
        }
    }

    async fn transition_status(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<Option<Booking>, PersistenceError> {
        let mut guard = self.bookings.lock().unwrap();
        let Some(current) = guard.get(&id).cloned() else {
            return Ok(None);
        };
        if current.status != from {
            return Ok(None);
        }
        if to == BookingStatus::Confirmed
            && guard.values().any(|b| {
                b.id != id
                    && b.property_id == current.property_id
                    && b.status == BookingStatus::Confirmed
                    && b.stay().overlaps(&current.stay())
            })
        {
            return Err(PersistenceError::OverlapViolation);
        }
        let stored = guard.get_mut(&id).unwrap();
        stored.status = to;
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: BookingId) -> Result<bool, PersistenceError> {
        Ok(self.bookings.lock().unwrap().remove(&id).is_some())
    }
}

/// Review store with the (reviewer, property) uniqueness rule.
#[derive(Default)]
pub(crate) struct MemoryReviews {
    reviews: Mutex<HashMap<ReviewId, Review>>,
}

impl MemoryReviews {
    fn filtered(&self, keep: impl Fn(&Review) -> bool) -> Vec<Review> {
        let mut out: Vec<Review> = self
            .reviews
            .lock()
            .unwrap()
            .values()
            .filter(|r| keep(r))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }
}

impl ReviewStore for MemoryReviews {
    async fn insert(&self, review: Review) -> Result<Review, PersistenceError> {
        let mut guard = self.reviews.lock().unwrap();
        if guard
            .values()
            .any(|r| r.reviewer_id == review.reviewer_id && r.property_id == review.property_id)
        {
            return Err(PersistenceError::UniqueViolation(
                "reviews_reviewer_property_key".to_string(),
            ));
        }
        guard.insert(review.id, review.clone());
        Ok(review)
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, PersistenceError> {
        Ok(self.reviews.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_reviewer_and_property(
        &self,
        reviewer_id: UserId,
        property_id: PropertyId,
    ) -> Result<Option<Review>, PersistenceError> {
        Ok(self
            .filtered(|r| r.reviewer_id == reviewer_id && r.property_id == property_id)
            .into_iter()
            .next())
    }

    async fn list_by_property(&self, property_id: PropertyId) -> Result<Vec<Review>, PersistenceError> {
        Ok(self.filtered(|r| r.property_id == property_id))
    }

    async fn list_by_reviewer(&self, reviewer_id: UserId) -> Result<Vec<Review>, PersistenceError> {
        Ok(self.filtered(|r| r.reviewer_id == reviewer_id))
    }

    async fn update(&self, review: Review) -> Result<Option<Review>, PersistenceError> {
        let mut guard = self.reviews.lock().unwrap();
        match guard.get_mut(&review.id) {
            Some(stored) => {
                stored.rating = review.rating;
                stored.comment.clone_from(&review.comment);
                stored.updated_at = review.updated_at;
                Ok(Some(stored.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: ReviewId) -> Result<bool, PersistenceError> {
        Ok(self.reviews.lock().unwrap().remove(&id).is_some())
    }

    async fn rating_totals(&self, property_id: PropertyId) -> Result<RatingTotals, PersistenceError> {
        let reviews = self.filtered(|r| r.property_id == property_id);
        Ok(RatingTotals {
            review_count: reviews.len() as u64,
            rating_sum: reviews.iter().map(|r| u64::from(r.rating)).sum(),
        })
    }
}

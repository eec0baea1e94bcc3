//! ReviewGate service tests against in-memory stores.

use std::sync::Arc;

use rust_decimal_macros::dec;

use roomify_shared::types::{ReviewId, UserId};

use crate::access::Principal;
use crate::booking::ledger::BookingLedger;
use crate::booking::types::BookingStatus;
use crate::clock::FixedClock;
use crate::property::Property;
use crate::review::error::ReviewError;
use crate::review::gate::ReviewGate;
use crate::review::types::{CreateReviewInput, UpdateReviewInput};
use crate::testing::{
    MemoryBookings, MemoryProperties, MemoryReviews, booking_on, date, property_owned_by,
};

struct Fixture {
    gate: ReviewGate<MemoryReviews, MemoryBookings, MemoryProperties>,
    bookings: Arc<MemoryBookings>,
    property: Property,
    host: Principal,
    guest: Principal,
}

fn fixture() -> Fixture {
    let bookings = Arc::new(MemoryBookings::default());
    let properties = Arc::new(MemoryProperties::default());
    let host = Principal::host(UserId::new());
    let property = property_owned_by(host.id);
    properties.add(property.clone());

    let ledger = Arc::new(BookingLedger::with_clock(
        Arc::clone(&bookings),
        Arc::clone(&properties),
        Arc::new(FixedClock(date(2025, 3, 1))),
    ));
    let gate = ReviewGate::new(Arc::new(MemoryReviews::default()), ledger, properties);

    Fixture {
        gate,
        bookings,
        property,
        host,
        guest: Principal::guest(UserId::new()),
    }
}

impl Fixture {
    fn complete_stay(&self, guest: &Principal) {
        let mut booking = booking_on(&self.property, guest.id);
        booking.status = BookingStatus::Completed;
        self.bookings.add(booking);
    }

    fn input(&self, rating: u8, comment: &str) -> CreateReviewInput {
        CreateReviewInput {
            property_id: self.property.id,
            rating,
            comment: comment.to_string(),
        }
    }
}

#[tokio::test]
async fn test_review_requires_completed_stay() {
    let f = fixture();

    let err = f
        .gate
        .create_review(f.input(5, "Great"), &f.guest)
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::Forbidden(_)));

    // A confirmed but not completed stay is not enough.
    let mut booking = booking_on(&f.property, f.guest.id);
    booking.status = BookingStatus::Confirmed;
    f.bookings.add(booking);
    assert!(f.gate.create_review(f.input(5, "Great"), &f.guest).await.is_err());

    f.complete_stay(&f.guest);
    let review = f
        .gate
        .create_review(f.input(5, "  Great  "), &f.guest)
        .await
        .unwrap();
    assert_eq!(review.reviewer_id, f.guest.id);
    assert_eq!(review.comment, "Great");
}

#[tokio::test]
async fn test_admin_reviews_without_stay() {
    let f = fixture();
    let admin = Principal::admin(UserId::new());
    assert!(f.gate.create_review(f.input(3, "Audit"), &admin).await.is_ok());
}

#[tokio::test]
async fn test_one_review_per_guest_and_property() {
    let f = fixture();
    f.complete_stay(&f.guest);
    f.gate
        .create_review(f.input(4, "Nice"), &f.guest)
        .await
        .unwrap();

    let err = f
        .gate
        .create_review(f.input(2, "Changed my mind"), &f.guest)
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::DuplicateReview));
    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn test_rejects_bad_rating_and_blank_comment() {
    let f = fixture();
    f.complete_stay(&f.guest);

    assert!(matches!(
        f.gate.create_review(f.input(0, "Meh"), &f.guest).await,
        Err(ReviewError::InvalidRating(0))
    ));
    assert!(matches!(
        f.gate.create_review(f.input(6, "Wow"), &f.guest).await,
        Err(ReviewError::InvalidRating(6))
    ));
    assert!(matches!(
        f.gate.create_review(f.input(4, "   "), &f.guest).await,
        Err(ReviewError::EmptyComment)
    ));
}

#[tokio::test]
async fn test_update_and_remove_permissions() {
    let f = fixture();
    f.complete_stay(&f.guest);
    let review = f
        .gate
        .create_review(f.input(4, "Nice"), &f.guest)
        .await
        .unwrap();

    let patch = UpdateReviewInput {
        rating: Some(2),
        ..Default::default()
    };
    assert!(matches!(
        f.gate.update_review(review.id, patch.clone(), &f.host).await,
        Err(ReviewError::Forbidden(_))
    ));
    let updated = f.gate.update_review(review.id, patch, &f.guest).await.unwrap();
    assert_eq!(updated.rating, 2);
    assert_eq!(updated.comment, "Nice");

    let blank = UpdateReviewInput {
        comment: Some(String::new()),
        ..Default::default()
    };
    assert!(matches!(
        f.gate.update_review(review.id, blank, &f.guest).await,
        Err(ReviewError::EmptyComment)
    ));

    let stranger = Principal::guest(UserId::new());
    assert!(matches!(
        f.gate.remove_review(review.id, &stranger).await,
        Err(ReviewError::Forbidden(_))
    ));
    // The property owner may remove reviews of their listing.
    f.gate.remove_review(review.id, &f.host).await.unwrap();
    assert!(matches!(
        f.gate.get_review(review.id).await,
        Err(ReviewError::ReviewNotFound(_))
    ));
}

#[tokio::test]
async fn test_rating_and_listing() {
    let f = fixture();
    let empty = f.gate.property_rating(f.property.id).await.unwrap();
    assert_eq!(empty.average_rating, dec!(0));
    assert_eq!(empty.review_count, 0);

    let mut reviewers = Vec::new();
    for rating in [5u8, 4, 4] {
        let guest = Principal::guest(UserId::new());
        f.complete_stay(&guest);
        f.gate
            .create_review(f.input(rating, "Stayed here"), &guest)
            .await
            .unwrap();
        reviewers.push(guest);
    }

    let rating = f.gate.property_rating(f.property.id).await.unwrap();
    assert_eq!(rating.average_rating, dec!(4.3));
    assert_eq!(rating.review_count, 3);

    assert_eq!(f.gate.list_reviews(f.property.id).await.unwrap().len(), 3);
    let mine = f.gate.list_reviews_by_user(reviewers[0].id).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].rating, 5);
}

#[tokio::test]
async fn test_missing_review_and_property() {
    let f = fixture();
    assert!(matches!(
        f.gate.get_review(ReviewId::new()).await,
        Err(ReviewError::ReviewNotFound(_))
    ));

    let mut input = f.input(5, "Ghost");
    input.property_id = property_owned_by(f.host.id).id;
    assert!(matches!(
        f.gate.create_review(input, &f.guest).await,
        Err(ReviewError::PropertyNotFound(_))
    ));
}

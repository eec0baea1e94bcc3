//! Integration tests for the booking repository.

mod common;

use std::sync::Arc;

use roomify_core::access::Role;
use roomify_core::booking::{
    BookingError, BookingLedger, BookingStatus, BookingStore, CreateBookingInput, StayWindow,
};
use roomify_core::clock::FixedClock;
use roomify_core::persistence::PersistenceError;
use roomify_db::{BookingRepository, PropertyRepository};

use common::{booking, date, property, setup, user};

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_insert_and_find() {
    let db = setup().await;
    let host = user(&db, Role::Host).await;
    let guest = user(&db, Role::Guest).await;
    let property = property(&db, &host).await;
    let repo = BookingRepository::new(db.clone());

    let new = booking(&property, &guest, date(2031, 5, 1), date(2031, 5, 4), BookingStatus::Pending);
    let saved = repo.insert(new.clone()).await.expect("insert");
    assert_eq!(saved.id, new.id);
    assert_eq!(saved.status, BookingStatus::Pending);

    let found = repo.find_by_id(new.id).await.expect("find").expect("exists");
    assert_eq!(found.check_in_date, date(2031, 5, 1));
    assert_eq!(found.total_price, new.total_price);

    let mine = repo.list_by_guest(guest.id).await.expect("list");
    assert_eq!(mine.len(), 1);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_transition_is_compare_and_set() {
    let db = setup().await;
    let host = user(&db, Role::Host).await;
    let guest = user(&db, Role::Guest).await;
    let property = property(&db, &host).await;
    let repo = BookingRepository::new(db.clone());

    let b = repo
        .insert(booking(&property, &guest, date(2031, 6, 1), date(2031, 6, 3), BookingStatus::Pending))
        .await
        .expect("insert");

    let moved = repo
        .transition_status(b.id, BookingStatus::Pending, BookingStatus::Cancelled)
        .await
        .expect("update");
    assert_eq!(moved.map(|m| m.status), Some(BookingStatus::Cancelled));

    // Second writer still believes the booking is pending.
    let stale = repo
        .transition_status(b.id, BookingStatus::Pending, BookingStatus::Confirmed)
        .await
        .expect("update");
    assert!(stale.is_none());
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_exclusion_constraint_rejects_overlapping_confirmed() {
    let db = setup().await;
    let host = user(&db, Role::Host).await;
    let guest = user(&db, Role::Guest).await;
    let property = property(&db, &host).await;
    let repo = BookingRepository::new(db.clone());

    repo.insert(booking(&property, &guest, date(2031, 7, 1), date(2031, 7, 5), BookingStatus::Confirmed))
        .await
        .expect("first confirmed");

    // Back-to-back is allowed.
    repo.insert(booking(&property, &guest, date(2031, 7, 5), date(2031, 7, 7), BookingStatus::Confirmed))
        .await
        .expect("adjacent confirmed");

    let err = repo
        .insert(booking(&property, &guest, date(2031, 7, 3), date(2031, 7, 6), BookingStatus::Confirmed))
        .await
        .unwrap_err();
    assert_eq!(err, PersistenceError::OverlapViolation);

    let overlapping = repo
        .find_confirmed_overlapping(
            property.id,
            StayWindow::new(date(2031, 7, 4), date(2031, 7, 6)).unwrap(),
            None,
        )
        .await
        .expect("query");
    assert_eq!(overlapping.len(), 2);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_concurrent_confirms_through_ledger() {
    let db = setup().await;
    let host = user(&db, Role::Host).await;
    let property = property(&db, &host).await;

    let ledger = Arc::new(BookingLedger::with_clock(
        Arc::new(BookingRepository::new(db.clone())),
        Arc::new(PropertyRepository::new(db.clone())),
        Arc::new(FixedClock(date(2031, 1, 1))),
    ));

    let mut ids = Vec::new();
    for offset in 0..5 {
        let guest = user(&db, Role::Guest).await;
        let b = ledger
            .create_booking(
                CreateBookingInput {
                    property_id: property.id,
                    check_in_date: date(2031, 8, 1 + offset),
                    check_out_date: date(2031, 8, 10),
                    guest_count: 1,
                    special_requests: None,
                },
                &guest,
            )
            .await
            .expect("create");
        ids.push(b.id);
    }

    let results = futures::future::join_all(ids.iter().map(|id| {
        let ledger = Arc::clone(&ledger);
        async move { ledger.confirm_booking(*id, &host).await }
    }))
    .await;

    let confirmed = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(BookingError::AvailabilityConflict)))
        .count();
    assert_eq!(confirmed, 1);
    assert_eq!(conflicts, 4);
}

//! Integration tests for the PostgreSQL offering store.
//!
//! Run with `DATABASE_URL` pointing at a scratch database:
//! `cargo test --test postgres_test -- --ignored`

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;

use oceandive_booking::store::{OfferingStore, PostgresOfferingStore, ReleaseOutcome, ReserveOutcome};
use oceandive_booking::{BookingError, BookingReferenceGenerator, BookingService, EligibilityStrategy};
use oceandive_core::ErrorKind;
use oceandive_core::config::ReferenceConfig;
use oceandive_core::types::OfferingId;
use oceandive_database::repositories::{BookingRecordRepository, CounterMutation, OfferingRepository};
use oceandive_entity::certification::CertificationLevel;
use oceandive_entity::offering::{Offering, PublicationStatus};

use helpers::{guest, test_pool};

const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_row_locked_reserve_and_release() {
    let pool = test_pool().await;
    let repo = Arc::new(OfferingRepository::new(pool));
    let offering = repo.create(&Offering::trip("Pg Reef", 1, None)).await.unwrap();
    let store = PostgresOfferingStore::new(Arc::clone(&repo), LOCK_TIMEOUT);

    assert!(matches!(store.try_reserve(offering.id).await.unwrap(), ReserveOutcome::Reserved(o) if o.current_bookings == 1));
    assert!(matches!(store.try_reserve(offering.id).await.unwrap(), ReserveOutcome::Full(_)));
    assert!(matches!(store.try_release(offering.id).await.unwrap(), ReleaseOutcome::Released(o) if o.current_bookings == 0));
    assert!(matches!(store.try_release(offering.id).await.unwrap(), ReleaseOutcome::Empty(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_bookings_against_database() {
    let pool = test_pool().await;
    let repo = Arc::new(OfferingRepository::new(pool));
    let offering = repo.create(&Offering::trip("Pg Race", 3, None)).await.unwrap();
    let service = Arc::new(BookingService::new(
        Arc::new(PostgresOfferingStore::new(Arc::clone(&repo), LOCK_TIMEOUT)),
        EligibilityStrategy::default(),
        BookingReferenceGenerator::new(),
        ReferenceConfig::default(),
    ));

    let mut tasks = JoinSet::new();
    for n in 0..16 {
        let service = Arc::clone(&service);
        let id = offering.id;
        tasks.spawn(async move { service.book(id, &guest(&format!("Pg{n}"), None)).await });
    }

    let mut booked = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined.unwrap() {
            Ok(_) => booked += 1,
            Err(BookingError::CapacityExceeded) => {}
            Err(other) => panic!("Unexpected booking error: {other}"),
        }
    }
    assert_eq!(booked, 3);

    let stored = repo.find_by_id(offering.id).await.unwrap().unwrap();
    assert_eq!(stored.current_bookings, 3);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_capacity_and_status_updates() {
    let pool = test_pool().await;
    let repo = OfferingRepository::new(pool);
    let offering = repo
        .create(&Offering::course("Open Water", 4, None).with_current_bookings(2))
        .await
        .unwrap();
    assert_eq!(offering.provided_certification, Some(CertificationLevel::OpenWater));

    let err = repo.update_capacity(offering.id, 1, LOCK_TIMEOUT).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(err.message.contains("2 spots are already booked"), "{}", err.message);
    let updated = repo.update_capacity(offering.id, 6, LOCK_TIMEOUT).await.unwrap().unwrap();
    assert_eq!(updated.capacity, 6);
    assert!(repo.update_capacity(OfferingId::new(), 6, LOCK_TIMEOUT).await.unwrap().is_none());

    let archived = repo
        .update_status(offering.id, PublicationStatus::Archived)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(archived.status, PublicationStatus::Archived);
    assert!(matches!(repo.try_increment(offering.id, LOCK_TIMEOUT).await.unwrap(), CounterMutation::Rejected(_)));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_booking_records_round_trip() {
    let pool = test_pool().await;
    let offerings = OfferingRepository::new(pool.clone());
    let records = BookingRecordRepository::new(pool);
    let offering = offerings.create(&Offering::trip("Pg Records", 2, None)).await.unwrap();

    let record = oceandive_entity::booking::BookingRecord::new(
        format!("PGRECORDS_ANA_{}", offering.id.as_uuid().simple()),
        offering.id,
        "Ana",
    );
    assert!(records.insert(&record).await.unwrap());
    assert!(!records.insert(&record).await.unwrap());
    assert_eq!(records.find_by_offering(offering.id).await.unwrap().len(), 1);

    let deleted = records.delete_by_reference(&record.reference).await.unwrap();
    assert_eq!(deleted.map(|r| r.holder_name), Some("Ana".to_string()));
    assert!(records.find_by_reference(&record.reference).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_same_named_offerings_never_share_a_stored_reference() {
    let pool = test_pool().await;
    let repo = Arc::new(OfferingRepository::new(pool.clone()));
    let records = BookingRecordRepository::new(pool);
    let first = repo.create(&Offering::trip("Pg Twin", 2, None)).await.unwrap();
    let second = repo.create(&Offering::trip("Pg Twin", 2, None)).await.unwrap();

    // Same seed: the second service draws the first service's reference first.
    let service = |seed| {
        BookingService::new(
            Arc::new(PostgresOfferingStore::new(Arc::clone(&repo), LOCK_TIMEOUT)),
            EligibilityStrategy::default(),
            BookingReferenceGenerator::seeded(seed),
            ReferenceConfig::default(),
        )
    };
    let a = service(21)
        .book_recorded(first.id, &guest("Ana", None), &records)
        .await
        .unwrap();
    let b = service(21)
        .book_recorded(second.id, &guest("Ana", None), &records)
        .await
        .unwrap();
    assert_ne!(a.reference, b.reference);

    assert_eq!(records.find_by_offering(second.id).await.unwrap().len(), 1);
    assert_eq!(repo.find_by_id(second.id).await.unwrap().unwrap().current_bookings, 1);

    let snapshot = service(22).cancel_recorded(&b.reference, &records).await.unwrap();
    assert_eq!(snapshot.current_bookings, 0);
    assert!(records.find_by_reference(&b.reference).await.unwrap().is_none());
    assert!(records.find_by_reference(&a.reference).await.unwrap().is_some());
}

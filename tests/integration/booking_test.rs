//! Integration tests for booking, release, and cancellation.

mod helpers;

use regex::Regex;

use oceandive_booking::{BookingError, ReleaseError};
use oceandive_entity::certification::CertificationLevel::*;
use oceandive_entity::offering::{CapacityState, Offering, PublicationStatus};

use helpers::{TestEngine, guest, premium};

#[tokio::test]
async fn test_capacity_two_scenario() {
    let engine = TestEngine::new();
    let id = engine.add(Offering::trip("Red Sea Trip", 2, Some(OpenWater)).with_current_bookings(1));

    let err = engine
        .service
        .book(id, &guest("Noa", Some(NonDiver)))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::EligibilityFailure(_)));
    assert_eq!(engine.bookings(id).await, 1);

    let record = engine
        .service
        .book(id, &premium("Ana", Some(OpenWater)))
        .await
        .unwrap();
    assert!(Regex::new(r"^REDSEATRIP_ANA_\d{3}$").unwrap().is_match(&record.reference));
    assert_eq!(engine.bookings(id).await, 2);

    let err = engine
        .service
        .book(id, &premium("Kai", Some(Instructor)))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::CapacityExceeded));
    assert_eq!(engine.bookings(id).await, 2);
}

#[tokio::test]
async fn test_already_certified_course_rejected() {
    let engine = TestEngine::new();
    let id = engine.add(Offering::course("Open Water", 8, None));

    let err = engine
        .service
        .book(id, &guest("Ana", Some(AdvancedOpenWater)))
        .await
        .unwrap_err();
    match err {
        BookingError::EligibilityFailure(message) => {
            assert!(message.contains("already holds this certification or higher"));
        }
        other => panic!("Expected eligibility failure, got {other:?}"),
    }
    assert_eq!(engine.bookings(id).await, 0);
}

#[tokio::test]
async fn test_eligibility_message_names_both_levels() {
    let engine = TestEngine::new();
    let id = engine.add(Offering::trip("Deep Wall", 4, Some(AdvancedOpenWater)));

    let err = engine
        .service
        .book(id, &guest("Ana", Some(OpenWater)))
        .await
        .unwrap_err();
    let message = err.to_string();
    let holder_at = message.find("Open Water").unwrap();
    let required_at = message.find("Advanced Open Water").unwrap();
    assert!(holder_at < required_at, "{message}");
}

#[tokio::test]
async fn test_holder_kinds_share_one_path() {
    let engine = TestEngine::new();
    let id = engine.add(Offering::trip("Blue Hole", 4, Some(OpenWater)));

    let a = engine.service.book(id, &guest("Ana", Some(OpenWater))).await.unwrap();
    let b = engine.service.book(id, &premium("Ana", Some(OpenWater))).await.unwrap();
    assert!(a.reference.starts_with("BLUEHOLE_ANA_"));
    assert!(b.reference.starts_with("BLUEHOLE_ANA_"));
    assert_ne!(a.reference, b.reference);
    assert_eq!(engine.bookings(id).await, 2);
}

#[tokio::test]
async fn test_release_never_goes_negative() {
    let engine = TestEngine::new();
    let id = engine.add(Offering::trip("Blue Hole", 1, None));

    assert!(matches!(
        engine.service.release(id).await.unwrap_err(),
        ReleaseError::NothingToRelease
    ));
    assert_eq!(engine.bookings(id).await, 0);

    engine.service.book(id, &guest("Ana", None)).await.unwrap();
    let snapshot = engine.service.release(id).await.unwrap();
    assert_eq!(snapshot.current_bookings, 0);
    assert_eq!(snapshot.state, CapacityState::Open);
    assert!(engine.service.release(id).await.is_err());
}

#[tokio::test]
async fn test_archived_offering_blocks_booking_but_allows_release() {
    let engine = TestEngine::new();
    let id = engine.add(Offering::trip("Blue Hole", 3, None).with_current_bookings(2));
    engine.store.set_status(id, PublicationStatus::Archived).await.unwrap();

    let err = engine.service.book(id, &guest("Ana", None)).await.unwrap_err();
    assert!(matches!(err, BookingError::NotBookable(PublicationStatus::Archived)));

    let snapshot = engine.service.release(id).await.unwrap();
    assert_eq!(snapshot.current_bookings, 1);
    assert_eq!(snapshot.state, CapacityState::Archived);
}

#[tokio::test]
async fn test_cancel_by_reference() {
    let engine = TestEngine::new();
    let id = engine.add(Offering::trip("Blue Hole", 1, None));

    let record = engine.service.book(id, &guest("Ana", None)).await.unwrap();
    assert!(engine.service.book(id, &guest("Liam", None)).await.is_err());

    engine.service.cancel(&record.reference).await.unwrap();
    assert_eq!(engine.bookings(id).await, 0);
    engine.service.book(id, &guest("Liam", None)).await.unwrap();
}

#[tokio::test]
async fn test_raised_capacity_reopens_offering() {
    let engine = TestEngine::new();
    let id = engine.add(Offering::trip("Blue Hole", 1, None).with_current_bookings(1));

    assert!(matches!(
        engine.service.book(id, &guest("Ana", None)).await.unwrap_err(),
        BookingError::CapacityExceeded
    ));
    engine.store.set_capacity(id, 2).await.unwrap();
    engine.service.book(id, &guest("Ana", None)).await.unwrap();
    assert!(engine.store.set_capacity(id, 1).await.is_err());
}

//! Integration tests for concurrent booking on a shared offering.

mod helpers;

use std::sync::Arc;

use tokio::task::JoinSet;

use oceandive_booking::BookingError;
use oceandive_entity::offering::Offering;

use helpers::{TestEngine, guest};

async fn race(engine: Arc<TestEngine>, offering: Offering, callers: usize) -> (usize, usize) {
    let id = engine.add(offering);
    let mut tasks = JoinSet::new();

    for n in 0..callers {
        let engine = Arc::clone(&engine);
        tasks.spawn(async move {
            engine
                .service
                .book(id, &guest(&format!("Diver{n}"), None))
                .await
        });
    }

    let (mut booked, mut full) = (0, 0);
    while let Some(joined) = tasks.join_next().await {
        match joined.unwrap() {
            Ok(_) => booked += 1,
            Err(BookingError::CapacityExceeded) => full += 1,
            Err(other) => panic!("Unexpected booking error: {other}"),
        }
    }
    (booked, full)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_last_spot_goes_to_exactly_one_caller() {
    let engine = Arc::new(TestEngine::new());
    let offering = Offering::trip("Last Spot", 1, None);
    let id = offering.id;

    let (booked, full) = race(Arc::clone(&engine), offering, 64).await;
    assert_eq!(booked, 1);
    assert_eq!(full, 63);
    assert_eq!(engine.bookings(id).await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_counter_never_exceeds_capacity() {
    let engine = Arc::new(TestEngine::new());
    let offering = Offering::course("Night Dive Speciality", 10, None);
    let id = offering.id;

    let (booked, full) = race(Arc::clone(&engine), offering, 100).await;
    assert_eq!(booked, 10);
    assert_eq!(full, 90);
    assert_eq!(engine.bookings(id).await, 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_release_stops_at_zero() {
    let engine = Arc::new(TestEngine::new());
    let id = engine.add(Offering::trip("Release Race", 10, None).with_current_bookings(5));

    let mut tasks = JoinSet::new();
    for _ in 0..20 {
        let engine = Arc::clone(&engine);
        tasks.spawn(async move { engine.service.release(id).await.is_ok() });
    }

    let mut released = 0;
    while let Some(joined) = tasks.join_next().await {
        if joined.unwrap() {
            released += 1;
        }
    }
    assert_eq!(released, 5);
    assert_eq!(engine.bookings(id).await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_offerings_do_not_contend() {
    let engine = Arc::new(TestEngine::new());
    let a = Offering::trip("Reef A", 3, None);
    let b = Offering::trip("Reef B", 3, None);
    let (a_id, b_id) = (a.id, b.id);

    let (first, second) = tokio::join!(
        race(Arc::clone(&engine), a, 10),
        race(Arc::clone(&engine), b, 10)
    );
    assert_eq!(first, (3, 7));
    assert_eq!(second, (3, 7));
    assert_eq!(engine.bookings(a_id).await, 3);
    assert_eq!(engine.bookings(b_id).await, 3);
}

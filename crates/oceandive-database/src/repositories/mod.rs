//! Concrete repository implementations.

pub mod booking;
pub mod offering;

pub use booking::BookingRecordRepository;
pub use offering::{CounterMutation, OfferingRepository};

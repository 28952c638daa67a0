//! Booking record entities.

pub mod model;

pub use model::BookingRecord;

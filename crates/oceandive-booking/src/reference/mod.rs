//! Booking reference issuance.

pub mod generator;
pub mod registry;

pub use generator::BookingReferenceGenerator;
pub use registry::ReferenceRegistry;

//! # oceandive-booking
//!
//! The booking and eligibility engine: certification eligibility strategies,
//! booking reference synthesis, offering stores with an indivisible
//! check-and-increment, and the [`BookingService`] that orchestrates them.

pub mod eligibility;
pub mod error;
pub mod reference;
pub mod service;
pub mod store;

pub use eligibility::{EligibilityStrategy, EligibilityValidator, ValidationResult};
pub use error::{BookingError, ReleaseError};
pub use reference::{BookingReferenceGenerator, ReferenceRegistry};
pub use service::BookingService;
pub use store::{BookingRecordStore, OfferingStore, OfferingStoreDispatch};

//! Certification holders: anything that can book an offering.

pub mod model;

pub use model::{CertificationHolder, Customer, CustomerKind, GuestUser, PremiumUser};

//! Bookable offering entities (courses and trips).

pub mod capacity;
pub mod kind;
pub mod model;
pub mod request;
pub mod status;

pub use capacity::{CapacitySnapshot, CapacityState};
pub use kind::OfferingKind;
pub use model::Offering;
pub use request::{CreateOffering, UpdateCapacity};
pub use status::PublicationStatus;

//! Capacity state of an offering.

use serde::{Deserialize, Serialize};
use std::fmt;

use oceandive_core::types::OfferingId;

/// Conceptual booking state derived from the counter and publication status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityState {
    /// `current_bookings < capacity`.
    Open,
    /// `current_bookings == capacity`.
    Full,
    /// Excluded from new bookings regardless of the counter.
    Archived,
}

impl fmt::Display for CapacityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Full => write!(f, "full"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

/// Point-in-time view of an offering's capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacitySnapshot {
    /// The offering.
    pub offering_id: OfferingId,
    /// Total spots.
    pub capacity: i32,
    /// Spots taken.
    pub current_bookings: i32,
    /// Spots left.
    pub available_spots: i32,
    /// Derived state.
    pub state: CapacityState,
}

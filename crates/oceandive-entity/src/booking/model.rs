//! Booking record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use oceandive_core::types::OfferingId;

/// The outcome of one successful booking. Created exactly once and never
/// mutated; only an administrative cancellation removes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BookingRecord {
    /// Human-readable booking code.
    pub reference: String,
    /// The offering that was booked.
    pub offering_id: OfferingId,
    /// First name of the certification holder.
    pub holder_name: String,
    /// When the reference was issued.
    pub issued_at: DateTime<Utc>,
}

impl BookingRecord {
    /// Create a record issued now.
    pub fn new(
        reference: impl Into<String>,
        offering_id: OfferingId,
        holder_name: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            offering_id,
            holder_name: holder_name.into(),
            issued_at: Utc::now(),
        }
    }
}

//! Offering entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use oceandive_core::error::AppError;
use oceandive_core::result::AppResult;
use oceandive_core::types::OfferingId;

use super::capacity::{CapacitySnapshot, CapacityState};
use super::kind::OfferingKind;
use super::status::PublicationStatus;
use crate::certification::CertificationLevel;

/// A capacity-bounded bookable item.
///
/// Invariant: `0 <= current_bookings <= capacity` and `capacity >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Offering {
    /// Unique offering identifier.
    pub id: OfferingId,
    /// Course or trip.
    pub kind: OfferingKind,
    /// Course name or trip location; used to build booking references.
    pub name: String,
    /// Total number of spots.
    pub capacity: i32,
    /// Number of spots currently booked.
    pub current_bookings: i32,
    /// Prerequisite level; `None` means anyone may book.
    pub min_certification_required: Option<CertificationLevel>,
    /// Level this offering confers on completion, if any.
    pub provided_certification: Option<CertificationLevel>,
    /// Catalog publication status.
    pub status: PublicationStatus,
    /// When the offering was created.
    pub created_at: DateTime<Utc>,
    /// When the offering was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Offering {
    /// Create a published offering with no bookings.
    pub fn new(
        kind: OfferingKind,
        name: impl Into<String>,
        capacity: i32,
        min_certification_required: Option<CertificationLevel>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: OfferingId::new(),
            kind,
            name: name.into(),
            capacity,
            current_bookings: 0,
            min_certification_required,
            provided_certification: None,
            status: PublicationStatus::Published,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a course. A course whose name names a certification level
    /// (e.g. "Open Water") provides that level.
    pub fn course(
        name: impl Into<String>,
        capacity: i32,
        min_certification_required: Option<CertificationLevel>,
    ) -> Self {
        let mut offering = Self::new(
            OfferingKind::Course,
            name,
            capacity,
            min_certification_required,
        );
        offering.provided_certification = CertificationLevel::from_display_name(&offering.name).ok();
        offering
    }

    /// Create a trip. Trips never provide a certification.
    pub fn trip(
        location: impl Into<String>,
        capacity: i32,
        min_certification_required: Option<CertificationLevel>,
    ) -> Self {
        Self::new(
            OfferingKind::Trip,
            location,
            capacity,
            min_certification_required,
        )
    }

    /// Override the provided certification.
    pub fn with_provided_certification(mut self, level: Option<CertificationLevel>) -> Self {
        self.provided_certification = level;
        self
    }

    /// Override the current booking counter.
    pub fn with_current_bookings(mut self, current_bookings: i32) -> Self {
        self.current_bookings = current_bookings;
        self
    }

    /// Override the publication status.
    pub fn with_status(mut self, status: PublicationStatus) -> Self {
        self.status = status;
        self
    }

    /// Check whether every spot is taken.
    pub fn is_fully_booked(&self) -> bool {
        self.current_bookings >= self.capacity
    }

    /// Number of spots still free (never negative).
    pub fn available_spots(&self) -> i32 {
        (self.capacity - self.current_bookings).max(0)
    }

    /// Share of capacity booked, as a percentage.
    pub fn booking_percentage(&self) -> f64 {
        if self.capacity <= 0 {
            return 0.0;
        }
        f64::from(self.current_bookings) * 100.0 / f64::from(self.capacity)
    }

    /// Derive the conceptual capacity state.
    pub fn capacity_state(&self) -> CapacityState {
        if self.status == PublicationStatus::Archived {
            CapacityState::Archived
        } else if self.is_fully_booked() {
            CapacityState::Full
        } else {
            CapacityState::Open
        }
    }

    /// Whether a new booking could be accepted right now.
    pub fn is_bookable(&self) -> bool {
        self.status.accepts_bookings() && !self.is_fully_booked()
    }

    /// Short availability label for listings.
    pub fn availability_label(&self) -> &'static str {
        if !self.status.is_public_visible() {
            return self.status.display_name();
        }
        if self.is_fully_booked() {
            "FULL"
        } else {
            "AVAILABLE"
        }
    }

    /// Snapshot of the capacity counters.
    pub fn snapshot(&self) -> CapacitySnapshot {
        CapacitySnapshot {
            offering_id: self.id,
            capacity: self.capacity,
            current_bookings: self.current_bookings,
            available_spots: self.available_spots(),
            state: self.capacity_state(),
        }
    }

    /// URL slug derived from the name.
    pub fn slug(&self) -> String {
        let cleaned: String = self
            .name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
            .collect();

        cleaned
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Re-assert the capacity invariant.
    pub fn check_invariant(&self) -> AppResult<()> {
        if self.capacity < 1 {
            return Err(AppError::internal(format!(
                "Offering {} has non-positive capacity {}",
                self.id, self.capacity
            )));
        }
        if self.current_bookings < 0 || self.current_bookings > self.capacity {
            return Err(AppError::internal(format!(
                "Offering {} violates capacity invariant: {} bookings for capacity {}",
                self.id, self.current_bookings, self.capacity
            )));
        }
        Ok(())
    }

    /// Validate a catalog-side capacity change.
    pub fn validate_capacity_change(&self, new_capacity: i32) -> AppResult<()> {
        if new_capacity < 1 {
            return Err(AppError::validation("Capacity must be at least 1"));
        }
        if let Some(max) = self.kind.max_capacity() {
            if new_capacity > max {
                return Err(AppError::validation(format!(
                    "Capacity cannot exceed {max} for a {}",
                    self.kind
                )));
            }
        }
        if new_capacity < self.current_bookings {
            return Err(AppError::validation(format!(
                "Capacity cannot be lowered to {new_capacity}: {} spots are already booked",
                self.current_bookings
            )));
        }
        Ok(())
    }

    /// Take one spot. Returns `false` and leaves the counter unchanged when full.
    pub fn increment_bookings(&mut self) -> bool {
        if self.is_fully_booked() {
            return false;
        }
        self.current_bookings += 1;
        self.updated_at = Utc::now();
        true
    }

    /// Free one spot. Returns `false` and leaves the counter unchanged at zero.
    pub fn decrement_bookings(&mut self) -> bool {
        if self.current_bookings <= 0 {
            return false;
        }
        self.current_bookings -= 1;
        self.updated_at = Utc::now();
        true
    }
}

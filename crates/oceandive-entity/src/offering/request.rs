//! Catalog-side request DTOs with validation.
//!
//! Structural validation happens here, before the booking engine ever sees
//! an offering.

use serde::{Deserialize, Serialize};
use validator::Validate;

use oceandive_core::error::AppError;

use super::kind::OfferingKind;
use super::model::Offering;
use super::status::PublicationStatus;
use crate::certification::CertificationLevel;

/// Data required to create a new offering.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOffering {
    /// Course or trip.
    pub kind: OfferingKind,
    /// Course name or trip location.
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
    /// Total number of spots.
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,
    /// Prerequisite level.
    pub min_certification_required: Option<CertificationLevel>,
    /// Level conferred on completion. When absent for a course, it is
    /// inferred from the course name.
    pub provided_certification: Option<CertificationLevel>,
    /// Initial publication status.
    #[serde(default)]
    pub status: PublicationStatus,
}

impl CreateOffering {
    /// Validate the request and build the offering it describes.
    pub fn into_offering(self) -> Result<Offering, AppError> {
        self.validate()
            .map_err(|e| AppError::validation(format!("Invalid offering: {e}")))?;

        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Name must not be blank"));
        }

        if let Some(max) = self.kind.max_capacity() {
            if self.capacity > max {
                return Err(AppError::validation(format!(
                    "Capacity cannot exceed {max} for a {}",
                    self.kind
                )));
            }
        }

        let offering = match self.kind {
            OfferingKind::Course => {
                let course = Offering::course(name, self.capacity, self.min_certification_required);
                match self.provided_certification {
                    Some(level) => course.with_provided_certification(Some(level)),
                    None => course,
                }
            }
            OfferingKind::Trip => Offering::trip(name, self.capacity, self.min_certification_required)
                .with_provided_certification(self.provided_certification),
        };

        Ok(offering.with_status(self.status))
    }
}

/// Catalog request to change an offering's capacity.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCapacity {
    /// The new total number of spots.
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,
}

impl UpdateCapacity {
    /// Structural validation, before any offering is locked.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|e| AppError::validation(format!("Invalid capacity: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oceandive_core::ErrorKind;

    fn request(kind: OfferingKind, name: &str, capacity: i32) -> CreateOffering {
        CreateOffering {
            kind,
            name: name.to_string(),
            capacity,
            min_certification_required: Some(CertificationLevel::OpenWater),
            provided_certification: None,
            status: PublicationStatus::Published,
        }
    }

    #[test]
    fn test_valid_course_infers_certification() {
        let offering = request(OfferingKind::Course, " Advanced Open Water ", 6)
            .into_offering()
            .unwrap();
        assert_eq!(offering.name, "Advanced Open Water");
        assert_eq!(
            offering.provided_certification,
            Some(CertificationLevel::AdvancedOpenWater)
        );
        assert_eq!(offering.current_bookings, 0);
    }

    #[test]
    fn test_non_positive_capacity_rejected() {
        let err = request(OfferingKind::Trip, "Blue Hole", 0)
            .into_offering()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_trip_capacity_ceiling() {
        assert!(request(OfferingKind::Trip, "Blue Hole", 51).into_offering().is_err());
        assert!(request(OfferingKind::Course, "Rescue Diver", 51).into_offering().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(request(OfferingKind::Trip, "   ", 5).into_offering().is_err());
    }

    #[test]
    fn test_update_capacity_structural_check() {
        assert!(UpdateCapacity { capacity: 4 }.check().is_ok());
        let err = UpdateCapacity { capacity: 0 }.check().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}

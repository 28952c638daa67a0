//! Offering kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two variants of bookable offering. Both share the same capacity
/// and eligibility contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "offering_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OfferingKind {
    /// A training course, usually granting a certification.
    Course,
    /// A guided dive trip.
    Trip,
}

impl OfferingKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Trip => "trip",
        }
    }

    /// Largest capacity the catalog accepts for this kind.
    pub fn max_capacity(&self) -> Option<i32> {
        match self {
            Self::Course => None,
            Self::Trip => Some(50),
        }
    }
}

impl fmt::Display for OfferingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OfferingKind {
    type Err = oceandive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "course" => Ok(Self::Course),
            "trip" => Ok(Self::Trip),
            _ => Err(oceandive_core::AppError::validation(format!(
                "Invalid offering kind: '{s}'. Expected one of: course, trip"
            ))),
        }
    }
}

//! Publication status of an offering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog lifecycle of an offering. Owned by the catalog subsystem; the
/// booking engine only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "publication_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    /// Being prepared, not visible to customers.
    Draft,
    /// Visible and open for bookings.
    Published,
    /// Retired; excluded from new bookings regardless of capacity.
    Archived,
}

impl PublicationStatus {
    /// User-friendly display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
            Self::Archived => "Archived",
        }
    }

    /// Whether customers can see the offering.
    pub fn is_public_visible(&self) -> bool {
        matches!(self, Self::Published)
    }

    /// Whether the catalog may still edit the offering.
    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::Archived)
    }

    /// Whether new bookings are accepted.
    pub fn accepts_bookings(&self) -> bool {
        matches!(self, Self::Published)
    }
}

impl Default for PublicationStatus {
    fn default() -> Self {
        Self::Published
    }
}

impl fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PublicationStatus {
    type Err = oceandive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            _ => Err(oceandive_core::AppError::validation(format!(
                "Invalid publication status: '{s}'. Expected one of: draft, published, archived"
            ))),
        }
    }
}

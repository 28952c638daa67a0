//! Eligibility validator contract.

use serde::{Deserialize, Serialize};

use oceandive_entity::certification::CertificationLevel;
use oceandive_entity::offering::Offering;

/// Message returned when the holder already has what a course confers.
pub const ALREADY_CERTIFIED_MESSAGE: &str = "holder already holds this certification or higher";

/// Outcome of an eligibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the holder may book.
    pub valid: bool,
    /// Explanation; empty when valid.
    pub message: String,
}

impl ValidationResult {
    /// An eligible outcome.
    pub fn eligible() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    /// An ineligible outcome with an explanation.
    pub fn ineligible(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    /// Holder already holds the offering's provided certification.
    pub fn already_certified() -> Self {
        Self::ineligible(ALREADY_CERTIFIED_MESSAGE)
    }

    /// Holder ranks below the prerequisite.
    pub fn insufficient(holder: CertificationLevel, required: CertificationLevel) -> Self {
        Self::ineligible(format!(
            "Holder certification level {} is insufficient for required level {}",
            holder.display_name(),
            required.display_name()
        ))
    }
}

/// Pure decision whether a holder's certification qualifies for an offering.
///
/// Implementations perform no I/O and hold no mutable state.
pub trait EligibilityValidator: Send + Sync + std::fmt::Debug {
    /// Validate a holder's (possibly absent) level against an offering.
    fn validate(&self, holder: Option<CertificationLevel>, offering: &Offering) -> ValidationResult;

    /// Short strategy name for logs.
    fn name(&self) -> &'static str;
}

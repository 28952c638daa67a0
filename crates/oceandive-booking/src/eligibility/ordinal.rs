//! Direct rank comparison.

use oceandive_entity::certification::CertificationLevel;
use oceandive_entity::offering::Offering;

use super::validator::{EligibilityValidator, ValidationResult};

/// Eligibility by comparing ranks directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdinalValidator;

impl EligibilityValidator for OrdinalValidator {
    fn validate(&self, holder: Option<CertificationLevel>, offering: &Offering) -> ValidationResult {
        let level = holder.unwrap_or(CertificationLevel::NonDiver);

        if let Some(provided) = offering.provided_certification {
            if level.meets(&provided) {
                return ValidationResult::already_certified();
            }
        }

        match offering.min_certification_required {
            Some(required) if !CertificationLevel::satisfies(Some(level), Some(required)) => {
                ValidationResult::insufficient(level, required)
            }
            _ => ValidationResult::eligible(),
        }
    }

    fn name(&self) -> &'static str {
        "ordinal"
    }
}

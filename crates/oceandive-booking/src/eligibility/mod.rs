//! Certification eligibility: the validator contract and its interchangeable
//! strategies.

pub mod ordinal;
pub mod rules;
pub mod validator;

pub use ordinal::OrdinalValidator;
pub use rules::RuleBasedValidator;
pub use validator::{EligibilityValidator, ValidationResult};

use oceandive_core::config::EligibilityStrategyKind;
use oceandive_entity::certification::CertificationLevel;
use oceandive_entity::offering::Offering;

/// Dispatcher over the configured eligibility strategy.
#[derive(Debug, Clone)]
pub enum EligibilityStrategy {
    /// Direct rank comparison.
    Ordinal(OrdinalValidator),
    /// Declarative rule table.
    Rules(RuleBasedValidator),
}

impl EligibilityStrategy {
    /// Build the strategy selected in configuration.
    pub fn from_kind(kind: EligibilityStrategyKind) -> Self {
        match kind {
            EligibilityStrategyKind::Ordinal => Self::Ordinal(OrdinalValidator),
            EligibilityStrategyKind::Rules => Self::Rules(RuleBasedValidator::new()),
        }
    }
}

impl Default for EligibilityStrategy {
    fn default() -> Self {
        Self::Ordinal(OrdinalValidator)
    }
}

impl EligibilityValidator for EligibilityStrategy {
    fn validate(&self, holder: Option<CertificationLevel>, offering: &Offering) -> ValidationResult {
        match self {
            Self::Ordinal(inner) => inner.validate(holder, offering),
            Self::Rules(inner) => inner.validate(holder, offering),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Ordinal(inner) => inner.name(),
            Self::Rules(inner) => inner.name(),
        }
    }
}

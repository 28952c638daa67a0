//! Declarative rule-table eligibility.
//!
//! Facts are extracted from the holder and offering once, then rules are
//! evaluated in descending salience; the first rule whose condition holds
//! decides the outcome. The default rule set is equivalent to
//! [`super::ordinal::OrdinalValidator`].

use oceandive_entity::certification::CertificationLevel;
use oceandive_entity::offering::Offering;

use super::validator::{EligibilityValidator, ValidationResult};

/// Facts a rule may inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityFacts {
    /// Holder level, absent treated as non-diver.
    pub holder: CertificationLevel,
    /// Level the offering confers.
    pub provided: Option<CertificationLevel>,
    /// Level the offering requires.
    pub required: Option<CertificationLevel>,
}

impl EligibilityFacts {
    /// Extract facts from a holder level and an offering.
    pub fn gather(holder: Option<CertificationLevel>, offering: &Offering) -> Self {
        Self {
            holder: holder.unwrap_or(CertificationLevel::NonDiver),
            provided: offering.provided_certification,
            required: offering.min_certification_required,
        }
    }
}

/// Left-hand side of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// The offering confers a level the holder already meets.
    HolderMeetsProvided,
    /// The offering requires a level the holder does not meet.
    HolderBelowRequired,
    /// Always matches.
    Always,
}

impl Condition {
    fn matches(&self, facts: &EligibilityFacts) -> bool {
        match self {
            Self::HolderMeetsProvided => facts
                .provided
                .is_some_and(|provided| facts.holder.meets(&provided)),
            Self::HolderBelowRequired => {
                !CertificationLevel::satisfies(Some(facts.holder), facts.required)
            }
            Self::Always => true,
        }
    }
}

/// Right-hand side of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Reject: the holder already has what the course confers.
    RejectAlreadyCertified,
    /// Reject: the holder ranks below the prerequisite.
    RejectInsufficient,
    /// Accept.
    Accept,
}

impl Outcome {
    fn apply(&self, facts: &EligibilityFacts) -> ValidationResult {
        match self {
            Self::RejectAlreadyCertified => ValidationResult::already_certified(),
            Self::RejectInsufficient => ValidationResult::insufficient(
                facts.holder,
                facts.required.unwrap_or(CertificationLevel::NonDiver),
            ),
            Self::Accept => ValidationResult::eligible(),
        }
    }
}

/// A named rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Rule name, logged when it fires.
    pub name: &'static str,
    /// Higher salience is evaluated first.
    pub salience: i32,
    /// When the rule fires.
    pub condition: Condition,
    /// What the rule decides.
    pub outcome: Outcome,
}

/// The stock rule set.
pub const DEFAULT_RULES: [Rule; 3] = [
    Rule {
        name: "already-certified",
        salience: 100,
        condition: Condition::HolderMeetsProvided,
        outcome: Outcome::RejectAlreadyCertified,
    },
    Rule {
        name: "prerequisite-not-met",
        salience: 50,
        condition: Condition::HolderBelowRequired,
        outcome: Outcome::RejectInsufficient,
    },
    Rule {
        name: "eligible",
        salience: 0,
        condition: Condition::Always,
        outcome: Outcome::Accept,
    },
];

/// Eligibility backed by an ordered rule table.
#[derive(Debug, Clone)]
pub struct RuleBasedValidator {
    rules: Vec<Rule>,
}

impl RuleBasedValidator {
    /// Validator with the stock rule set.
    pub fn new() -> Self {
        Self::with_rules(DEFAULT_RULES.to_vec())
    }

    /// Validator with a custom rule set, ordered by salience.
    pub fn with_rules(mut rules: Vec<Rule>) -> Self {
        rules.sort_by(|a, b| b.salience.cmp(&a.salience));
        Self { rules }
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The first rule that fires for the given facts.
    pub fn fire(&self, facts: &EligibilityFacts) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.condition.matches(facts))
    }
}

impl Default for RuleBasedValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl EligibilityValidator for RuleBasedValidator {
    fn validate(&self, holder: Option<CertificationLevel>, offering: &Offering) -> ValidationResult {
        let facts = EligibilityFacts::gather(holder, offering);
        match self.fire(&facts) {
            Some(rule) => {
                tracing::trace!(rule = rule.name, offering_id = %offering.id, "Eligibility rule fired");
                rule.outcome.apply(&facts)
            }
            // An empty rule table admits nobody.
            None => ValidationResult::ineligible("No eligibility rule matched"),
        }
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

//! Certification level enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use oceandive_core::AppError;

/// Diver qualification ranks, totally ordered.
///
/// Declaration order is rank order, so the derived `Ord` agrees with
/// [`CertificationLevel::rank`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "certification_level", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificationLevel {
    /// No certification.
    NonDiver,
    /// Open Water Diver.
    OpenWater,
    /// Advanced Open Water Diver.
    AdvancedOpenWater,
    /// Rescue Diver.
    RescueDiver,
    /// Divemaster.
    Divemaster,
    /// Instructor.
    Instructor,
}

impl CertificationLevel {
    /// Every level in ascending rank order.
    pub const ALL: [CertificationLevel; 6] = [
        Self::NonDiver,
        Self::OpenWater,
        Self::AdvancedOpenWater,
        Self::RescueDiver,
        Self::Divemaster,
        Self::Instructor,
    ];

    /// Every level in ascending rank order.
    pub fn all() -> &'static [CertificationLevel] {
        &Self::ALL
    }

    /// Return the rank (0 = non-diver, 5 = instructor).
    pub fn rank(&self) -> u8 {
        match self {
            Self::NonDiver => 0,
            Self::OpenWater => 1,
            Self::AdvancedOpenWater => 2,
            Self::RescueDiver => 3,
            Self::Divemaster => 4,
            Self::Instructor => 5,
        }
    }

    /// Look a level up by its rank.
    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(usize::from(rank)).copied()
    }

    /// Check if this level meets the given requirement.
    pub fn meets(&self, required: &CertificationLevel) -> bool {
        self.rank() >= required.rank()
    }

    /// Whether a holder level satisfies a requirement.
    ///
    /// A missing holder level counts as [`CertificationLevel::NonDiver`];
    /// a missing requirement is always satisfied.
    pub fn satisfies(holder: Option<CertificationLevel>, required: Option<CertificationLevel>) -> bool {
        match required {
            None => true,
            Some(required) => holder.unwrap_or(Self::NonDiver).meets(&required),
        }
    }

    /// The next level up, if any.
    pub fn next(&self) -> Option<Self> {
        Self::from_rank(self.rank() + 1)
    }

    /// Rescue Diver or higher.
    pub fn is_advanced(&self) -> bool {
        self.meets(&Self::RescueDiver)
    }

    /// Divemaster or Instructor.
    pub fn is_professional(&self) -> bool {
        self.meets(&Self::Divemaster)
    }

    /// Canonical upper-case name, e.g. `OPEN_WATER`.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::NonDiver => "NON_DIVER",
            Self::OpenWater => "OPEN_WATER",
            Self::AdvancedOpenWater => "ADVANCED_OPEN_WATER",
            Self::RescueDiver => "RESCUE_DIVER",
            Self::Divemaster => "DIVEMASTER",
            Self::Instructor => "INSTRUCTOR",
        }
    }

    /// Short human-readable name, e.g. `Open Water`.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::NonDiver => "Non Diver",
            Self::OpenWater => "Open Water",
            Self::AdvancedOpenWater => "Advanced Open Water",
            Self::RescueDiver => "Rescue Diver",
            Self::Divemaster => "Divemaster",
            Self::Instructor => "Instructor",
        }
    }

    /// Long human-readable name, e.g. `Open Water Diver`.
    pub fn full_display_name(&self) -> &'static str {
        match self {
            Self::NonDiver => "Beginner (No Certification)",
            Self::OpenWater => "Open Water Diver",
            Self::AdvancedOpenWater => "Advanced Open Water Diver",
            Self::RescueDiver => "Rescue Diver",
            Self::Divemaster => "Dive Master",
            Self::Instructor => "Instructor",
        }
    }

    /// Resolve a level from user-supplied text.
    ///
    /// Case and surrounding whitespace are ignored. Accepts the canonical
    /// name (`OPEN_WATER`, `open water`), the short display name, or the
    /// full display name. Unknown input yields a `NotFound` error.
    pub fn from_display_name(text: &str) -> Result<Self, AppError> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return Err(AppError::not_found("Certification level must not be empty"));
        }

        let canonical = words.join("_").replace('-', "_").to_uppercase();
        let spoken = words.join(" ").to_lowercase();

        Self::ALL
            .into_iter()
            .find(|level| {
                level.canonical_name() == canonical
                    || level.display_name().to_lowercase() == spoken
                    || level.full_display_name().to_lowercase() == spoken
            })
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Unknown certification level: '{}'. Expected one of: {}",
                    text.trim(),
                    Self::all_display_names()
                ))
            })
    }

    /// Comma-separated list of every display name.
    pub fn all_display_names() -> String {
        Self::ALL
            .iter()
            .map(|level| level.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for CertificationLevel {
    fn default() -> Self {
        Self::NonDiver
    }
}

impl fmt::Display for CertificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for CertificationLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_display_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oceandive_core::ErrorKind;

    #[test]
    fn test_rank_matches_position() {
        for (position, level) in CertificationLevel::ALL.iter().enumerate() {
            assert_eq!(usize::from(level.rank()), position);
            assert_eq!(CertificationLevel::from_rank(level.rank()), Some(*level));
        }
        assert_eq!(CertificationLevel::from_rank(6), None);
    }

    #[test]
    fn test_ord_agrees_with_rank() {
        assert!(CertificationLevel::Instructor > CertificationLevel::Divemaster);
        assert!(CertificationLevel::NonDiver < CertificationLevel::OpenWater);
    }

    #[test]
    fn test_satisfies_handles_absent_values() {
        use CertificationLevel::*;
        assert!(CertificationLevel::satisfies(None, None));
        assert!(CertificationLevel::satisfies(None, Some(NonDiver)));
        assert!(!CertificationLevel::satisfies(None, Some(OpenWater)));
        assert!(CertificationLevel::satisfies(Some(NonDiver), None));
        assert!(CertificationLevel::satisfies(Some(RescueDiver), Some(AdvancedOpenWater)));
        assert!(!CertificationLevel::satisfies(Some(OpenWater), Some(AdvancedOpenWater)));
    }

    #[test]
    fn test_satisfies_is_monotonic() {
        for required in CertificationLevel::ALL {
            for holder in CertificationLevel::ALL {
                if CertificationLevel::satisfies(Some(holder), Some(required)) {
                    for higher in CertificationLevel::ALL.iter().filter(|l| **l >= holder) {
                        assert!(
                            CertificationLevel::satisfies(Some(*higher), Some(required)),
                            "{higher:?} should satisfy {required:?} because {holder:?} does"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_from_display_name_accepts_all_forms() {
        use CertificationLevel::*;
        assert_eq!(CertificationLevel::from_display_name("OPEN_WATER").unwrap(), OpenWater);
        assert_eq!(CertificationLevel::from_display_name("  open water ").unwrap(), OpenWater);
        assert_eq!(
            CertificationLevel::from_display_name("Open Water Diver").unwrap(),
            OpenWater
        );
        assert_eq!(
            CertificationLevel::from_display_name("beginner (no certification)").unwrap(),
            NonDiver
        );
        assert_eq!(CertificationLevel::from_display_name("Dive Master").unwrap(), Divemaster);
        assert_eq!(
            CertificationLevel::from_display_name("advanced-open-water").unwrap(),
            AdvancedOpenWater
        );
        assert_eq!("INSTRUCTOR".parse::<CertificationLevel>().unwrap(), Instructor);
    }

    #[test]
    fn test_from_display_name_unknown_is_not_found() {
        let err = CertificationLevel::from_display_name("Cave Diver").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(err.message.contains("Cave Diver"));

        let err = CertificationLevel::from_display_name("   ").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_professional_and_advanced() {
        assert!(CertificationLevel::RescueDiver.is_advanced());
        assert!(!CertificationLevel::RescueDiver.is_professional());
        assert!(CertificationLevel::Divemaster.is_professional());
        assert!(!CertificationLevel::AdvancedOpenWater.is_advanced());
    }

    #[test]
    fn test_next() {
        assert_eq!(
            CertificationLevel::OpenWater.next(),
            Some(CertificationLevel::AdvancedOpenWater)
        );
        assert_eq!(CertificationLevel::Instructor.next(), None);
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&CertificationLevel::AdvancedOpenWater).unwrap();
        assert_eq!(json, "\"ADVANCED_OPEN_WATER\"");
    }
}

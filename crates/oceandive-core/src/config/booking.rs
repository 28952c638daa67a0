//! Booking engine configuration.

use serde::{Deserialize, Serialize};

/// Booking engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Which offering store backs the capacity counters.
    #[serde(default)]
    pub store: StoreBackend,
    /// Which eligibility strategy decides certification checks.
    #[serde(default)]
    pub eligibility_strategy: EligibilityStrategyKind,
    /// Upper bound in milliseconds for waiting on an offering's lock.
    ///
    /// A wait that exceeds this surfaces as a transient error rather than
    /// as a capacity outcome.
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
    /// Booking reference issuance settings.
    #[serde(default)]
    pub reference: ReferenceConfig,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            eligibility_strategy: EligibilityStrategyKind::default(),
            lock_timeout_ms: default_lock_timeout_ms(),
            reference: ReferenceConfig::default(),
        }
    }
}

/// Backend used for offering capacity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Process-local store with one mutex per offering.
    #[default]
    Memory,
    /// PostgreSQL rows mutated under row locks.
    Postgres,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Postgres => write!(f, "postgres"),
        }
    }
}

/// Eligibility decision strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStrategyKind {
    /// Direct rank comparison.
    #[default]
    Ordinal,
    /// Declarative rule table evaluated by salience.
    Rules,
}

impl std::fmt::Display for EligibilityStrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EligibilityStrategyKind::Ordinal => write!(f, "ordinal"),
            EligibilityStrategyKind::Rules => write!(f, "rules"),
        }
    }
}

/// Booking reference issuance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceConfig {
    /// Whether to redraw references that were already issued by this process.
    #[serde(default = "default_true")]
    pub unique: bool,
    /// Maximum number of draws before a colliding reference is accepted.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            unique: true,
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_lock_timeout_ms() -> u64 {
    5_000
}

fn default_true() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    16
}

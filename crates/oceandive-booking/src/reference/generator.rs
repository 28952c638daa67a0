//! Booking reference synthesis.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Placeholder used when the offering name is blank.
pub const OFFERING_PLACEHOLDER: &str = "OFFERING";
/// Placeholder used when the holder's first name is blank.
pub const GUEST_PLACEHOLDER: &str = "GUEST";

/// Builds `OFFERING_NAME_NNN` codes from an injected random source.
pub struct BookingReferenceGenerator {
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl BookingReferenceGenerator {
    /// Generator seeded from the operating system's entropy source.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Generator drawing from the given random source.
    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
        }
    }

    /// Deterministic generator for reproducible sequences.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Generate a reference such as `REDSEATRIP_ANA_417`.
    ///
    /// Whitespace is stripped from both inputs and they are upper-cased;
    /// blank or absent inputs fall back to the placeholders.
    pub fn generate(&self, offering_name: Option<&str>, holder_first_name: Option<&str>) -> String {
        let offering = sanitize(offering_name, OFFERING_PLACEHOLDER);
        let holder = sanitize(holder_first_name, GUEST_PLACEHOLDER);
        let suffix: u16 = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random_range(100..=999);

        format!("{offering}_{holder}_{suffix}")
    }

    /// Leading `OFFERING_` segment shared by every reference for that name.
    pub fn prefix(offering_name: Option<&str>) -> String {
        format!("{}_", sanitize(offering_name, OFFERING_PLACEHOLDER))
    }
}

impl Default for BookingReferenceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BookingReferenceGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingReferenceGenerator").finish_non_exhaustive()
    }
}

fn sanitize(input: Option<&str>, placeholder: &str) -> String {
    let stripped: String = input
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if stripped.is_empty() {
        placeholder.to_string()
    } else {
        stripped.to_uppercase()
    }
}

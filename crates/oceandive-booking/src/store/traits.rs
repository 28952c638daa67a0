//! Offering store trait and shared outcome types.

use async_trait::async_trait;

use oceandive_core::error::AppError;
use oceandive_core::types::OfferingId;
use oceandive_entity::offering::Offering;

/// Result of the indivisible recheck-then-increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReserveOutcome {
    /// One spot was taken; carries the offering after the increment.
    Reserved(Offering),
    /// Another caller took the last spot first.
    Full(Offering),
    /// The offering stopped accepting bookings meanwhile.
    NotBookable(Offering),
    /// No offering with that id.
    NotFound,
}

/// Result of the indivisible recheck-then-decrement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// One spot was freed; carries the offering after the decrement.
    Released(Offering),
    /// The counter was already zero; nothing changed.
    Empty(Offering),
    /// No offering with that id.
    NotFound,
}

/// Source of offerings and owner of their booking counters.
///
/// `try_reserve` and `try_release` must each be a single step with respect
/// to concurrent callers on the same offering: at most one caller can win
/// the last spot, and the counter never leaves `[0, capacity]`.
#[async_trait]
pub trait OfferingStore: Send + Sync + std::fmt::Debug {
    /// Look an offering up by id.
    async fn find(&self, id: OfferingId) -> Result<Option<Offering>, AppError>;

    /// Re-check capacity and status, then take one spot.
    async fn try_reserve(&self, id: OfferingId) -> Result<ReserveOutcome, AppError>;

    /// Re-check the counter, then free one spot.
    async fn try_release(&self, id: OfferingId) -> Result<ReleaseOutcome, AppError>;
}

//! PostgreSQL-backed offering store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use oceandive_core::error::AppError;
use oceandive_core::types::OfferingId;
use oceandive_database::repositories::{CounterMutation, OfferingRepository};
use oceandive_entity::offering::Offering;

use super::traits::{OfferingStore, ReleaseOutcome, ReserveOutcome};

/// Offering store whose counters live in the `offerings` table.
///
/// Serialization comes from the row lock taken by the repository, so any
/// number of processes may share one database.
#[derive(Debug, Clone)]
pub struct PostgresOfferingStore {
    repo: Arc<OfferingRepository>,
    lock_timeout: Duration,
}

impl PostgresOfferingStore {
    /// Create a store over the given repository.
    pub fn new(repo: Arc<OfferingRepository>, lock_timeout: Duration) -> Self {
        Self { repo, lock_timeout }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &OfferingRepository {
        &self.repo
    }
}

#[async_trait]
impl OfferingStore for PostgresOfferingStore {
    async fn find(&self, id: OfferingId) -> Result<Option<Offering>, AppError> {
        self.repo.find_by_id(id).await
    }

    async fn try_reserve(&self, id: OfferingId) -> Result<ReserveOutcome, AppError> {
        Ok(match self.repo.try_increment(id, self.lock_timeout).await? {
            CounterMutation::Applied(offering) => ReserveOutcome::Reserved(offering),
            CounterMutation::Rejected(offering) if !offering.status.accepts_bookings() => {
                ReserveOutcome::NotBookable(offering)
            }
            CounterMutation::Rejected(offering) => ReserveOutcome::Full(offering),
            CounterMutation::NotFound => ReserveOutcome::NotFound,
        })
    }

    async fn try_release(&self, id: OfferingId) -> Result<ReleaseOutcome, AppError> {
        Ok(match self.repo.try_decrement(id, self.lock_timeout).await? {
            CounterMutation::Applied(offering) => ReleaseOutcome::Released(offering),
            CounterMutation::Rejected(offering) => ReleaseOutcome::Empty(offering),
            CounterMutation::NotFound => ReleaseOutcome::NotFound,
        })
    }
}

//! In-memory offering store with one Tokio mutex per offering.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use oceandive_core::error::AppError;
use oceandive_core::types::OfferingId;
use oceandive_entity::offering::{Offering, PublicationStatus};

use super::traits::{OfferingStore, ReleaseOutcome, ReserveOutcome};

/// In-memory offering store.
///
/// Each offering sits behind its own mutex, so callers on different
/// offerings never contend. Lock waits are bounded by `lock_timeout`.
/// Suitable for single-node deployments and tests.
#[derive(Debug, Clone)]
pub struct MemoryOfferingStore {
    offerings: Arc<DashMap<OfferingId, Arc<Mutex<Offering>>>>,
    lock_timeout: Duration,
}

impl MemoryOfferingStore {
    /// Create an empty store.
    pub fn new(lock_timeout: Duration) -> Self {
        Self {
            offerings: Arc::new(DashMap::new()),
            lock_timeout,
        }
    }

    /// Add an offering to the catalog.
    pub fn insert(&self, offering: Offering) -> Result<(), AppError> {
        offering.check_invariant()?;
        if self.offerings.contains_key(&offering.id) {
            return Err(AppError::conflict(format!(
                "Offering {} already exists",
                offering.id
            )));
        }

        info!(offering_id = %offering.id, name = %offering.name, capacity = offering.capacity, "Offering added");
        self.offerings
            .insert(offering.id, Arc::new(Mutex::new(offering)));
        Ok(())
    }

    /// Change capacity under the offering's lock.
    pub async fn set_capacity(&self, id: OfferingId, capacity: i32) -> Result<Offering, AppError> {
        let mut offering = self.lock(id).await?;
        offering.validate_capacity_change(capacity)?;
        offering.capacity = capacity;
        offering.updated_at = chrono::Utc::now();
        offering.check_invariant()?;

        info!(offering_id = %id, capacity = capacity, "Capacity updated");
        Ok(offering.clone())
    }

    /// Change publication status under the offering's lock.
    pub async fn set_status(
        &self,
        id: OfferingId,
        status: PublicationStatus,
    ) -> Result<Offering, AppError> {
        let mut offering = self.lock(id).await?;
        offering.status = status;
        offering.updated_at = chrono::Utc::now();

        info!(offering_id = %id, status = %status, "Publication status updated");
        Ok(offering.clone())
    }

    fn handle(&self, id: OfferingId) -> Option<Arc<Mutex<Offering>>> {
        // Clone the handle out so no map shard guard is held across an await.
        self.offerings.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    async fn lock(&self, id: OfferingId) -> Result<OwnedMutexGuard<Offering>, AppError> {
        let handle = self
            .handle(id)
            .ok_or_else(|| AppError::not_found(format!("Offering {id} not found")))?;
        self.acquire(handle).await
    }

    async fn acquire(
        &self,
        handle: Arc<Mutex<Offering>>,
    ) -> Result<OwnedMutexGuard<Offering>, AppError> {
        tokio::time::timeout(self.lock_timeout, handle.lock_owned())
            .await
            .map_err(|_| {
                warn!(timeout_ms = self.lock_timeout.as_millis() as u64, "Offering lock wait timed out");
                AppError::service_unavailable("Timed out waiting for offering lock")
            })
    }
}

#[async_trait]
impl OfferingStore for MemoryOfferingStore {
    async fn find(&self, id: OfferingId) -> Result<Option<Offering>, AppError> {
        let Some(handle) = self.handle(id) else {
            return Ok(None);
        };
        Ok(Some(self.acquire(handle).await?.clone()))
    }

    async fn try_reserve(&self, id: OfferingId) -> Result<ReserveOutcome, AppError> {
        let Some(handle) = self.handle(id) else {
            return Ok(ReserveOutcome::NotFound);
        };
        let mut offering = self.acquire(handle).await?;
        offering.check_invariant()?;

        if !offering.status.accepts_bookings() {
            return Ok(ReserveOutcome::NotBookable(offering.clone()));
        }
        if !offering.increment_bookings() {
            debug!(offering_id = %id, "Reserve lost the race for the last spot");
            return Ok(ReserveOutcome::Full(offering.clone()));
        }
        offering.check_invariant()?;

        Ok(ReserveOutcome::Reserved(offering.clone()))
    }

    async fn try_release(&self, id: OfferingId) -> Result<ReleaseOutcome, AppError> {
        let Some(handle) = self.handle(id) else {
            return Ok(ReleaseOutcome::NotFound);
        };
        let mut offering = self.acquire(handle).await?;
        offering.check_invariant()?;

        if !offering.decrement_bookings() {
            return Ok(ReleaseOutcome::Empty(offering.clone()));
        }
        offering.check_invariant()?;

        Ok(ReleaseOutcome::Released(offering.clone()))
    }
}

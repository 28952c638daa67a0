//! Offering stores: the trait, its backends, and a config-driven dispatcher.

pub mod memory;
pub mod postgres;
pub mod records;
pub mod traits;

pub use memory::MemoryOfferingStore;
pub use postgres::PostgresOfferingStore;
pub use records::BookingRecordStore;
pub use traits::{OfferingStore, ReleaseOutcome, ReserveOutcome};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use oceandive_core::config::{BookingConfig, StoreBackend};
use oceandive_core::error::AppError;
use oceandive_core::types::OfferingId;
use oceandive_database::repositories::OfferingRepository;
use oceandive_entity::offering::Offering;

/// Dispatcher over offering store backends.
///
/// Switches between in-memory and PostgreSQL storage based on configuration.
#[derive(Debug, Clone)]
pub enum OfferingStoreDispatch {
    /// In-memory store (single node).
    Memory(MemoryOfferingStore),
    /// PostgreSQL store (multi-node).
    Postgres(PostgresOfferingStore),
}

impl OfferingStoreDispatch {
    /// Build the configured backend. The PostgreSQL backend needs a pool.
    pub fn from_config(config: &BookingConfig, pool: Option<PgPool>) -> Result<Self, AppError> {
        let lock_timeout = Duration::from_millis(config.lock_timeout_ms);
        match config.store {
            StoreBackend::Memory => Ok(Self::Memory(MemoryOfferingStore::new(lock_timeout))),
            StoreBackend::Postgres => {
                let pool = pool.ok_or_else(|| {
                    AppError::configuration("The postgres offering store requires a database pool")
                })?;
                Ok(Self::Postgres(PostgresOfferingStore::new(
                    Arc::new(OfferingRepository::new(pool)),
                    lock_timeout,
                )))
            }
        }
    }
}

#[async_trait]
impl OfferingStore for OfferingStoreDispatch {
    async fn find(&self, id: OfferingId) -> Result<Option<Offering>, AppError> {
        match self {
            Self::Memory(inner) => inner.find(id).await,
            Self::Postgres(inner) => inner.find(id).await,
        }
    }

    async fn try_reserve(&self, id: OfferingId) -> Result<ReserveOutcome, AppError> {
        match self {
            Self::Memory(inner) => inner.try_reserve(id).await,
            Self::Postgres(inner) => inner.try_reserve(id).await,
        }
    }

    async fn try_release(&self, id: OfferingId) -> Result<ReleaseOutcome, AppError> {
        match self {
            Self::Memory(inner) => inner.try_release(id).await,
            Self::Postgres(inner) => inner.try_release(id).await,
        }
    }
}

//! Durable home of issued booking records.

use async_trait::async_trait;

use oceandive_core::error::AppError;
use oceandive_database::repositories::BookingRecordRepository;
use oceandive_entity::booking::BookingRecord;

/// Where booking records are persisted.
///
/// References are unique across the whole store, not per offering.
#[async_trait]
pub trait BookingRecordStore: Send + Sync + std::fmt::Debug {
    /// Store a record. Returns `false` when the reference is already taken.
    async fn insert(&self, record: &BookingRecord) -> Result<bool, AppError>;

    /// Remove a record by reference, returning it if it existed.
    async fn remove(&self, reference: &str) -> Result<Option<BookingRecord>, AppError>;
}

#[async_trait]
impl BookingRecordStore for BookingRecordRepository {
    async fn insert(&self, record: &BookingRecord) -> Result<bool, AppError> {
        BookingRecordRepository::insert(self, record).await
    }

    async fn remove(&self, reference: &str) -> Result<Option<BookingRecord>, AppError> {
        self.delete_by_reference(reference).await
    }
}

//! Booking record repository implementation.

use sqlx::PgPool;

use oceandive_core::error::{AppError, ErrorKind};
use oceandive_core::result::AppResult;
use oceandive_core::types::OfferingId;
use oceandive_entity::booking::BookingRecord;

/// Repository for issued booking records.
#[derive(Debug, Clone)]
pub struct BookingRecordRepository {
    pool: PgPool,
}

impl BookingRecordRepository {
    /// Create a new booking record repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a record. Returns `false` when the reference is already taken.
    pub async fn insert(&self, record: &BookingRecord) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO booking_records (reference, offering_id, holder_name, issued_at) \
             VALUES ($1, $2, $3, $4) ON CONFLICT (reference) DO NOTHING",
        )
        .bind(&record.reference)
        .bind(record.offering_id)
        .bind(&record.holder_name)
        .bind(record.issued_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert booking record", e))?;

        Ok(result.rows_affected() == 1)
    }

    /// Find a record by its reference.
    pub async fn find_by_reference(&self, reference: &str) -> AppResult<Option<BookingRecord>> {
        sqlx::query_as::<_, BookingRecord>("SELECT * FROM booking_records WHERE reference = $1")
            .bind(reference)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find booking record", e)
            })
    }

    /// List the records of an offering, oldest first.
    pub async fn find_by_offering(&self, offering_id: OfferingId) -> AppResult<Vec<BookingRecord>> {
        sqlx::query_as::<_, BookingRecord>(
            "SELECT * FROM booking_records WHERE offering_id = $1 ORDER BY issued_at ASC",
        )
        .bind(offering_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list booking records", e))
    }

    /// List every record whose reference starts with `prefix`, across offerings.
    pub async fn find_by_reference_prefix(&self, prefix: &str) -> AppResult<Vec<BookingRecord>> {
        sqlx::query_as::<_, BookingRecord>(
            "SELECT * FROM booking_records WHERE left(reference, length($1)) = $1 \
             ORDER BY issued_at ASC",
        )
        .bind(prefix)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list booking records", e))
    }

    /// Delete a record. Returns the removed row, if any.
    pub async fn delete_by_reference(&self, reference: &str) -> AppResult<Option<BookingRecord>> {
        sqlx::query_as::<_, BookingRecord>(
            "DELETE FROM booking_records WHERE reference = $1 RETURNING *",
        )
        .bind(reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete booking record", e)
        })
    }
}

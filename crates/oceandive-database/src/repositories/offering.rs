//! Offering repository implementation.
//!
//! Counter mutations lock the offering row (`SELECT ... FOR UPDATE`) inside
//! a transaction with a bounded `lock_timeout`, re-check the capacity
//! invariant on the locked row, and only then write. Concurrent callers on
//! the same offering are therefore serialized by PostgreSQL.

use std::time::Duration;

use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use oceandive_core::error::{AppError, ErrorKind};
use oceandive_core::result::AppResult;
use oceandive_core::types::OfferingId;
use oceandive_entity::offering::{Offering, PublicationStatus};

/// SQLSTATE raised when `lock_timeout` expires.
const LOCK_NOT_AVAILABLE: &str = "55P03";

/// Outcome of a locked counter mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterMutation {
    /// The counter was changed; carries the row after the write.
    Applied(Offering),
    /// The locked row did not allow the change; carries the unchanged row.
    Rejected(Offering),
    /// No offering with that id exists.
    NotFound,
}

/// Repository for offering rows and their booking counters.
#[derive(Debug, Clone)]
pub struct OfferingRepository {
    pool: PgPool,
}

impl OfferingRepository {
    /// Create a new offering repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an offering by ID.
    pub async fn find_by_id(&self, id: OfferingId) -> AppResult<Option<Offering>> {
        sqlx::query_as::<_, Offering>("SELECT * FROM offerings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find offering", e))
    }

    /// List every offering, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Offering>> {
        sqlx::query_as::<_, Offering>("SELECT * FROM offerings ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list offerings", e))
    }

    /// Insert a new offering and return the stored row.
    pub async fn create(&self, offering: &Offering) -> AppResult<Offering> {
        offering.check_invariant()?;

        sqlx::query_as::<_, Offering>(
            "INSERT INTO offerings \
                (id, kind, name, capacity, current_bookings, min_certification_required, \
                 provided_certification, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(offering.id)
        .bind(offering.kind)
        .bind(&offering.name)
        .bind(offering.capacity)
        .bind(offering.current_bookings)
        .bind(offering.min_certification_required)
        .bind(offering.provided_certification)
        .bind(offering.status)
        .bind(offering.created_at)
        .bind(offering.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create offering", e))
    }

    /// Change the publication status.
    pub async fn update_status(
        &self,
        id: OfferingId,
        status: PublicationStatus,
    ) -> AppResult<Option<Offering>> {
        sqlx::query_as::<_, Offering>(
            "UPDATE offerings SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update offering status", e)
        })
    }

    /// Change the capacity under the row lock so it cannot race a booking.
    ///
    /// Returns `None` for an unknown offering. A capacity the locked row
    /// cannot take, such as one below the current bookings, fails with the
    /// row's validation error and nothing is written.
    pub async fn update_capacity(
        &self,
        id: OfferingId,
        capacity: i32,
        lock_timeout: Duration,
    ) -> AppResult<Option<Offering>> {
        let mut tx = self.begin_locked(lock_timeout).await?;

        let Some(offering) = Self::lock_row(&mut tx, id).await? else {
            return Ok(None);
        };
        offering.validate_capacity_change(capacity)?;

        let updated = sqlx::query_as::<_, Offering>(
            "UPDATE offerings SET capacity = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(capacity)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_lock_error(e, "Failed to update capacity"))?;

        Self::commit(tx).await?;
        Ok(Some(updated))
    }

    /// Take one spot if the locked row is published and not full.
    pub async fn try_increment(
        &self,
        id: OfferingId,
        lock_timeout: Duration,
    ) -> AppResult<CounterMutation> {
        let mut tx = self.begin_locked(lock_timeout).await?;

        let Some(offering) = Self::lock_row(&mut tx, id).await? else {
            return Ok(CounterMutation::NotFound);
        };
        offering.check_invariant()?;

        if !offering.is_bookable() {
            debug!(offering_id = %id, "Increment rejected on locked row");
            return Ok(CounterMutation::Rejected(offering));
        }

        let updated = sqlx::query_as::<_, Offering>(
            "UPDATE offerings SET current_bookings = current_bookings + 1, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_lock_error(e, "Failed to increment bookings"))?;
        updated.check_invariant()?;

        Self::commit(tx).await?;
        Ok(CounterMutation::Applied(updated))
    }

    /// Free one spot if the locked row has any bookings.
    pub async fn try_decrement(
        &self,
        id: OfferingId,
        lock_timeout: Duration,
    ) -> AppResult<CounterMutation> {
        let mut tx = self.begin_locked(lock_timeout).await?;

        let Some(offering) = Self::lock_row(&mut tx, id).await? else {
            return Ok(CounterMutation::NotFound);
        };
        offering.check_invariant()?;

        if offering.current_bookings <= 0 {
            return Ok(CounterMutation::Rejected(offering));
        }

        let updated = sqlx::query_as::<_, Offering>(
            "UPDATE offerings SET current_bookings = current_bookings - 1, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_lock_error(e, "Failed to decrement bookings"))?;
        updated.check_invariant()?;

        Self::commit(tx).await?;
        Ok(CounterMutation::Applied(updated))
    }

    async fn begin_locked(&self, lock_timeout: Duration) -> AppResult<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::ServiceUnavailable, "Failed to start transaction", e)
        })?;

        // SET LOCAL does not accept bind parameters; the value is an integer.
        sqlx::query(&format!(
            "SET LOCAL lock_timeout = '{}ms'",
            lock_timeout.as_millis().max(1)
        ))
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set lock timeout", e))?;

        Ok(tx)
    }

    async fn lock_row(
        tx: &mut Transaction<'static, Postgres>,
        id: OfferingId,
    ) -> AppResult<Option<Offering>> {
        sqlx::query_as::<_, Offering>("SELECT * FROM offerings WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| map_lock_error(e, "Failed to lock offering"))
    }

    async fn commit(tx: Transaction<'static, Postgres>) -> AppResult<()> {
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }
}

/// Map a query error, classifying lock wait timeouts as transient.
fn map_lock_error(err: sqlx::Error, context: &str) -> AppError {
    let lock_timed_out = err
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == LOCK_NOT_AVAILABLE);

    if lock_timed_out {
        AppError::with_source(
            ErrorKind::ServiceUnavailable,
            format!("{context}: lock wait timed out"),
            err,
        )
    } else {
        AppError::with_source(ErrorKind::Database, context.to_string(), err)
    }
}

//! Booking orchestration: eligibility, atomic capacity mutation, reference
//! issuance.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use oceandive_core::config::{BookingConfig, ReferenceConfig};
use oceandive_core::error::AppError;
use oceandive_core::types::OfferingId;
use oceandive_entity::booking::BookingRecord;
use oceandive_entity::certification::CertificationLevel;
use oceandive_entity::holder::CertificationHolder;
use oceandive_entity::offering::{CapacitySnapshot, Offering};

use crate::eligibility::{EligibilityStrategy, EligibilityValidator, ValidationResult};
use crate::error::{BookingError, ReleaseError};
use crate::reference::{BookingReferenceGenerator, ReferenceRegistry};
use crate::store::{BookingRecordStore, OfferingStore, ReleaseOutcome, ReserveOutcome};

/// Books and releases spots on offerings.
#[derive(Debug, Clone)]
pub struct BookingService {
    /// Offering lookup and counter owner.
    store: Arc<dyn OfferingStore>,
    /// Eligibility strategy.
    validator: EligibilityStrategy,
    /// Random reference synthesis.
    generator: Arc<BookingReferenceGenerator>,
    /// References issued by this service.
    registry: Arc<ReferenceRegistry>,
    /// Reference uniqueness settings.
    reference: ReferenceConfig,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(
        store: Arc<dyn OfferingStore>,
        validator: EligibilityStrategy,
        generator: BookingReferenceGenerator,
        reference: ReferenceConfig,
    ) -> Self {
        Self {
            store,
            validator,
            generator: Arc::new(generator),
            registry: Arc::new(ReferenceRegistry::new()),
            reference,
        }
    }

    /// Creates a booking service wired from configuration.
    pub fn from_config(config: &BookingConfig, store: Arc<dyn OfferingStore>) -> Self {
        Self::new(
            store,
            EligibilityStrategy::from_kind(config.eligibility_strategy),
            BookingReferenceGenerator::new(),
            config.reference.clone(),
        )
    }

    /// The eligibility strategy in use.
    pub fn validator(&self) -> &EligibilityStrategy {
        &self.validator
    }

    /// The references issued so far.
    pub fn registry(&self) -> &ReferenceRegistry {
        &self.registry
    }

    /// Check eligibility without booking.
    pub fn check_eligibility(
        &self,
        holder: Option<CertificationLevel>,
        offering: &Offering,
    ) -> ValidationResult {
        self.validator.validate(holder, offering)
    }

    /// Book one spot on an offering for a certification holder.
    ///
    /// Exactly one counter increment happens on success and none on failure.
    pub async fn book(
        &self,
        offering_id: OfferingId,
        holder: &dyn CertificationHolder,
    ) -> Result<BookingRecord, BookingError> {
        let reserved = self.reserve(offering_id, holder).await?;
        let reference = self.issue_reference(&reserved, holder.first_name());

        info!(
            offering_id = %offering_id,
            reference = %reference,
            current_bookings = reserved.current_bookings,
            capacity = reserved.capacity,
            "Booking confirmed"
        );

        Ok(BookingRecord::new(reference, offering_id, holder.first_name()))
    }

    /// Book one spot and persist its record.
    ///
    /// A reference already present in `records` is redrawn, up to
    /// `max_attempts` times. If the record cannot be stored the spot is
    /// released again, so a booked spot always has a stored record.
    pub async fn book_recorded(
        &self,
        offering_id: OfferingId,
        holder: &dyn CertificationHolder,
        records: &dyn BookingRecordStore,
    ) -> Result<BookingRecord, BookingError> {
        let reserved = self.reserve(offering_id, holder).await?;
        let attempts = self.reference.max_attempts.max(1);

        for attempt in 1..=attempts {
            let record = BookingRecord::new(
                self.issue_reference(&reserved, holder.first_name()),
                offering_id,
                holder.first_name(),
            );

            match records.insert(&record).await {
                Ok(true) => {
                    info!(
                        offering_id = %offering_id,
                        reference = %record.reference,
                        current_bookings = reserved.current_bookings,
                        capacity = reserved.capacity,
                        "Booking confirmed"
                    );
                    return Ok(record);
                }
                Ok(false) => {
                    // Owned by a record stored elsewhere; not ours to cancel.
                    self.registry.forget(&record.reference);
                    debug!(reference = %record.reference, attempt = attempt, "Reference already stored");
                }
                Err(e) => {
                    self.registry.forget(&record.reference);
                    return Err(self.undo_reservation(offering_id, e).await);
                }
            }
        }

        let err = AppError::conflict(format!(
            "No unused booking reference found after {attempts} attempts"
        ));
        Err(self.undo_reservation(offering_id, err).await)
    }

    /// Free one spot on an offering.
    ///
    /// Allowed in every publication status. At zero bookings nothing changes
    /// and [`ReleaseError::NothingToRelease`] is returned.
    pub async fn release(&self, offering_id: OfferingId) -> Result<CapacitySnapshot, ReleaseError> {
        match self
            .store
            .try_release(offering_id)
            .await
            .inspect_err(|e| warn!(offering_id = %offering_id, error = %e, "Release failed"))?
        {
            ReleaseOutcome::Released(offering) => {
                info!(
                    offering_id = %offering_id,
                    current_bookings = offering.current_bookings,
                    "Booking released"
                );
                Ok(offering.snapshot())
            }
            ReleaseOutcome::Empty(_) => {
                debug!(offering_id = %offering_id, "Release ignored: no bookings");
                Err(ReleaseError::NothingToRelease)
            }
            ReleaseOutcome::NotFound => Err(ReleaseError::NotFound(format!(
                "Offering {offering_id} not found"
            ))),
        }
    }

    /// Cancel a booking issued by this service and free its spot.
    pub async fn cancel(&self, reference: &str) -> Result<CapacitySnapshot, ReleaseError> {
        let offering_id = self.registry.forget(reference).ok_or_else(|| {
            ReleaseError::NotFound(format!("Booking reference {reference} not found"))
        })?;

        match self.release(offering_id).await {
            Err(ReleaseError::Infrastructure(err)) => {
                // The spot is still held; keep the reference cancellable.
                self.registry.record(reference, offering_id);
                Err(ReleaseError::Infrastructure(err))
            }
            outcome => {
                info!(reference = %reference, offering_id = %offering_id, "Booking cancelled");
                outcome
            }
        }
    }

    /// Cancel a stored booking and free its spot.
    ///
    /// The record is removed before the counter changes, so a retried
    /// cancellation can never free a second spot. If the release fails on
    /// infrastructure the record is put back.
    pub async fn cancel_recorded(
        &self,
        reference: &str,
        records: &dyn BookingRecordStore,
    ) -> Result<CapacitySnapshot, ReleaseError> {
        let record = records
            .remove(reference)
            .await
            .inspect_err(|e| warn!(reference = %reference, error = %e, "Record removal failed"))?
            .ok_or_else(|| {
                ReleaseError::NotFound(format!("Booking reference {reference} not found"))
            })?;
        self.registry.forget(reference);

        match self.release(record.offering_id).await {
            Err(ReleaseError::Infrastructure(err)) => {
                if let Err(restore) = records.insert(&record).await {
                    error!(reference = %reference, error = %restore, "Failed to restore booking record");
                }
                self.registry.record(reference, record.offering_id);
                Err(ReleaseError::Infrastructure(err))
            }
            outcome => {
                info!(reference = %reference, offering_id = %record.offering_id, "Booking cancelled");
                outcome
            }
        }
    }

    /// Current capacity counters of an offering.
    pub async fn availability(&self, offering_id: OfferingId) -> Result<CapacitySnapshot, AppError> {
        self.store
            .find(offering_id)
            .await?
            .map(|offering| offering.snapshot())
            .ok_or_else(|| AppError::not_found(format!("Offering {offering_id} not found")))
    }

    /// Run every booking check and take one spot.
    async fn reserve(
        &self,
        offering_id: OfferingId,
        holder: &dyn CertificationHolder,
    ) -> Result<Offering, BookingError> {
        let offering = self
            .store
            .find(offering_id)
            .await
            .inspect_err(|e| warn!(offering_id = %offering_id, error = %e, "Offering lookup failed"))?
            .ok_or_else(|| BookingError::NotFound(format!("Offering {offering_id} not found")))?;

        if !offering.status.accepts_bookings() {
            info!(offering_id = %offering_id, status = %offering.status, "Booking refused: offering not bookable");
            return Err(BookingError::NotBookable(offering.status));
        }

        if offering.is_fully_booked() {
            info!(offering_id = %offering_id, capacity = offering.capacity, "Booking refused: fully booked");
            return Err(BookingError::CapacityExceeded);
        }

        let eligibility = self.validator.validate(holder.certification(), &offering);
        if !eligibility.valid {
            info!(
                offering_id = %offering_id,
                holder_level = %holder.effective_certification(),
                strategy = self.validator.name(),
                reason = %eligibility.message,
                "Booking refused: not eligible"
            );
            return Err(BookingError::EligibilityFailure(eligibility.message));
        }

        match self
            .store
            .try_reserve(offering_id)
            .await
            .inspect_err(|e| warn!(offering_id = %offering_id, error = %e, "Reserve failed"))?
        {
            ReserveOutcome::Reserved(offering) => Ok(offering),
            ReserveOutcome::Full(_) => {
                info!(offering_id = %offering_id, "Booking refused: last spot taken concurrently");
                Err(BookingError::CapacityExceeded)
            }
            ReserveOutcome::NotBookable(offering) => {
                info!(offering_id = %offering_id, status = %offering.status, "Booking refused: offering closed concurrently");
                Err(BookingError::NotBookable(offering.status))
            }
            ReserveOutcome::NotFound => Err(BookingError::NotFound(format!(
                "Offering {offering_id} not found"
            ))),
        }
    }

    /// Give back a spot whose record could not be stored.
    async fn undo_reservation(&self, offering_id: OfferingId, cause: AppError) -> BookingError {
        match self.store.try_release(offering_id).await {
            Ok(ReleaseOutcome::Released(_)) => {
                warn!(offering_id = %offering_id, error = %cause, "Booking rolled back: record not stored");
            }
            Ok(_) => {
                error!(offering_id = %offering_id, error = %cause, "Booking rollback found no spot to release");
            }
            Err(e) => {
                error!(
                    offering_id = %offering_id,
                    error = %cause,
                    rollback_error = %e,
                    "Booking rollback failed: spot remains booked without a record"
                );
            }
        }
        BookingError::Infrastructure(cause)
    }

    /// Draw a reference, redrawing on collision when uniqueness is enabled.
    ///
    /// Never fails: the counter is already incremented at this point.
    fn issue_reference(&self, offering: &Offering, first_name: &str) -> String {
        let draw = || self.generator.generate(Some(&offering.name), Some(first_name));

        if !self.reference.unique {
            let reference = draw();
            self.registry.record(&reference, offering.id);
            return reference;
        }

        let attempts = self.reference.max_attempts.max(1);
        let mut candidate = draw();
        for attempt in 1..=attempts {
            if self.registry.claim(&candidate, offering.id) {
                if attempt > 1 {
                    debug!(reference = %candidate, attempt = attempt, "Reference redrawn after collision");
                }
                return candidate;
            }
            if attempt < attempts {
                candidate = draw();
            }
        }

        warn!(
            reference = %candidate,
            attempts = attempts,
            offering_id = %offering.id,
            "Issuing colliding booking reference after exhausting redraws"
        );
        self.registry.record(&candidate, offering.id);
        candidate
    }
}

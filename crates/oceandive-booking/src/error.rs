//! Booking and release outcomes that callers branch on.

use thiserror::Error;

use oceandive_core::error::{AppError, ErrorKind};
use oceandive_entity::offering::PublicationStatus;

/// Why a booking was not made.
///
/// `CapacityExceeded` and `EligibilityFailure` are recoverable business
/// outcomes; `Infrastructure` carries a transient fault the caller may retry.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The offering has no remaining spot.
    #[error("Offering is fully booked")]
    CapacityExceeded,

    /// The holder's certification does not qualify.
    #[error("{0}")]
    EligibilityFailure(String),

    /// The offering is not accepting bookings.
    #[error("Offering is not accepting bookings (status: {0})")]
    NotBookable(PublicationStatus),

    /// The offering could not be resolved.
    #[error("{0}")]
    NotFound(String),

    /// Storage or lock failure.
    #[error(transparent)]
    Infrastructure(#[from] AppError),
}

impl BookingError {
    /// Whether a caller may retry the same request.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Infrastructure(err) => err.is_transient(),
            _ => false,
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::CapacityExceeded => {
                AppError::capacity_exceeded("Offering is fully booked")
            }
            BookingError::EligibilityFailure(message) => AppError::eligibility(message),
            BookingError::NotBookable(status) => AppError::conflict(format!(
                "Offering is not accepting bookings (status: {status})"
            )),
            BookingError::NotFound(message) => AppError::not_found(message),
            BookingError::Infrastructure(err) => err,
        }
    }
}

/// Why a release was not applied.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// The counter is already zero; nothing changed.
    #[error("Offering has no bookings to release")]
    NothingToRelease,

    /// The offering or reference could not be resolved.
    #[error("{0}")]
    NotFound(String),

    /// Storage or lock failure.
    #[error(transparent)]
    Infrastructure(#[from] AppError),
}

impl ReleaseError {
    /// Whether a caller may retry the same request.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Infrastructure(err) => err.is_transient(),
            _ => false,
        }
    }
}

impl From<ReleaseError> for AppError {
    fn from(err: ReleaseError) -> Self {
        match err {
            ReleaseError::NothingToRelease => {
                AppError::new(ErrorKind::Conflict, "Offering has no bookings to release")
            }
            ReleaseError::NotFound(message) => AppError::not_found(message),
            ReleaseError::Infrastructure(err) => err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_outcomes_map_to_dedicated_kinds() {
        let err: AppError = BookingError::CapacityExceeded.into();
        assert_eq!(err.kind, ErrorKind::CapacityExceeded);
        assert!(err.is_business_rule());

        let err: AppError = BookingError::EligibilityFailure("too junior".into()).into();
        assert_eq!(err.kind, ErrorKind::Eligibility);
        assert_eq!(err.message, "too junior");

        let err: AppError = BookingError::NotBookable(PublicationStatus::Archived).into();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[test]
    fn test_infrastructure_is_transient() {
        let err = BookingError::from(AppError::service_unavailable("lock wait timed out"));
        assert!(err.is_transient());
        assert!(!BookingError::CapacityExceeded.is_transient());

        let err: AppError = err.into();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_release_errors() {
        assert!(!ReleaseError::NothingToRelease.is_transient());
        let err: AppError = ReleaseError::NotFound("Offering not found".into()).into();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}

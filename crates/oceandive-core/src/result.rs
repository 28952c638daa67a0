//! Convenience result type alias for OceanDive.

use crate::error::AppError;

/// A specialized `Result` type for OceanDive operations.
pub type AppResult<T> = Result<T, AppError>;

//! Error handling utilities for repositories

use atelier_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
///
/// Connectivity failures become `StorageUnavailable` so callers can surface
/// them as retryable; everything else is a plain database error.
pub fn map_db_error(e: SqlxError) -> DomainError {
    match e {
        SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::WorkerCrashed => {
            DomainError::StorageUnavailable(e.to_string())
        }
        SqlxError::Io(_) => DomainError::StorageUnavailable(e.to_string()),
        _ => DomainError::DatabaseError(e.to_string()),
    }
}

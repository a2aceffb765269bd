//! Service context - dependency container for services
//!
//! Holds the message repository and the tunables shared by services.

use std::sync::Arc;

use atelier_core::traits::MessageRepository;

use super::error::{ServiceError, ServiceResult};

/// Default number of ids the retention sweeper erases per batch
pub const DEFAULT_SWEEP_BATCH_SIZE: i64 = 500;

/// Service context containing all dependencies
///
/// Cheap to clone; services borrow it for the duration of one operation.
#[derive(Clone)]
pub struct ServiceContext {
    message_repo: Arc<dyn MessageRepository>,
    sweep_batch_size: i64,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(message_repo: Arc<dyn MessageRepository>) -> Self {
        Self {
            message_repo,
            sweep_batch_size: DEFAULT_SWEEP_BATCH_SIZE,
        }
    }

    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Ids erased per sweeper batch
    pub fn sweep_batch_size(&self) -> i64 {
        self.sweep_batch_size
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("message_repo", &"dyn MessageRepository")
            .field("sweep_batch_size", &self.sweep_batch_size)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    message_repo: Option<Arc<dyn MessageRepository>>,
    sweep_batch_size: Option<i64>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn sweep_batch_size(mut self, batch_size: i64) -> Self {
        self.sweep_batch_size = Some(batch_size);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the repository is missing or the
    /// batch size is not positive
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let message_repo = self
            .message_repo
            .ok_or_else(|| ServiceError::validation("message_repo is required"))?;

        let sweep_batch_size = self.sweep_batch_size.unwrap_or(DEFAULT_SWEEP_BATCH_SIZE);
        if sweep_batch_size < 1 {
            return Err(ServiceError::validation("sweep_batch_size must be positive"));
        }

        Ok(ServiceContext {
            message_repo,
            sweep_batch_size,
        })
    }
}

//! Bulk operation guard
//!
//! Fans a batch of ids out to the single-message operations. The batch is
//! validated as a whole before any row is touched; per-id refusals are then
//! skipped, and only rows whose state actually changed are counted.

use std::future::Future;

use atelier_core::traits::PatchOutcome;
use atelier_core::value_objects::{MessageId, UserId};
use atelier_core::DomainError;
use tracing::{debug, info, instrument};

use crate::dto::{BulkDeletedResponse, BulkUpdatedResponse, MAX_BATCH_SIZE};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::read_tracker::ReadTracker;
use super::visibility::VisibilityManager;

/// Bulk operation service
pub struct BulkOperationGuard<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BulkOperationGuard<'a> {
    /// Create a new BulkOperationGuard
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mark every id read, as the recipient
    #[instrument(skip(self, message_ids), fields(count = message_ids.len()))]
    pub async fn mark_read_bulk(&self, caller_id: UserId, message_ids: &[String]) -> ServiceResult<BulkUpdatedResponse> {
        let ids = parse_batch(message_ids)?;
        let tracker = ReadTracker::new(self.ctx);

        let updated = apply_each(&ids, |id| tracker.mark_read_tracked(id, caller_id)).await?;

        info!(caller_id = %caller_id, requested = ids.len(), updated, "Bulk mark read");
        Ok(BulkUpdatedResponse { updated })
    }

    /// Hide every id from the caller's view
    #[instrument(skip(self, message_ids), fields(count = message_ids.len()))]
    pub async fn hide_bulk(&self, caller_id: UserId, message_ids: &[String]) -> ServiceResult<BulkDeletedResponse> {
        let ids = parse_batch(message_ids)?;
        let visibility = VisibilityManager::new(self.ctx);

        let deleted = apply_each(&ids, |id| visibility.hide_tracked(id, caller_id)).await?;

        info!(caller_id = %caller_id, requested = ids.len(), deleted, "Bulk hide");
        Ok(BulkDeletedResponse { deleted })
    }
}

/// Validate the batch size and every id up front
pub fn parse_batch(message_ids: &[String]) -> Result<Vec<MessageId>, DomainError> {
    if message_ids.is_empty() || message_ids.len() > MAX_BATCH_SIZE {
        return Err(DomainError::BatchSizeOutOfRange {
            len: message_ids.len(),
            max: MAX_BATCH_SIZE,
        });
    }

    message_ids
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            MessageId::parse(raw).map_err(|_| {
                DomainError::InvalidArgument(format!("messageIds[{index}] is not a valid message id"))
            })
        })
        .collect()
}

/// Run `op` for each id in order, counting changed rows
///
/// Not-found and forbidden ids are skipped; any other failure aborts the
/// remaining ids.
async fn apply_each<F, Fut>(ids: &[MessageId], mut op: F) -> ServiceResult<u64>
where
    F: FnMut(MessageId) -> Fut,
    Fut: Future<Output = ServiceResult<PatchOutcome>>,
{
    let mut changed = 0;

    for &id in ids {
        match op(id).await {
            Ok(outcome) if outcome.changed => changed += 1,
            Ok(_) => {}
            Err(e) if is_skippable(&e) => {
                debug!(message_id = %id, error = %e, "Skipping id in bulk operation");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(changed)
}

fn is_skippable(err: &ServiceError) -> bool {
    err.is_not_found() || err.is_forbidden()
}

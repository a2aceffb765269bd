//! Retention sweeper
//!
//! Erases messages both participants have hidden. Selection happens in
//! batches until a short batch comes back; a pass over zero eligible rows
//! is a normal, empty result.

use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::visibility::VisibilityManager;

/// Retention sweeper
pub struct RetentionSweeper<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RetentionSweeper<'a> {
    /// Create a new RetentionSweeper
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run one pass, returning how many rows this pass erased
    #[instrument(skip(self))]
    pub async fn sweep(&self) -> ServiceResult<u64> {
        let batch_size = self.ctx.sweep_batch_size();
        let visibility = VisibilityManager::new(self.ctx);
        let mut erased = 0;
        let mut batches = 0;

        loop {
            let ids = self.ctx.message_repo().find_erasable(batch_size).await?;
            let fetched = ids.len();
            batches += 1;

            for id in ids {
                // Already gone (e.g. a concurrent pass) is not counted
                if visibility.force_erase(id).await? {
                    erased += 1;
                }
            }

            if (fetched as i64) < batch_size {
                break;
            }
        }

        if erased > 0 {
            info!(erased, batches, "Retention sweep completed");
        }

        Ok(erased)
    }
}

//! Visibility manager
//!
//! Per-participant soft deletion. Each side owns exactly one hide flag and
//! listings only ever consult the viewer's own flag.

use atelier_core::traits::{MessagePatch, MessageQuery, PatchOutcome};
use atelier_core::value_objects::{is_visible_to, MessageBox, MessageId, UserId, VisibilityFilter};
use atelier_core::DomainError;
use tracing::{debug, info, instrument};

use crate::dto::MessageResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Visibility service
pub struct VisibilityManager<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VisibilityManager<'a> {
    /// Create a new VisibilityManager
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Hide a message from the caller's own view
    pub async fn hide(&self, message_id: MessageId, caller_id: UserId) -> ServiceResult<()> {
        self.hide_tracked(message_id, caller_id).await?;
        Ok(())
    }

    /// Hide, also reporting whether this call raised the flag
    #[instrument(skip(self))]
    pub async fn hide_tracked(&self, message_id: MessageId, caller_id: UserId) -> ServiceResult<PatchOutcome> {
        let repo = self.ctx.message_repo();
        let message = repo
            .find_by_id(message_id)
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;

        // No delivery check: the recipient's flag must be settable on pending
        // and rejected rows, or those rows can never become erasable.
        let participant = message
            .participant(caller_id)
            .ok_or(DomainError::NotParticipant)?;

        if message.is_hidden_for(participant) {
            return Ok(PatchOutcome {
                message,
                changed: false,
            });
        }

        let outcome = repo
            .update_fields(message_id, &MessagePatch::hide(participant))
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;

        debug!(message_id = %message_id, ?participant, "Message hidden");
        Ok(outcome)
    }

    /// The predicate a listing of `mailbox` applies for `viewer_id`
    pub fn visible_filter(&self, viewer_id: UserId, mailbox: MessageBox) -> VisibilityFilter {
        VisibilityFilter::for_viewer(viewer_id, mailbox)
    }

    /// List the viewer's messages in one box, newest first
    #[instrument(skip(self))]
    pub async fn list_visible(
        &self,
        viewer_id: UserId,
        mailbox: MessageBox,
        query: &MessageQuery,
    ) -> ServiceResult<Vec<MessageResponse>> {
        let filter = self.visible_filter(viewer_id, mailbox);
        let messages = self.ctx.message_repo().find_visible(&filter, query).await?;
        Ok(messages.into_iter().map(MessageResponse::from).collect())
    }

    /// Fetch one message as seen by `viewer_id`
    #[instrument(skip(self))]
    pub async fn get_visible(&self, message_id: MessageId, viewer_id: UserId) -> ServiceResult<MessageResponse> {
        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;

        if message.participant(viewer_id).is_none() {
            return Err(DomainError::NotParticipant.into());
        }
        if !is_visible_to(&message, viewer_id) {
            return Err(DomainError::MessageNotFound(message_id).into());
        }

        Ok(MessageResponse::from(message))
    }

    /// Permanently remove a message; only the retention sweeper calls this
    pub(crate) async fn force_erase(&self, message_id: MessageId) -> ServiceResult<bool> {
        let erased = self.ctx.message_repo().erase(message_id).await?;
        if erased {
            info!(message_id = %message_id, "Message erased");
        }
        Ok(erased)
    }
}

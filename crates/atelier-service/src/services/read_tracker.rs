//! Read tracker
//!
//! Recipient-side read receipts. `read_at` is written at most once; repeat
//! calls succeed without touching the row.

use atelier_core::entities::Participant;
use atelier_core::traits::{MessagePatch, PatchOutcome};
use atelier_core::value_objects::{MessageId, UserId};
use atelier_core::DomainError;
use chrono::Utc;
use tracing::{debug, instrument};

use crate::dto::{MessageResponse, UnreadCountResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Read tracking service
pub struct ReadTracker<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReadTracker<'a> {
    /// Create a new ReadTracker
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mark a delivered message as read by its recipient
    pub async fn mark_read(&self, message_id: MessageId, caller_id: UserId) -> ServiceResult<MessageResponse> {
        let outcome = self.mark_read_tracked(message_id, caller_id).await?;
        Ok(MessageResponse::from(outcome.message))
    }

    /// Mark read, also reporting whether this call set `read_at`
    ///
    /// Senders and strangers are refused; an undelivered message is reported
    /// as missing to its recipient.
    #[instrument(skip(self))]
    pub async fn mark_read_tracked(&self, message_id: MessageId, caller_id: UserId) -> ServiceResult<PatchOutcome> {
        let repo = self.ctx.message_repo();
        let message = repo
            .find_by_id(message_id)
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;

        match message.participant(caller_id) {
            Some(Participant::Recipient) => {}
            Some(Participant::Sender) => return Err(DomainError::NotRecipient.into()),
            None => return Err(DomainError::NotParticipant.into()),
        }

        if !message.is_delivered() {
            return Err(DomainError::MessageNotFound(message_id).into());
        }

        if message.is_read() {
            return Ok(PatchOutcome {
                message,
                changed: false,
            });
        }

        // Guarded on Approved; status never leaves Approved, so a miss means the row is gone
        let outcome = repo
            .update_fields(message_id, &MessagePatch::mark_read(Utc::now()))
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;

        debug!(message_id = %message_id, changed = outcome.changed, "Message marked read");
        Ok(outcome)
    }

    /// Count delivered, unread messages the user has not hidden
    #[instrument(skip(self))]
    pub async fn unread_count(&self, user_id: UserId) -> ServiceResult<UnreadCountResponse> {
        let unread_count = self.ctx.message_repo().count_unread(user_id).await?;
        Ok(UnreadCountResponse { unread_count })
    }
}

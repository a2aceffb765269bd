//! Moderation gate
//!
//! Admin decisions on pending messages. A message is decided exactly once:
//! the transition is a compare-and-set on `PendingReview`, so the loser of
//! a concurrent race observes `AlreadyModerated`.

use atelier_core::entities::{Message, ModerationStatus};
use atelier_core::traits::{MessagePatch, MessageQuery, ModerationDecision};
use atelier_core::value_objects::{MessageId, UserId};
use atelier_core::DomainError;
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::{MessageResponse, MAX_REASON_LENGTH};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Moderation service
pub struct ModerationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ModerationService<'a> {
    /// Create a new ModerationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Approve a pending message, delivering it to the recipient
    #[instrument(skip(self))]
    pub async fn approve(&self, message_id: MessageId, admin_id: UserId) -> ServiceResult<MessageResponse> {
        let message = self
            .decide(message_id, admin_id, ModerationStatus::Approved, None)
            .await?;

        info!(message_id = %message_id, admin_id = %admin_id, "Message approved");
        Ok(MessageResponse::from(message))
    }

    /// Reject a pending message with an optional reason
    #[instrument(skip(self, reason))]
    pub async fn reject(
        &self,
        message_id: MessageId,
        admin_id: UserId,
        reason: Option<String>,
    ) -> ServiceResult<MessageResponse> {
        let note = normalize_reason(reason)?;
        let message = self
            .decide(message_id, admin_id, ModerationStatus::Rejected, note)
            .await?;

        info!(message_id = %message_id, admin_id = %admin_id, "Message rejected");
        Ok(MessageResponse::from(message))
    }

    /// List messages awaiting review, oldest first
    #[instrument(skip(self))]
    pub async fn pending_queue(&self, query: &MessageQuery) -> ServiceResult<Vec<MessageResponse>> {
        let messages = self.ctx.message_repo().find_pending(query).await?;
        Ok(messages.into_iter().map(MessageResponse::from).collect())
    }

    async fn decide(
        &self,
        message_id: MessageId,
        admin_id: UserId,
        status: ModerationStatus,
        note: Option<String>,
    ) -> ServiceResult<Message> {
        let patch = MessagePatch::moderate(ModerationDecision {
            status,
            reviewed_by: admin_id,
            reviewed_at: Utc::now(),
            note,
        });

        let repo = self.ctx.message_repo();
        if let Some(outcome) = repo.update_fields(message_id, &patch).await? {
            return Ok(outcome.message);
        }

        // The guarded update matched nothing: tell absence apart from a prior decision
        match repo.find_by_id(message_id).await? {
            Some(current) => Err(DomainError::AlreadyModerated {
                id: message_id,
                status: current.moderation_status,
            }
            .into()),
            None => Err(DomainError::MessageNotFound(message_id).into()),
        }
    }
}

/// Trim the reason; blank becomes `None`
fn normalize_reason(reason: Option<String>) -> Result<Option<String>, DomainError> {
    let Some(reason) = reason else {
        return Ok(None);
    };

    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_REASON_LENGTH {
        return Err(DomainError::InvalidArgument(format!(
            "reason must be at most {MAX_REASON_LENGTH} characters"
        )));
    }

    Ok(Some(trimmed.to_string()))
}

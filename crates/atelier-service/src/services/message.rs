//! Message service
//!
//! Handles sending new direct messages. Every message starts in
//! `PendingReview` and only reaches the recipient once approved.

use atelier_core::entities::Message;
use atelier_core::value_objects::{MessageId, UserId};
use atelier_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{MessageResponse, SendMessageRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a message; it is queued for moderation
    #[instrument(skip(self, request))]
    pub async fn send(&self, sender_id: UserId, request: SendMessageRequest) -> ServiceResult<MessageResponse> {
        let recipient_id = UserId::parse(&request.recipient_id)
            .map_err(|_| DomainError::InvalidArgument("recipientId is not a valid user id".to_string()))?;

        if recipient_id == sender_id {
            return Err(DomainError::SelfMessage.into());
        }

        let subject = non_blank(request.subject, "subject")?;
        let body = non_blank(request.body, "body")?;

        let mut message = Message::new(MessageId::generate(), sender_id, recipient_id, subject, body);
        match (request.context_type, request.context_id) {
            (Some(context_type), Some(context_id)) => {
                message = message.with_context(context_type, context_id);
            }
            (None, None) => {}
            _ => {
                return Err(DomainError::InvalidArgument(
                    "contextType and contextId must be provided together".to_string(),
                )
                .into());
            }
        }

        self.ctx.message_repo().create(&message).await?;

        info!(message_id = %message.id, recipient_id = %recipient_id, "Message queued for review");

        Ok(MessageResponse::from(message))
    }
}

fn non_blank(value: String, field: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidArgument(format!("{field} must not be blank")));
    }
    Ok(trimmed.to_string())
}

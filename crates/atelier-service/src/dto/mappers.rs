//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use atelier_core::entities::Message;

use super::responses::MessageResponse;

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        let (context_type, context_id) = match &message.context {
            Some(ctx) => (Some(ctx.context_type.clone()), Some(ctx.context_id.clone())),
            None => (None, None),
        };

        Self {
            id: message.id.to_string(),
            sender_id: message.sender_id.to_string(),
            recipient_id: message.recipient_id.to_string(),
            context_type,
            context_id,
            subject: message.subject.clone(),
            body: message.body.clone(),
            moderation_status: message.moderation_status,
            tone_score: message.tone_score,
            flagged_reason: message.flagged_reason.clone(),
            reviewed_by: message.reviewed_by.map(|id| id.to_string()),
            reviewed_at: message.reviewed_at,
            review_note: message.review_note.clone(),
            read_at: message.read_at,
            created_at: message.created_at,
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self::from(&message)
    }
}

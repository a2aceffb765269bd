//! Message entity <-> model mapper

use atelier_core::entities::{Message, MessageContext, ModerationStatus};
use atelier_core::error::DomainError;
use atelier_core::value_objects::{MessageId, UserId};

use crate::models::MessageModel;

/// Convert MessageModel to Message entity
///
/// Fails only on an unknown `moderation_status`, which the table constraint rules out.
impl TryFrom<MessageModel> for Message {
    type Error = DomainError;

    fn try_from(model: MessageModel) -> Result<Self, Self::Error> {
        let moderation_status = ModerationStatus::from_db(&model.moderation_status).ok_or_else(|| {
            DomainError::DatabaseError(format!(
                "unknown moderation status '{}' on message {}",
                model.moderation_status, model.id
            ))
        })?;

        let context = match (model.context_type, model.context_id) {
            (Some(context_type), Some(context_id)) => Some(MessageContext {
                context_type,
                context_id,
            }),
            _ => None,
        };

        Ok(Message {
            id: MessageId::from_uuid(model.id),
            sender_id: UserId::from_uuid(model.sender_id),
            recipient_id: UserId::from_uuid(model.recipient_id),
            context,
            subject: model.subject,
            body: model.body,
            moderation_status,
            tone_score: model.tone_score,
            flagged_reason: model.flagged_reason,
            reviewed_by: model.reviewed_by.map(UserId::from_uuid),
            reviewed_at: model.reviewed_at,
            review_note: model.review_note,
            read_at: model.read_at,
            hidden_by_sender: model.hidden_by_sender,
            hidden_by_recipient: model.hidden_by_recipient,
            created_at: model.created_at,
        })
    }
}

/// Convert a batch of rows, failing on the first malformed one
pub fn messages_from_models(models: Vec<MessageModel>) -> Result<Vec<Message>, DomainError> {
    models.into_iter().map(Message::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn model(status: &str) -> MessageModel {
        MessageModel {
            id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            recipient_id: Uuid::new_v4(),
            context_type: Some("artwork".to_string()),
            context_id: Some("canvas-7".to_string()),
            subject: "Hello".to_string(),
            body: "Is this piece framed?".to_string(),
            moderation_status: status.to_string(),
            tone_score: Some(0.92),
            flagged_reason: None,
            reviewed_by: None,
            reviewed_at: None,
            review_note: None,
            read_at: None,
            hidden_by_sender: false,
            hidden_by_recipient: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_to_entity() {
        let row = model("approved");
        let id = row.id;
        let msg = Message::try_from(row).unwrap();

        assert_eq!(msg.id.into_inner(), id);
        assert_eq!(msg.moderation_status, ModerationStatus::Approved);
        assert_eq!(msg.context.unwrap().context_id, "canvas-7");
        assert!(msg.hidden_by_recipient);
        assert!(!msg.hidden_by_sender);
    }

    #[test]
    fn test_partial_context_is_dropped() {
        let mut row = model("pending_review");
        row.context_id = None;
        let msg = Message::try_from(row).unwrap();
        assert!(msg.context.is_none());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result = Message::try_from(model("read"));
        assert!(matches!(result, Err(DomainError::DatabaseError(_))));
    }
}

//! Message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub context_type: Option<String>,
    pub context_id: Option<String>,
    pub subject: String,
    pub body: String,
    pub moderation_status: String,
    pub tone_score: Option<f64>,
    pub flagged_reason: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_note: Option<String>,
    pub read_at: Option<DateTime<Utc>>,
    pub hidden_by_sender: bool,
    pub hidden_by_recipient: bool,
    pub created_at: DateTime<Utc>,
}

impl MessageModel {
    /// Check if both participants have hidden the message
    #[inline]
    pub fn is_erasable(&self) -> bool {
        self.hidden_by_sender && self.hidden_by_recipient
    }
}

/// Row returned by the conditional update, carrying the change marker
#[derive(Debug, Clone, FromRow)]
pub struct PatchedMessageModel {
    #[sqlx(flatten)]
    pub message: MessageModel,
    pub changed: bool,
}

//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those with field constraints also
//! implement `Validate`.

use atelier_core::traits::MessageQuery;
use atelier_core::value_objects::MessageBox;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

/// Upper bound on ids accepted by a bulk request
pub const MAX_BATCH_SIZE: usize = 1000;

/// Upper bound on a rejection reason, in characters
pub const MAX_REASON_LENGTH: usize = 500;

// ============================================================================
// Message Requests
// ============================================================================

/// Send a direct message
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub recipient_id: String,

    #[validate(length(min = 1, max = 200, message = "Subject must be 1-200 characters"))]
    pub subject: String,

    #[validate(length(min = 1, max = 5000, message = "Body must be 1-5000 characters"))]
    pub body: String,

    #[validate(length(min = 1, max = 50, message = "Context type must be 1-50 characters"))]
    pub context_type: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Context id must be 1-100 characters"))]
    pub context_id: Option<String>,
}

/// Reject a pending message
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectMessageRequest {
    /// Optional note recorded with the decision
    pub reason: Option<String>,
}

/// How a participant removes a message from their view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteStrategy {
    /// Raise the caller's hide flag; the row is erased once both sides hid it
    #[default]
    Soft,
}

/// Delete (hide) a single message
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMessageRequest {
    #[serde(default)]
    pub strategy: DeleteStrategy,
}

/// Mark many messages as read
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkReadRequest {
    #[validate(length(min = 1, max = 1000, message = "messageIds must contain 1-1000 ids"))]
    pub message_ids: Vec<String>,
}

/// Delete (hide) many messages
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequest {
    #[validate(length(min = 1, max = 1000, message = "messageIds must contain 1-1000 ids"))]
    pub message_ids: Vec<String>,

    #[serde(default)]
    pub strategy: DeleteStrategy,
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Listing parameters for `GET /messages`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMessagesParams {
    #[serde(rename = "box", default)]
    pub mailbox: MessageBox,
    pub before: Option<DateTime<Utc>>,
    pub after: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

impl ListMessagesParams {
    pub fn query(&self) -> MessageQuery {
        page_query(self.before, self.after, self.limit)
    }
}

/// Cursor parameters for the moderation queue
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueueParams {
    pub before: Option<DateTime<Utc>>,
    pub after: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

impl QueueParams {
    pub fn query(&self) -> MessageQuery {
        page_query(self.before, self.after, self.limit)
    }
}

fn page_query(before: Option<DateTime<Utc>>, after: Option<DateTime<Utc>>, limit: Option<i64>) -> MessageQuery {
    MessageQuery {
        before,
        after,
        limit: limit.unwrap_or(50),
    }
}

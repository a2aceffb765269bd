//! Test fixtures and wire types
//!
//! Mirrors the JSON the API speaks, independent of the server's own DTOs.

use atelier_core::UserId;
use serde::{Deserialize, Serialize};

/// Body of `POST /messages`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessage {
    pub recipient_id: String,
    pub subject: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
}

impl SendMessage {
    pub fn to(recipient: UserId) -> Self {
        Self {
            recipient_id: recipient.to_string(),
            subject: "Commission inquiry".to_string(),
            body: "Do you take commissions for large murals?".to_string(),
            context_type: Some("artwork".to_string()),
            context_id: Some("mural-22".to_string()),
        }
    }
}

/// A message as returned by the API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub subject: String,
    pub moderation_status: String,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<String>,
    pub review_note: Option<String>,
    pub read_at: Option<String>,
    pub context_id: Option<String>,
}

/// Body of the bulk endpoints
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkIds {
    pub message_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

impl BulkIds {
    pub fn of(ids: &[&str]) -> Self {
        Self {
            message_ids: ids.iter().map(ToString::to_string).collect(),
            strategy: None,
        }
    }
}

/// Body of `POST /messages/:id/reject`
#[derive(Debug, Serialize)]
pub struct Reject {
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Updated {
    pub updated: u64,
}

#[derive(Debug, Deserialize)]
pub struct Deleted {
    pub deleted: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCount {
    pub unread_count: i64,
}

/// `{"error": {...}}` envelope
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` with camelCase keys.

use chrono::{DateTime, Utc};
use serde::Serialize;

use atelier_core::entities::ModerationStatus;

// ============================================================================
// Message Responses
// ============================================================================

/// Message as returned to participants and moderators
///
/// Hide flags are never serialized: one participant hiding a message must not
/// be observable by the other.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
    pub subject: String,
    pub body: String,
    pub moderation_status: ModerationStatus,
    pub tone_score: Option<f64>,
    pub flagged_reason: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_note: Option<String>,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Result of `PATCH /messages/read-bulk`
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BulkUpdatedResponse {
    pub updated: u64,
}

/// Result of `POST /messages/delete-bulk`
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BulkDeletedResponse {
    pub deleted: u64,
}

/// Result of `GET /messages/unread-count`
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

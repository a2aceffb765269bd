//! Route definitions

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{health, messages};
use crate::state::AppState;

/// Create the API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().merge(message_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Message lifecycle routes
///
/// Static segments (`read-bulk`, `delete-bulk`, `unread-count`,
/// `moderation-queue`) take precedence over `:id`.
fn message_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/messages",
            post(messages::send_message).get(messages::list_messages),
        )
        .route("/messages/read-bulk", patch(messages::mark_read_bulk))
        .route("/messages/delete-bulk", post(messages::delete_bulk))
        .route("/messages/unread-count", get(messages::unread_count))
        .route("/messages/moderation-queue", get(messages::moderation_queue))
        .route(
            "/messages/:id",
            get(messages::get_message).delete(messages::delete_message),
        )
        .route("/messages/:id/approve", post(messages::approve_message))
        .route("/messages/:id/reject", post(messages::reject_message))
        .route("/messages/:id/read", patch(messages::mark_read))
}

//! Message handlers
//!
//! Endpoints for the direct-message lifecycle. Handlers only translate HTTP
//! into service calls; every rule lives in `atelier-service`.

use axum::{extract::State, Json};
use atelier_service::dto::{
    BulkDeleteRequest, BulkDeletedResponse, BulkReadRequest, BulkUpdatedResponse,
    DeleteMessageRequest, DeleteStrategy, ListMessagesParams, MessageResponse, QueueParams,
    RejectMessageRequest, SendMessageRequest, UnreadCountResponse,
};
use atelier_service::{
    BulkOperationGuard, MessageService, ModerationService, ReadTracker, VisibilityManager,
};

use crate::extractors::{AdminUser, AuthUser, MessageIdPath, OptionalJson, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Send a message; it waits for moderation before delivery
///
/// POST /messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let response = MessageService::new(state.service_context())
        .send(auth.user_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// List the caller's inbox or sent box, newest first
///
/// GET /messages?box=inbox|sent&before&after&limit
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(params): QueryParams<ListMessagesParams>,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let messages = VisibilityManager::new(state.service_context())
        .list_visible(auth.user_id, params.mailbox, &params.query())
        .await?;
    Ok(Json(messages))
}

/// Get one message as the caller sees it
///
/// GET /messages/{id}
pub async fn get_message(
    State(state): State<AppState>,
    auth: AuthUser,
    MessageIdPath(message_id): MessageIdPath,
) -> ApiResult<Json<MessageResponse>> {
    let response = VisibilityManager::new(state.service_context())
        .get_visible(message_id, auth.user_id)
        .await?;
    Ok(Json(response))
}

/// Approve a pending message
///
/// POST /messages/{id}/approve
pub async fn approve_message(
    State(state): State<AppState>,
    admin: AdminUser,
    MessageIdPath(message_id): MessageIdPath,
) -> ApiResult<Json<MessageResponse>> {
    let response = ModerationService::new(state.service_context())
        .approve(message_id, admin.user_id())
        .await?;
    Ok(Json(response))
}

/// Reject a pending message
///
/// POST /messages/{id}/reject
pub async fn reject_message(
    State(state): State<AppState>,
    admin: AdminUser,
    MessageIdPath(message_id): MessageIdPath,
    OptionalJson(request): OptionalJson<RejectMessageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let response = ModerationService::new(state.service_context())
        .reject(message_id, admin.user_id(), request.reason)
        .await?;
    Ok(Json(response))
}

/// Messages awaiting review, oldest first
///
/// GET /messages/moderation-queue?before&after&limit
pub async fn moderation_queue(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(params): QueryParams<QueueParams>,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let messages = ModerationService::new(state.service_context())
        .pending_queue(&params.query())
        .await?;
    Ok(Json(messages))
}

/// Mark a message read
///
/// PATCH /messages/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    MessageIdPath(message_id): MessageIdPath,
) -> ApiResult<Json<MessageResponse>> {
    let response = ReadTracker::new(state.service_context())
        .mark_read(message_id, auth.user_id)
        .await?;
    Ok(Json(response))
}

/// Mark many messages read
///
/// PATCH /messages/read-bulk
pub async fn mark_read_bulk(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<BulkReadRequest>,
) -> ApiResult<Json<BulkUpdatedResponse>> {
    let response = BulkOperationGuard::new(state.service_context())
        .mark_read_bulk(auth.user_id, &request.message_ids)
        .await?;
    Ok(Json(response))
}

/// Remove a message from the caller's view
///
/// DELETE /messages/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    auth: AuthUser,
    MessageIdPath(message_id): MessageIdPath,
    OptionalJson(request): OptionalJson<DeleteMessageRequest>,
) -> ApiResult<NoContent> {
    let visibility = VisibilityManager::new(state.service_context());
    match request.strategy {
        DeleteStrategy::Soft => visibility.hide(message_id, auth.user_id).await?,
    }
    Ok(NoContent)
}

/// Remove many messages from the caller's view
///
/// POST /messages/delete-bulk
pub async fn delete_bulk(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<BulkDeleteRequest>,
) -> ApiResult<Json<BulkDeletedResponse>> {
    let guard = BulkOperationGuard::new(state.service_context());
    let response = match request.strategy {
        DeleteStrategy::Soft => guard.hide_bulk(auth.user_id, &request.message_ids).await?,
    };
    Ok(Json(response))
}

/// Count the caller's unread inbox messages
///
/// GET /messages/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UnreadCountResponse>> {
    let response = ReadTracker::new(state.service_context())
        .unread_count(auth.user_id)
        .await?;
    Ok(Json(response))
}

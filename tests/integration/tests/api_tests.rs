//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use atelier_core::{MessageId, UserId};
use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

async fn send_approved(server: &TestServer, sender: UserId, recipient: UserId) -> MessageView {
    let token = server.user_token(sender).unwrap();
    let response = server
        .post_auth("/messages", &token, &SendMessage::to(recipient))
        .await
        .unwrap();
    let sent: MessageView = assert_json(response, StatusCode::CREATED).await.unwrap();

    let admin = server.admin_token().unwrap();
    let response = server
        .post_empty(&format!("/messages/{}/approve", sent.id), &admin)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Send & Moderation
// ============================================================================

#[tokio::test]
async fn test_pending_message_is_not_delivered() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let sender = UserId::generate();
    let recipient = UserId::generate();
    let sender_token = server.user_token(sender).unwrap();
    let recipient_token = server.user_token(recipient).unwrap();

    let response = server
        .post_auth("/messages", &sender_token, &SendMessage::to(recipient))
        .await
        .unwrap();
    let sent: MessageView = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(sent.moderation_status, "pendingReview");
    assert_eq!(sent.sender_id, sender.to_string());
    assert_eq!(sent.context_id.as_deref(), Some("mural-22"));

    // Sender sees it in their sent box, recipient sees nothing
    let response = server.get_auth("/messages?box=sent", &sender_token).await.unwrap();
    let sent_box: Vec<MessageView> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(sent_box.len(), 1);

    let response = server.get_auth("/messages?box=inbox", &recipient_token).await.unwrap();
    let inbox: Vec<MessageView> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(inbox.is_empty());

    let response = server
        .get_auth(&format!("/messages/{}", sent.id), &recipient_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .patch_empty(&format!("/messages/{}/read", sent.id), &recipient_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // It sits in the moderation queue
    let admin = server.admin_token().unwrap();
    let response = server
        .get_auth("/messages/moderation-queue?limit=100", &admin)
        .await
        .unwrap();
    let queue: Vec<MessageView> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(queue.iter().all(|m| m.moderation_status == "pendingReview"));
}

#[tokio::test]
async fn test_send_to_self_is_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = UserId::generate();
    let token = server.user_token(user).unwrap();

    let response = server
        .post_auth("/messages", &token, &SendMessage::to(user))
        .await
        .unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope.error.code, "SELF_MESSAGE");
}

#[tokio::test]
async fn test_second_moderation_decision_conflicts() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let approved = send_approved(&server, UserId::generate(), UserId::generate()).await;
    assert_eq!(approved.moderation_status, "approved");
    assert!(approved.reviewed_by.is_some());
    assert!(approved.reviewed_at.is_some());

    let admin = server.admin_token().unwrap();
    let response = server
        .post_auth(
            &format!("/messages/{}/reject", approved.id),
            &admin,
            &Reject {
                reason: Some("Spam".to_string()),
            },
        )
        .await
        .unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(envelope.error.code, "ALREADY_MODERATED");

    let response = server
        .post_empty(&format!("/messages/{}/approve", MessageId::generate()), &admin)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_reject_records_reason() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let sender_token = server.user_token(UserId::generate()).unwrap();
    let response = server
        .post_auth("/messages", &sender_token, &SendMessage::to(UserId::generate()))
        .await
        .unwrap();
    let sent: MessageView = assert_json(response, StatusCode::CREATED).await.unwrap();

    let admin = server.admin_token().unwrap();
    let response = server
        .post_auth(
            &format!("/messages/{}/reject", sent.id),
            &admin,
            &Reject {
                reason: Some("  Shares a phone number  ".to_string()),
            },
        )
        .await
        .unwrap();
    let rejected: MessageView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rejected.moderation_status, "rejected");
    assert_eq!(rejected.review_note.as_deref(), Some("Shares a phone number"));
}

#[tokio::test]
async fn test_non_admin_cannot_moderate() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.user_token(UserId::generate()).unwrap();

    let response = server.get_auth("/messages/moderation-queue", &token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.get("/messages/unread-count").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Read tracking
// ============================================================================

#[tokio::test]
async fn test_mark_read_is_idempotent() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let sender = UserId::generate();
    let recipient = UserId::generate();
    let message = send_approved(&server, sender, recipient).await;
    let recipient_token = server.user_token(recipient).unwrap();
    let sender_token = server.user_token(sender).unwrap();
    let path = format!("/messages/{}/read", message.id);

    let response = server.get_auth("/messages/unread-count", &recipient_token).await.unwrap();
    let count: UnreadCount = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.unread_count, 1);

    let response = server.patch_empty(&path, &recipient_token).await.unwrap();
    let first: MessageView = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(first.read_at.is_some());

    let response = server.patch_empty(&path, &recipient_token).await.unwrap();
    let second: MessageView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(second.read_at, first.read_at);

    // Only the recipient may mark it read
    let response = server.patch_empty(&path, &sender_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.get_auth("/messages/unread-count", &recipient_token).await.unwrap();
    let count: UnreadCount = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.unread_count, 0);
}

#[tokio::test]
async fn test_read_bulk_counts_only_own_messages() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let caller = UserId::generate();
    let m1 = send_approved(&server, UserId::generate(), caller).await;
    let m2 = send_approved(&server, UserId::generate(), UserId::generate()).await;
    let m3 = send_approved(&server, UserId::generate(), caller).await;
    let token = server.user_token(caller).unwrap();

    let response = server
        .patch_auth(
            "/messages/read-bulk",
            &token,
            &BulkIds::of(&[&m1.id, &m2.id, &m3.id]),
        )
        .await
        .unwrap();
    let result: Updated = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.updated, 2);

    let response = server
        .patch_auth("/messages/read-bulk", &token, &BulkIds::of(&[]))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Visibility & retention
// ============================================================================

#[tokio::test]
async fn test_delete_hides_for_caller_only() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let sender = UserId::generate();
    let recipient = UserId::generate();
    let message = send_approved(&server, sender, recipient).await;
    let sender_token = server.user_token(sender).unwrap();
    let recipient_token = server.user_token(recipient).unwrap();
    let path = format!("/messages/{}", message.id);

    let response = server.delete_auth(&path, &sender_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Repeating is not an error
    let response = server.delete_auth(&path, &sender_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth(&path, &sender_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_auth(&path, &recipient_token).await.unwrap();
    let view: MessageView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(view.id, message.id);

    let stranger = server.user_token(UserId::generate()).unwrap();
    let response = server.delete_auth(&path, &stranger).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_delete_bulk() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = UserId::generate();
    let other = UserId::generate();
    let received = send_approved(&server, other, user).await;
    let sent = send_approved(&server, user, other).await;
    let foreign = send_approved(&server, other, UserId::generate()).await;
    let token = server.user_token(user).unwrap();

    let mut body = BulkIds::of(&[&received.id, &sent.id, &foreign.id, &received.id]);
    body.strategy = Some("soft".to_string());

    let response = server.post_auth("/messages/delete-bulk", &token, &body).await.unwrap();
    let result: Deleted = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.deleted, 2);

    let response = server.get_auth("/messages?box=inbox", &token).await.unwrap();
    let inbox: Vec<MessageView> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(inbox.is_empty());
}

//! Shared fixtures for service tests
//!
//! `InMemoryMessageRepository` applies `MessagePatch::apply`, the same
//! semantics the PostgreSQL statement implements.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use atelier_core::entities::{Message, ModerationStatus};
use atelier_core::traits::{MessagePatch, MessageQuery, MessageRepository, PatchOutcome, RepoResult};
use atelier_core::value_objects::{MessageId, UserId, VisibilityFilter};
use atelier_core::DomainError;
use atelier_service::ServiceContext;

#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: RwLock<HashMap<MessageId, Message>>,
    unavailable: AtomicBool,
    /// Fail once this many further `update_fields` calls have succeeded
    fail_updates_after: RwLock<Option<usize>>,
    updates: AtomicUsize,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, message: Message) {
        self.messages.write().insert(message.id, message);
    }

    pub fn get(&self, id: MessageId) -> Option<Message> {
        self.messages.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    /// Make every call fail as if the pool timed out
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Let `n` more updates through, then fail the rest
    pub fn fail_updates_after(&self, n: usize) {
        self.updates.store(0, Ordering::SeqCst);
        *self.fail_updates_after.write() = Some(n);
    }

    fn check_available(&self) -> RepoResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::StorageUnavailable("pool timed out".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn find_by_id(&self, id: MessageId) -> RepoResult<Option<Message>> {
        self.check_available()?;
        Ok(self.get(id))
    }

    async fn create(&self, message: &Message) -> RepoResult<()> {
        self.check_available()?;
        self.insert(message.clone());
        Ok(())
    }

    async fn update_fields(&self, id: MessageId, patch: &MessagePatch) -> RepoResult<Option<PatchOutcome>> {
        self.check_available()?;
        if let Some(limit) = *self.fail_updates_after.read() {
            if self.updates.fetch_add(1, Ordering::SeqCst) >= limit {
                return Err(DomainError::StorageUnavailable("connection reset".to_string()));
            }
        }

        let mut messages = self.messages.write();
        let Some(message) = messages.get_mut(&id) else {
            return Ok(None);
        };

        Ok(patch.apply(message).map(|changed| PatchOutcome {
            message: message.clone(),
            changed,
        }))
    }

    async fn find_visible(&self, filter: &VisibilityFilter, query: &MessageQuery) -> RepoResult<Vec<Message>> {
        self.check_available()?;
        let mut found: Vec<Message> = self
            .messages
            .read()
            .values()
            .filter(|m| filter.matches(m) && query.contains(m.created_at))
            .cloned()
            .collect();

        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        found.truncate(query.effective_limit() as usize);
        Ok(found)
    }

    async fn find_pending(&self, query: &MessageQuery) -> RepoResult<Vec<Message>> {
        self.check_available()?;
        let mut found: Vec<Message> = self
            .messages
            .read()
            .values()
            .filter(|m| m.moderation_status == ModerationStatus::PendingReview && query.contains(m.created_at))
            .cloned()
            .collect();

        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        found.truncate(query.effective_limit() as usize);
        Ok(found)
    }

    async fn count_unread(&self, recipient: UserId) -> RepoResult<i64> {
        self.check_available()?;
        let count = self
            .messages
            .read()
            .values()
            .filter(|m| {
                m.recipient_id == recipient && m.is_delivered() && !m.is_read() && !m.hidden_by_recipient
            })
            .count();
        Ok(count as i64)
    }

    async fn find_erasable(&self, limit: i64) -> RepoResult<Vec<MessageId>> {
        self.check_available()?;
        let messages = self.messages.read();
        let mut erasable: Vec<&Message> = messages.values().filter(|m| m.is_erasable()).collect();
        erasable.sort_by_key(|m| m.created_at);
        Ok(erasable
            .into_iter()
            .take(limit.max(1) as usize)
            .map(|m| m.id)
            .collect())
    }

    async fn erase(&self, id: MessageId) -> RepoResult<bool> {
        self.check_available()?;
        Ok(self.messages.write().remove(&id).is_some())
    }

    async fn ping(&self) -> RepoResult<()> {
        self.check_available()
    }
}

/// A repository plus a context wired to it
pub struct Harness {
    pub repo: Arc<InMemoryMessageRepository>,
    pub ctx: ServiceContext,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_batch_size(atelier_service::services::DEFAULT_SWEEP_BATCH_SIZE)
    }

    pub fn with_batch_size(batch_size: i64) -> Self {
        let repo = Arc::new(InMemoryMessageRepository::new());
        let ctx = ServiceContext::builder()
            .message_repo(repo.clone())
            .sweep_batch_size(batch_size)
            .build()
            .unwrap();
        Self { repo, ctx }
    }

    /// Seed a message from `sender` to `recipient` in the given state
    pub fn seed(&self, sender: UserId, recipient: UserId, status: ModerationStatus) -> Message {
        let mut message = Message::new(
            MessageId::generate(),
            sender,
            recipient,
            "About your print".to_string(),
            "Is the limited edition still available?".to_string(),
        );
        message.moderation_status = status;
        if status != ModerationStatus::PendingReview {
            message.reviewed_by = Some(UserId::generate());
            message.reviewed_at = Some(message.created_at);
        }
        self.repo.insert(message.clone());
        message
    }

    pub fn seed_approved(&self, sender: UserId, recipient: UserId) -> Message {
        self.seed(sender, recipient, ModerationStatus::Approved)
    }
}

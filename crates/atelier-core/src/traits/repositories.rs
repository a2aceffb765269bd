//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Message, ModerationStatus, Participant};
use crate::error::DomainError;
use crate::value_objects::{MessageId, UserId, VisibilityFilter};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Cursor pagination options for message listings
#[derive(Debug, Clone, Default)]
pub struct MessageQuery {
    /// Only return messages created strictly before this instant
    pub before: Option<DateTime<Utc>>,
    /// Only return messages created strictly after this instant
    pub after: Option<DateTime<Utc>>,
    pub limit: i64,
}

impl MessageQuery {
    pub const MAX_LIMIT: i64 = 100;

    /// Limit clamped to the accepted range
    pub fn effective_limit(&self) -> i64 {
        self.limit.clamp(1, Self::MAX_LIMIT)
    }

    /// Check whether `created_at` falls inside the cursor window
    pub fn contains(&self, created_at: DateTime<Utc>) -> bool {
        self.before.is_none_or(|before| created_at < before)
            && self.after.is_none_or(|after| created_at > after)
    }
}

/// An admin decision written together with the moderation transition
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationDecision {
    pub status: ModerationStatus,
    pub reviewed_by: UserId,
    pub reviewed_at: DateTime<Utc>,
    pub note: Option<String>,
}

/// Partial field update applied by a single conditional statement
///
/// Every write is monotonic: `read_at` only fills a null column and the
/// hide flags are OR-ed in, so replaying a patch never regresses state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessagePatch {
    /// Apply the patch only while the row is in this moderation state
    pub expected_status: Option<ModerationStatus>,
    pub moderation: Option<ModerationDecision>,
    pub read_at: Option<DateTime<Utc>>,
    pub hide_for_sender: bool,
    pub hide_for_recipient: bool,
}

impl MessagePatch {
    /// Compare-and-set moderation transition out of `PendingReview`
    pub fn moderate(decision: ModerationDecision) -> Self {
        Self {
            expected_status: Some(ModerationStatus::PendingReview),
            moderation: Some(decision),
            ..Self::default()
        }
    }

    /// Set `read_at` if still null; only lands on approved messages
    pub fn mark_read(at: DateTime<Utc>) -> Self {
        Self {
            expected_status: Some(ModerationStatus::Approved),
            read_at: Some(at),
            ..Self::default()
        }
    }

    /// Raise the hide flag belonging to `participant`
    pub fn hide(participant: Participant) -> Self {
        Self {
            hide_for_sender: participant == Participant::Sender,
            hide_for_recipient: participant == Participant::Recipient,
            ..Self::default()
        }
    }

    /// Apply the patch to an in-memory message, returning whether anything changed
    ///
    /// Mirrors the SQL statement so alternative stores share the exact semantics.
    /// Returns `None` when the status guard does not hold.
    pub fn apply(&self, message: &mut Message) -> Option<bool> {
        if let Some(expected) = self.expected_status {
            if message.moderation_status != expected {
                return None;
            }
        }

        let before = message.clone();

        if let Some(decision) = &self.moderation {
            message.moderation_status = decision.status;
            message.reviewed_by = Some(decision.reviewed_by);
            message.reviewed_at = Some(decision.reviewed_at);
            message.review_note.clone_from(&decision.note);
        }
        if message.read_at.is_none() {
            message.read_at = self.read_at;
        }
        message.hidden_by_sender |= self.hide_for_sender;
        message.hidden_by_recipient |= self.hide_for_recipient;

        Some(*message != before)
    }
}

/// Result of a successful conditional update
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    /// Row state after the statement
    pub message: Message,
    /// Whether the statement actually changed any column
    pub changed: bool,
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID
    async fn find_by_id(&self, id: MessageId) -> RepoResult<Option<Message>>;

    /// Persist a newly sent message
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Apply a partial update as one atomic conditional statement
    ///
    /// Returns `None` when no row matched, either because the message does
    /// not exist or because `expected_status` did not hold.
    async fn update_fields(&self, id: MessageId, patch: &MessagePatch) -> RepoResult<Option<PatchOutcome>>;

    /// List messages visible under `filter` inside the cursor window, newest first
    async fn find_visible(&self, filter: &VisibilityFilter, query: &MessageQuery) -> RepoResult<Vec<Message>>;

    /// List messages awaiting moderation inside the cursor window, oldest first
    async fn find_pending(&self, query: &MessageQuery) -> RepoResult<Vec<Message>>;

    /// Count approved, unread messages addressed to `recipient` and not hidden by them
    async fn count_unread(&self, recipient: UserId) -> RepoResult<i64>;

    /// Ids of messages hidden by both participants
    async fn find_erasable(&self, limit: i64) -> RepoResult<Vec<MessageId>>;

    /// Permanently remove a message, unconditionally
    ///
    /// Returns `false` when the row was already gone.
    async fn erase(&self, id: MessageId) -> RepoResult<bool>;

    /// Check that the underlying store is reachable
    async fn ping(&self) -> RepoResult<()>;
}

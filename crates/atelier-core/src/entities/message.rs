//! Message entity - a direct message between two users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{MessageId, UserId};

/// Admin-reviewed lifecycle stage of a message
///
/// Transitions only once, from `PendingReview` to one of the decided states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ModerationStatus {
    #[default]
    PendingReview,
    Approved,
    Rejected,
}

impl ModerationStatus {
    /// Storage representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingReview => "pending_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parse the storage representation
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "pending_review" => Some(Self::PendingReview),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Whether an admin has already decided this message
    #[inline]
    pub const fn is_decided(self) -> bool {
        !matches!(self, Self::PendingReview)
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a conversation a user is on for a given message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Participant {
    Sender,
    Recipient,
}

/// Optional reference to the thing a message is about (e.g. an artwork)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub context_type: String,
    pub context_id: String,
}

/// Direct message entity
///
/// Holds the full state tuple: moderation, read status and the two
/// independent per-participant visibility flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub recipient_id: UserId,
    pub context: Option<MessageContext>,
    pub subject: String,
    pub body: String,
    pub moderation_status: ModerationStatus,
    pub tone_score: Option<f64>,
    pub flagged_reason: Option<String>,
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_note: Option<String>,
    pub read_at: Option<DateTime<Utc>>,
    pub hidden_by_sender: bool,
    pub hidden_by_recipient: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new message awaiting moderation
    pub fn new(
        id: MessageId,
        sender_id: UserId,
        recipient_id: UserId,
        subject: String,
        body: String,
    ) -> Self {
        Self {
            id,
            sender_id,
            recipient_id,
            context: None,
            subject,
            body,
            moderation_status: ModerationStatus::PendingReview,
            tone_score: None,
            flagged_reason: None,
            reviewed_by: None,
            reviewed_at: None,
            review_note: None,
            read_at: None,
            hidden_by_sender: false,
            hidden_by_recipient: false,
            created_at: Utc::now(),
        }
    }

    /// Attach the subject this message refers to
    pub fn with_context(mut self, context_type: String, context_id: String) -> Self {
        self.context = Some(MessageContext {
            context_type,
            context_id,
        });
        self
    }

    /// Attach moderation-assist metadata computed at send time
    pub fn with_assessment(mut self, tone_score: Option<f64>, flagged_reason: Option<String>) -> Self {
        self.tone_score = tone_score;
        self.flagged_reason = flagged_reason;
        self
    }

    /// Resolve which participant `user_id` is, if any
    pub fn participant(&self, user_id: UserId) -> Option<Participant> {
        if user_id == self.sender_id {
            Some(Participant::Sender)
        } else if user_id == self.recipient_id {
            Some(Participant::Recipient)
        } else {
            None
        }
    }

    /// Check if the message has been approved for delivery
    #[inline]
    pub fn is_delivered(&self) -> bool {
        self.moderation_status == ModerationStatus::Approved
    }

    /// Check if the recipient has read the message
    #[inline]
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    /// Check if the given participant has hidden the message from their view
    pub fn is_hidden_for(&self, participant: Participant) -> bool {
        match participant {
            Participant::Sender => self.hidden_by_sender,
            Participant::Recipient => self.hidden_by_recipient,
        }
    }

    /// A message may be erased only once both participants released it
    #[inline]
    pub fn is_erasable(&self) -> bool {
        self.hidden_by_sender && self.hidden_by_recipient
    }
}

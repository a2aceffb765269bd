//! Per-viewer visibility predicate
//!
//! A listing is always computed for one viewer looking at one side of their
//! conversations. The predicate only ever reads the viewer's own hide flag,
//! so one participant hiding a message is never observable by the other.

use serde::Deserialize;

use crate::entities::{Message, ModerationStatus, Participant};

use super::UserId;

/// Which side of their conversations a viewer is listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageBox {
    /// Messages addressed to the viewer
    #[default]
    Inbox,
    /// Messages the viewer sent
    Sent,
}

impl MessageBox {
    /// The participant role the viewer plays in this box
    pub const fn participant(self) -> Participant {
        match self {
            Self::Inbox => Participant::Recipient,
            Self::Sent => Participant::Sender,
        }
    }
}

/// Predicate a list query must apply for one viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityFilter {
    pub viewer_id: UserId,
    pub side: Participant,
    /// Only messages in this moderation state are listed, if set
    pub required_status: Option<ModerationStatus>,
}

impl VisibilityFilter {
    /// Build the filter for a viewer listing one of their boxes
    ///
    /// The inbox only contains delivered (approved) messages; senders see
    /// their own messages in every moderation state.
    pub fn for_viewer(viewer_id: UserId, mailbox: MessageBox) -> Self {
        let side = mailbox.participant();
        let required_status = match side {
            Participant::Recipient => Some(ModerationStatus::Approved),
            Participant::Sender => None,
        };

        Self {
            viewer_id,
            side,
            required_status,
        }
    }

    /// Evaluate the predicate against a message
    pub fn matches(&self, message: &Message) -> bool {
        let owner = match self.side {
            Participant::Sender => message.sender_id,
            Participant::Recipient => message.recipient_id,
        };

        owner == self.viewer_id
            && !message.is_hidden_for(self.side)
            && self
                .required_status
                .is_none_or(|status| message.moderation_status == status)
    }
}

/// Whether `viewer_id` may currently see `message` at all
///
/// Used for single-message reads: a sender sees it until they hide it, a
/// recipient only once it is delivered and until they hide it.
pub fn is_visible_to(message: &Message, viewer_id: UserId) -> bool {
    match message.participant(viewer_id) {
        Some(Participant::Sender) => !message.hidden_by_sender,
        Some(Participant::Recipient) => message.is_delivered() && !message.hidden_by_recipient,
        None => false,
    }
}

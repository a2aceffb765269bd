//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::ModerationStatus;
use crate::value_objects::MessageId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Batch must contain between 1 and {max} message ids, got {len}")]
    BatchSizeOutOfRange { len: usize, max: usize },

    #[error("Cannot send a message to yourself")]
    SelfMessage,

    #[error("{field} too long: max {max} characters")]
    ContentTooLong { field: &'static str, max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not a participant of this message")]
    NotParticipant,

    #[error("Only the recipient can mark a message as read")]
    NotRecipient,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Message {id} has already been moderated ({status})")]
    AlreadyModerated {
        id: MessageId,
        status: ModerationStatus,
    },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",

            // Validation
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::BatchSizeOutOfRange { .. } => "BATCH_SIZE_OUT_OF_RANGE",
            Self::SelfMessage => "SELF_MESSAGE",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Authorization
            Self::NotParticipant => "NOT_MESSAGE_PARTICIPANT",
            Self::NotRecipient => "NOT_MESSAGE_RECIPIENT",

            // Conflict
            Self::AlreadyModerated { .. } => "ALREADY_MODERATED",

            // Infrastructure
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MessageNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_)
                | Self::BatchSizeOutOfRange { .. }
                | Self::SelfMessage
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotParticipant | Self::NotRecipient)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyModerated { .. })
    }

    /// Check if the caller may retry the operation later
    ///
    /// Only storage-level availability failures qualify; domain outcomes are terminal.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }

    /// Map to the HTTP status code used by the API layer
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_authorization() {
            403
        } else if self.is_validation() {
            400
        } else if self.is_conflict() {
            409
        } else if self.is_transient() {
            503
        } else {
            500
        }
    }
}

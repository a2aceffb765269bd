//! # atelier-core
//!
//! Domain layer for direct messaging: the message entity, value objects,
//! the visibility predicate and the repository port.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Message, MessageContext, ModerationStatus, Participant};
pub use error::DomainError;
pub use traits::{
    MessagePatch, MessageQuery, MessageRepository, ModerationDecision, PatchOutcome, RepoResult,
};
pub use value_objects::{
    is_visible_to, IdParseError, MessageBox, MessageId, UserId, VisibilityFilter,
};

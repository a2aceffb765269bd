//! Domain entities - core business objects

mod message;

pub use message::{Message, MessageContext, ModerationStatus, Participant};

//! Database models - SQLx-compatible structs for PostgreSQL tables

mod message;

pub use message::{MessageModel, PatchedMessageModel};

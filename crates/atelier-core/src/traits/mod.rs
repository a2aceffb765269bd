//! Ports implemented by the infrastructure layer

mod repositories;

pub use repositories::{
    MessagePatch, MessageQuery, MessageRepository, ModerationDecision, PatchOutcome, RepoResult,
};

//! Entity <-> model mappers

mod message;

pub use message::messages_from_models;

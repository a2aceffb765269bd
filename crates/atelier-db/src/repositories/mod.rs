//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in atelier-core.

mod error;
mod message;

pub use error::map_db_error;
pub use message::PgMessageRepository;

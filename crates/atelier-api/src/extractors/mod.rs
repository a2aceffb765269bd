//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and query strings.

mod auth;
mod path;
mod query;
mod validated;

pub use auth::{AdminUser, AuthUser};
pub use path::MessageIdPath;
pub use query::QueryParams;
pub use validated::{OptionalJson, ValidatedJson};

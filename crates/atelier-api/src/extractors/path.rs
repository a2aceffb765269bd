//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use atelier_core::MessageId;

use crate::response::ApiError;

/// The `:id` segment of `/messages/:id/...`, parsed as a message id
#[derive(Debug, Clone, Copy)]
pub struct MessageIdPath(pub MessageId);

#[async_trait]
impl<S> FromRequestParts<S> for MessageIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        let id = MessageId::parse(&raw).map_err(|_| ApiError::invalid_path("Invalid message id format"))?;

        Ok(MessageIdPath(id))
    }
}

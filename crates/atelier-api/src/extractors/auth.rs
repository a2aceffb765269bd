//! Authentication extractors
//!
//! Turn the bearer token on the request into the caller's identity.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use atelier_common::{AppError, UserRole};
use atelier_core::UserId;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from the JWT
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
    pub role: UserRole,
}

impl AuthUser {
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let claims = app_state
            .jwt_service()
            .validate_access_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected access token");
                ApiError::App(e)
            })?;

        let user_id = claims.user_id()?;

        Ok(AuthUser::new(user_id, claims.role))
    }
}

/// Authenticated caller holding the admin role
///
/// Non-admins are refused with 403 before the handler runs.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub AuthUser);

impl AdminUser {
    pub fn user_id(&self) -> UserId {
        self.0.user_id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            tracing::debug!(user_id = %user.user_id, "Non-admin on admin route");
            return Err(ApiError::App(AppError::InsufficientPermissions));
        }

        Ok(AdminUser(user))
    }
}

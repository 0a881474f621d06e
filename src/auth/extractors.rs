use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::jwt::{JwtKeys, Principal};
use crate::{
    error::{ApiError, ServiceError},
    users::repo_types::Role,
};

/// Extracts and validates the bearer token, yielding the principal.
pub struct AuthUser(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ServiceError::InvalidToken)?;

        // Expect "Bearer <token>"
        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .ok_or(ServiceError::InvalidToken)?;

        let principal = keys.verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            ServiceError::InvalidToken
        })?;

        Ok(AuthUser(principal))
    }
}

/// Like [`AuthUser`] but requires the ADMIN role.
pub struct AdminUser(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(principal) = AuthUser::from_request_parts(parts, state).await?;
        if principal.role != Role::Admin {
            warn!(user_id = %principal.user_id, "admin route refused");
            return Err(ServiceError::NoAccessPermission.into());
        }
        Ok(AdminUser(principal))
    }
}

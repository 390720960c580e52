use std::sync::Arc;

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use uuid::Uuid;

use crate::api::rest::error::ApiError;
use crate::domain::ports::IdentityProvider;

/// Resolved caller identity, `None` for anonymous requests.
///
/// Resolution goes through the injected [`IdentityProvider`]; whether an
/// anonymous caller is acceptable is decided per operation in the domain
/// service, not here.
pub struct Caller(pub Option<Uuid>);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<Arc<dyn IdentityProvider>>()
            .cloned()
            .ok_or_else(|| {
                ApiError::internal(anyhow::Error::msg("identity provider not configured"))
            })?;

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let caller = identity
            .resolve_caller(token)
            .await
            .map_err(ApiError::internal)?;

        Ok(Caller(caller))
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use ApiError::*;

        let (status, code, safe_msg): (StatusCode, &str, &str) = match &self {
            BadRequest(m) => (StatusCode::BAD_REQUEST, "bad_request", m.as_str()),
            Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            Forbidden(m) => (StatusCode::FORBIDDEN, "forbidden", m.as_str()),
            NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            ),
        };

        match &self {
            Internal(err) => tracing::error!(
                error = %err,
                status = status.as_u16(),
                "request failed"
            ),
            other => tracing::warn!(
                error = %other,
                status = status.as_u16(),
                "request failed"
            ),
        }

        let body = ErrorBody {
            code,
            message: safe_msg,
        };
        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        use DomainError::*;
        match err {
            AuthenticationRequired => Self::Unauthorized("not authenticated".to_string()),
            ListingNotFound { .. } => Self::NotFound(err.to_string()),
            NotOwner { .. } => Self::Forbidden(err.to_string()),
            CategoryNotFound { .. } | UnknownImage { .. } | InvalidPrice { .. } | EmptyTitle => {
                Self::BadRequest(err.to_string())
            }
            Database { message } => Self::Internal(anyhow::Error::msg(message)),
        }
    }
}

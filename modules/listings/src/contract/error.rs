use thiserror::Error;
use uuid::Uuid;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone)]
pub enum ListingsError {
    #[error("Not authenticated")]
    AuthenticationRequired,

    #[error("Listing not found: {id}")]
    NotFound { id: Uuid },

    #[error("Not authorized to modify listing {id}")]
    NotAuthorized { id: Uuid },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl ListingsError {
    pub fn authentication_required() -> Self {
        Self::AuthenticationRequired
    }

    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub fn not_authorized(id: Uuid) -> Self {
        Self::NotAuthorized { id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for ListingsError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            AuthenticationRequired => Self::authentication_required(),
            ListingNotFound { id } => Self::not_found(id),
            NotOwner { id } => Self::not_authorized(id),
            CategoryNotFound { id } => Self::validation(format!("Unknown category: {}", id)),
            UnknownImage { id } => Self::validation(format!("Unknown image reference: {}", id)),
            InvalidPrice { price } => Self::validation(format!("Invalid price: {}", price)),
            EmptyTitle => Self::validation("Title cannot be empty".to_string()),
            Database { .. } => Self::internal(),
        }
    }
}

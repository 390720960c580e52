use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Not authenticated")]
    AuthenticationRequired,

    #[error("Listing not found: {id}")]
    ListingNotFound { id: Uuid },

    #[error("Caller is not the seller of listing {id}")]
    NotOwner { id: Uuid },

    #[error("Category not found: {id}")]
    CategoryNotFound { id: Uuid },

    #[error("Image {id} was not issued by the upload mechanism")]
    UnknownImage { id: Uuid },

    #[error("Price must be a finite, non-negative number (got {price})")]
    InvalidPrice { price: f64 },

    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn authentication_required() -> Self {
        Self::AuthenticationRequired
    }

    pub fn listing_not_found(id: Uuid) -> Self {
        Self::ListingNotFound { id }
    }

    pub fn not_owner(id: Uuid) -> Self {
        Self::NotOwner { id }
    }

    pub fn category_not_found(id: Uuid) -> Self {
        Self::CategoryNotFound { id }
    }

    pub fn unknown_image(id: Uuid) -> Self {
        Self::UnknownImage { id }
    }

    pub fn invalid_price(price: f64) -> Self {
        Self::InvalidPrice { price }
    }

    pub fn empty_title() -> Self {
        Self::EmptyTitle
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::ports::IdentityProvider;
use crate::domain::service::Service;

/// Assemble the listings router.
///
/// Queries are unauthenticated; mutations resolve the caller through the
/// identity provider injected as an extension.
pub fn router(service: Arc<Service>, identity: Arc<dyn IdentityProvider>) -> Router {
    Router::new()
        .route(
            "/listings",
            get(handlers::get_listings).post(handlers::create_listing),
        )
        .route("/listings/search", get(handlers::search_listings))
        .route("/listings/mine", get(handlers::get_user_listings))
        .route(
            "/listings/{id}",
            get(handlers::get_listing)
                .patch(handlers::update_listing)
                .delete(handlers::delete_listing),
        )
        .route("/listings/{id}/views", post(handlers::increment_views))
        .route("/uploads", post(handlers::generate_upload_url))
        .route("/categories", get(handlers::list_categories))
        .layer(Extension(service))
        .layer(Extension(identity))
}

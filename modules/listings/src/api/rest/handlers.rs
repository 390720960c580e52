use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    Extension,
};
use tracing::debug;
use uuid::Uuid;

use crate::api::rest::auth::Caller;
use crate::api::rest::dto::{
    CategoryDto, CreateListingReq, IdDto, ListingDto, ListingsQuery, MineQuery, SearchQuery,
    UpdateListingReq, UploadTicketDto,
};
use crate::api::rest::error::ApiError;
use crate::domain::service::Service;

/// Browse active listings, optionally filtered by category or featured flag.
pub async fn get_listings(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Query(query): Query<ListingsQuery>,
) -> Result<Json<Vec<ListingDto>>, ApiError> {
    debug!("Listing browse with query: {:?}", query);

    let listings = svc
        .get_listings(
            query.category_id,
            query.limit,
            query.featured.unwrap_or(false),
        )
        .await?;
    Ok(Json(listings.into_iter().map(ListingDto::from).collect()))
}

/// Get a specific listing by ID
pub async fn get_listing(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ListingDto>, ApiError> {
    match svc.get_listing(id).await? {
        Some(listing) => Ok(Json(ListingDto::from(listing))),
        None => Err(ApiError::NotFound(format!("Listing not found: {id}"))),
    }
}

/// Title search over active listings
pub async fn search_listings(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ListingDto>>, ApiError> {
    let listings = svc.search_listings(&query.q, query.category_id).await?;
    Ok(Json(listings.into_iter().map(ListingDto::from).collect()))
}

/// Listings owned by the given user, or by the caller when omitted
pub async fn get_user_listings(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Caller(caller): Caller,
    Query(query): Query<MineQuery>,
) -> Result<Json<Vec<ListingDto>>, ApiError> {
    let listings = svc.get_user_listings(caller, query.user_id).await?;
    Ok(Json(listings.into_iter().map(ListingDto::from).collect()))
}

/// Create a new listing owned by the caller
pub async fn create_listing(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Caller(caller): Caller,
    Json(req_body): Json<CreateListingReq>,
) -> Result<(StatusCode, Json<IdDto>), ApiError> {
    let id = svc.create_listing(caller, req_body.into()).await?;
    Ok((StatusCode::CREATED, Json(IdDto { id })))
}

/// Apply a partial patch to a listing owned by the caller
pub async fn update_listing(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Caller(caller): Caller,
    Path(id): Path<Uuid>,
    Json(req_body): Json<UpdateListingReq>,
) -> Result<Json<IdDto>, ApiError> {
    let id = svc.update_listing(caller, id, req_body.into()).await?;
    Ok(Json(IdDto { id }))
}

/// Delete a listing owned by the caller
pub async fn delete_listing(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Caller(caller): Caller,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    svc.delete_listing(caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Bump the view counter; anonymous and tolerant of deleted listings
pub async fn increment_views(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    svc.increment_views(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Issue an upload URL from the blob store
pub async fn generate_upload_url(
    Extension(svc): Extension<std::sync::Arc<Service>>,
) -> Result<Json<UploadTicketDto>, ApiError> {
    let ticket = svc.generate_upload_url().await?;
    Ok(Json(UploadTicketDto::from(ticket)))
}

/// Category reference data for the browse UI
pub async fn list_categories(
    Extension(svc): Extension<std::sync::Arc<Service>>,
) -> Result<Json<Vec<CategoryDto>>, ApiError> {
    let categories = svc.list_categories().await?;
    Ok(Json(
        categories.into_iter().map(CategoryDto::from).collect(),
    ))
}

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{
    Category, Condition, ContactMethod, EnrichedListing, ListingPatch, ListingStatus, NewListing,
    SellerInfo, UploadTicket,
};

/// REST DTO for the seller sub-object of an enriched listing
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SellerDto {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// REST DTO for an enriched listing: the record plus joined seller/category
/// data and resolved image URLs
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListingDto {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category_id: Uuid,
    pub condition: Condition,
    pub images: Vec<Uuid>,
    pub status: ListingStatus,
    pub contact_method: ContactMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    pub is_featured: bool,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Omitted for owner-scoped reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<SellerDto>,
    pub category: Option<String>,
    pub image_urls: Vec<String>,
}

/// REST DTO for creating a listing
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateListingReq {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category_id: Uuid,
    pub condition: Condition,
    #[serde(default)]
    pub images: Vec<Uuid>,
    pub contact_method: ContactMethod,
    pub contact_info: Option<String>,
}

/// REST DTO for updating a listing (partial)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct UpdateListingReq {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<Uuid>,
    pub condition: Option<Condition>,
    pub images: Option<Vec<Uuid>>,
    pub status: Option<ListingStatus>,
    pub contact_method: Option<ContactMethod>,
    pub contact_info: Option<String>,
}

/// REST DTO for browse query parameters
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListingsQuery {
    pub category_id: Option<Uuid>,
    pub limit: Option<u32>,
    pub featured: Option<bool>,
}

/// REST DTO for search query parameters
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchQuery {
    pub q: String,
    pub category_id: Option<Uuid>,
}

/// REST DTO for the owner-scoped listing query
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MineQuery {
    pub user_id: Option<Uuid>,
}

/// REST DTO carrying a created/updated record id
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct IdDto {
    pub id: Uuid,
}

/// REST DTO for an issued upload ticket
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UploadTicketDto {
    pub blob_id: Uuid,
    pub upload_url: String,
}

/// REST DTO for category reference data
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryDto {
    pub id: Uuid,
    pub name: String,
}

// Conversion implementations between REST DTOs and contract models

impl From<SellerInfo> for SellerDto {
    fn from(seller: SellerInfo) -> Self {
        Self {
            email: seller.email,
            first_name: seller.first_name,
            last_name: seller.last_name,
        }
    }
}

impl From<EnrichedListing> for ListingDto {
    fn from(enriched: EnrichedListing) -> Self {
        let listing = enriched.listing;
        Self {
            id: listing.id,
            seller_id: listing.seller_id,
            title: listing.title,
            description: listing.description,
            price: listing.price,
            category_id: listing.category_id,
            condition: listing.condition,
            images: listing.images,
            status: listing.status,
            contact_method: listing.contact_method,
            contact_info: listing.contact_info,
            is_featured: listing.is_featured,
            views: listing.views,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
            seller: enriched.seller.map(Into::into),
            category: enriched.category,
            image_urls: enriched.image_urls,
        }
    }
}

impl From<CreateListingReq> for NewListing {
    fn from(req: CreateListingReq) -> Self {
        Self {
            title: req.title,
            description: req.description,
            price: req.price,
            category_id: req.category_id,
            condition: req.condition,
            images: req.images,
            contact_method: req.contact_method,
            contact_info: req.contact_info,
        }
    }
}

impl From<UpdateListingReq> for ListingPatch {
    fn from(req: UpdateListingReq) -> Self {
        Self {
            title: req.title,
            description: req.description,
            price: req.price,
            category_id: req.category_id,
            condition: req.condition,
            images: req.images,
            status: req.status,
            contact_method: req.contact_method,
            contact_info: req.contact_info,
        }
    }
}

impl From<UploadTicket> for UploadTicketDto {
    fn from(ticket: UploadTicket) -> Self {
        Self {
            blob_id: ticket.blob_id,
            upload_url: ticket.upload_url,
        }
    }
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

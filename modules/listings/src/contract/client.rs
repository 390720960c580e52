use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::{
    Category, EnrichedListing, ListingPatch, NewListing, UploadTicket,
};

/// Public API trait for the listings module that other modules can use.
///
/// Queries never require a caller; mutations take an optional caller identity
/// and reject with an authentication error when one is required but absent.
#[async_trait]
pub trait ListingsApi: Send + Sync {
    /// Browse active listings, optionally by category or featured flag.
    async fn get_listings(
        &self,
        category_id: Option<Uuid>,
        limit: Option<u32>,
        featured: bool,
    ) -> anyhow::Result<Vec<EnrichedListing>>;

    /// Fetch a single listing with enrichment; `None` when the id is unknown.
    async fn get_listing(&self, id: Uuid) -> anyhow::Result<Option<EnrichedListing>>;

    /// Text search over listing titles, constrained to active listings.
    async fn search_listings(
        &self,
        term: &str,
        category_id: Option<Uuid>,
    ) -> anyhow::Result<Vec<EnrichedListing>>;

    /// All listings owned by `user_id`, or by `caller` when omitted.
    async fn get_user_listings(
        &self,
        caller: Option<Uuid>,
        user_id: Option<Uuid>,
    ) -> anyhow::Result<Vec<EnrichedListing>>;

    /// Create a listing owned by the caller; returns the new id.
    async fn create_listing(&self, caller: Option<Uuid>, new: NewListing) -> anyhow::Result<Uuid>;

    /// Apply a partial patch to a listing owned by the caller.
    async fn update_listing(
        &self,
        caller: Option<Uuid>,
        id: Uuid,
        patch: ListingPatch,
    ) -> anyhow::Result<Uuid>;

    /// Delete a listing owned by the caller.
    async fn delete_listing(&self, caller: Option<Uuid>, id: Uuid) -> anyhow::Result<()>;

    /// Bump the view counter; silently ignores unknown ids.
    async fn increment_views(&self, id: Uuid) -> anyhow::Result<()>;

    /// Issue an upload URL from the blob store.
    async fn generate_upload_url(&self) -> anyhow::Result<UploadTicket>;

    /// Reference data for the browse UI.
    async fn list_categories(&self) -> anyhow::Result<Vec<Category>>;
}

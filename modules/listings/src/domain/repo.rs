use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::{Category, Listing, ListingPatch, Profile, UserAccount};

/// Port for the domain layer: listing persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait ListingsRepository: Send + Sync {
    /// Load a listing by id.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Listing>>;
    /// Insert a fully-formed listing.
    ///
    /// Service computes id/timestamps/forced defaults; repo persists.
    async fn insert(&self, listing: Listing) -> anyhow::Result<()>;
    /// Apply a partial patch. Only `Some` fields are written, in one statement.
    async fn update(&self, id: Uuid, patch: ListingPatch) -> anyhow::Result<()>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    /// Atomic `views = views + 1` in the store. Returns false when the row is gone.
    async fn increment_views(&self, id: Uuid) -> anyhow::Result<bool>;

    /// Active listings, newest first, up to `limit`.
    async fn list_active(&self, limit: u32) -> anyhow::Result<Vec<Listing>>;
    /// Active listings in a category, newest first, up to `limit`.
    async fn list_active_by_category(
        &self,
        category_id: Uuid,
        limit: u32,
    ) -> anyhow::Result<Vec<Listing>>;
    /// Active featured listings, newest first, up to `limit`.
    async fn list_active_featured(&self, limit: u32) -> anyhow::Result<Vec<Listing>>;
    /// All listings of one seller, newest first, regardless of status.
    async fn list_by_seller(&self, seller_id: Uuid) -> anyhow::Result<Vec<Listing>>;
    /// Title text search over active listings, optionally within a category.
    async fn search_active(
        &self,
        term: &str,
        category_id: Option<Uuid>,
        limit: u32,
    ) -> anyhow::Result<Vec<Listing>>;
}

/// Read-only reference lookups used for enrichment.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    async fn find_user(&self, id: Uuid) -> anyhow::Result<Option<UserAccount>>;
    async fn find_profile(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>>;
    async fn find_category(&self, id: Uuid) -> anyhow::Result<Option<Category>>;
    async fn list_categories(&self) -> anyhow::Result<Vec<Category>>;
}

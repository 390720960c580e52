use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::UploadTicket;

/// Resolves a bearer credential to a stable user id, or `None` for anonymous.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve_caller(&self, bearer_token: Option<&str>) -> anyhow::Result<Option<Uuid>>;
}

/// Content-addressed file storage issuing upload URLs and resolving
/// previously-issued blob references to retrievable URLs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn issue_upload_url(&self) -> anyhow::Result<UploadTicket>;
    /// `None` when the blob reference was never issued (or has been removed).
    async fn resolve_url(&self, blob_id: Uuid) -> anyhow::Result<Option<String>>;
}

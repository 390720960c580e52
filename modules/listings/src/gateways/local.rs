use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::ListingsApi,
    error::ListingsError,
    model::{Category, EnrichedListing, ListingPatch, NewListing, UploadTicket},
};
use crate::domain::{error::DomainError, service::Service};

/// Local implementation of the ListingsApi trait that delegates to the domain service
pub struct ListingsLocalClient {
    service: Arc<Service>,
}

impl ListingsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ListingsApi for ListingsLocalClient {
    async fn get_listings(
        &self,
        category_id: Option<Uuid>,
        limit: Option<u32>,
        featured: bool,
    ) -> anyhow::Result<Vec<EnrichedListing>> {
        self.service
            .get_listings(category_id, limit, featured)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn get_listing(&self, id: Uuid) -> anyhow::Result<Option<EnrichedListing>> {
        self.service
            .get_listing(id)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn search_listings(
        &self,
        term: &str,
        category_id: Option<Uuid>,
    ) -> anyhow::Result<Vec<EnrichedListing>> {
        self.service
            .search_listings(term, category_id)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn get_user_listings(
        &self,
        caller: Option<Uuid>,
        user_id: Option<Uuid>,
    ) -> anyhow::Result<Vec<EnrichedListing>> {
        self.service
            .get_user_listings(caller, user_id)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn create_listing(&self, caller: Option<Uuid>, new: NewListing) -> anyhow::Result<Uuid> {
        self.service
            .create_listing(caller, new)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn update_listing(
        &self,
        caller: Option<Uuid>,
        id: Uuid,
        patch: ListingPatch,
    ) -> anyhow::Result<Uuid> {
        self.service
            .update_listing(caller, id, patch)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn delete_listing(&self, caller: Option<Uuid>, id: Uuid) -> anyhow::Result<()> {
        self.service
            .delete_listing(caller, id)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn increment_views(&self, id: Uuid) -> anyhow::Result<()> {
        self.service
            .increment_views(id)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn generate_upload_url(&self) -> anyhow::Result<UploadTicket> {
        self.service
            .generate_upload_url()
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn list_categories(&self) -> anyhow::Result<Vec<Category>> {
        self.service
            .list_categories()
            .await
            .map_err(map_domain_error_to_anyhow)
    }
}

/// Map domain errors to contract errors wrapped in anyhow
fn map_domain_error_to_anyhow(domain_error: DomainError) -> anyhow::Error {
    anyhow::Error::new(ListingsError::from(domain_error))
}

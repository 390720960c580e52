use std::sync::Arc;

use chrono::Utc;
use futures::future::{join_all, try_join_all};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::config::ListingsConfig;
use crate::contract::model::{
    Category, EnrichedListing, Listing, ListingPatch, ListingStatus, NewListing, SellerInfo,
    UploadTicket,
};
use crate::domain::error::DomainError;
use crate::domain::ports::BlobStore;
use crate::domain::repo::{DirectoryRepository, ListingsRepository};

/// Domain service with the listing lifecycle rules.
/// Depends only on the repository and collaborator ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    listings: Arc<dyn ListingsRepository>,
    directory: Arc<dyn DirectoryRepository>,
    blobs: Arc<dyn BlobStore>,
    config: ListingsConfig,
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        listings: Arc<dyn ListingsRepository>,
        directory: Arc<dyn DirectoryRepository>,
        blobs: Arc<dyn BlobStore>,
        config: ListingsConfig,
    ) -> Self {
        Self {
            listings,
            directory,
            blobs,
            config,
        }
    }

    #[instrument(name = "listings.service.get_listings", skip(self))]
    pub async fn get_listings(
        &self,
        category_id: Option<Uuid>,
        limit: Option<u32>,
        featured: bool,
    ) -> Result<Vec<EnrichedListing>, DomainError> {
        let limit = limit.unwrap_or(self.config.default_page_size);

        // Selection priority: category, then featured, then all active.
        let listings = if let Some(category_id) = category_id {
            self.listings.list_active_by_category(category_id, limit)
        } else if featured {
            self.listings.list_active_featured(limit)
        } else {
            self.listings.list_active(limit)
        }
        .await
        .map_err(|e| DomainError::database(e.to_string()))?;

        debug!("Selected {} listings for enrichment", listings.len());
        self.enrich_all(listings, true).await
    }

    #[instrument(name = "listings.service.get_listing", skip(self), fields(listing_id = %id))]
    pub async fn get_listing(&self, id: Uuid) -> Result<Option<EnrichedListing>, DomainError> {
        // No status filter here: a direct id fetch returns the full detail
        // for inactive/sold listings as well.
        let listing = self
            .listings
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        match listing {
            Some(listing) => Ok(Some(self.enrich(listing, true).await?)),
            None => Ok(None),
        }
    }

    #[instrument(name = "listings.service.search_listings", skip(self))]
    pub async fn search_listings(
        &self,
        term: &str,
        category_id: Option<Uuid>,
    ) -> Result<Vec<EnrichedListing>, DomainError> {
        let listings = self
            .listings
            .search_active(term, category_id, self.config.search_page_size)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        debug!("Search matched {} active listings", listings.len());
        self.enrich_all(listings, true).await
    }

    #[instrument(name = "listings.service.get_user_listings", skip(self))]
    pub async fn get_user_listings(
        &self,
        caller: Option<Uuid>,
        user_id: Option<Uuid>,
    ) -> Result<Vec<EnrichedListing>, DomainError> {
        // Fail closed: no resolvable identity means an empty result, not an error.
        let Some(owner) = user_id.or(caller) else {
            return Ok(Vec::new());
        };

        let listings = self
            .listings
            .list_by_seller(owner)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        // The caller already knows the owner, so the seller join is skipped.
        self.enrich_all(listings, false).await
    }

    #[instrument(name = "listings.service.create_listing", skip(self, new), fields(title = %new.title))]
    pub async fn create_listing(
        &self,
        caller: Option<Uuid>,
        new: NewListing,
    ) -> Result<Uuid, DomainError> {
        let seller_id = caller.ok_or_else(DomainError::authentication_required)?;

        self.validate_price(new.price)?;
        if new.title.trim().is_empty() {
            return Err(DomainError::empty_title());
        }
        self.require_category(new.category_id).await?;
        self.require_issued_images(&new.images).await?;

        let now = Utc::now();
        let id = Uuid::new_v4();
        let listing = Listing {
            id,
            seller_id,
            title: new.title,
            description: new.description,
            price: new.price,
            category_id: new.category_id,
            condition: new.condition,
            images: new.images,
            // Forced defaults: never caller-settable at creation.
            status: ListingStatus::Active,
            contact_method: new.contact_method,
            contact_info: new.contact_info,
            is_featured: false,
            views: 0,
            created_at: now,
            updated_at: now,
        };

        self.listings
            .insert(listing)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Created listing {id} for seller {seller_id}");
        Ok(id)
    }

    #[instrument(name = "listings.service.update_listing", skip(self, patch), fields(listing_id = %id))]
    pub async fn update_listing(
        &self,
        caller: Option<Uuid>,
        id: Uuid,
        patch: ListingPatch,
    ) -> Result<Uuid, DomainError> {
        let caller = caller.ok_or_else(DomainError::authentication_required)?;

        let listing = self
            .listings
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::listing_not_found(id))?;

        if listing.seller_id != caller {
            return Err(DomainError::not_owner(id));
        }

        if let Some(price) = patch.price {
            self.validate_price(price)?;
        }
        if let Some(category_id) = patch.category_id {
            self.require_category(category_id).await?;
        }
        if let Some(ref images) = patch.images {
            self.require_issued_images(images).await?;
        }

        self.listings
            .update(id, patch)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Updated listing {id}");
        Ok(id)
    }

    #[instrument(name = "listings.service.delete_listing", skip(self), fields(listing_id = %id))]
    pub async fn delete_listing(&self, caller: Option<Uuid>, id: Uuid) -> Result<(), DomainError> {
        let caller = caller.ok_or_else(DomainError::authentication_required)?;

        let listing = self
            .listings
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::listing_not_found(id))?;

        if listing.seller_id != caller {
            return Err(DomainError::not_owner(id));
        }

        self.listings
            .delete(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Deleted listing {id}");
        Ok(())
    }

    /// View counting works for anonymous visitors and tolerates the listing
    /// having been deleted between page load and this call.
    #[instrument(name = "listings.service.increment_views", skip(self), fields(listing_id = %id))]
    pub async fn increment_views(&self, id: Uuid) -> Result<(), DomainError> {
        let bumped = self
            .listings
            .increment_views(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        if !bumped {
            debug!("Listing {id} is gone; view increment ignored");
        }
        Ok(())
    }

    #[instrument(name = "listings.service.generate_upload_url", skip(self))]
    pub async fn generate_upload_url(&self) -> Result<UploadTicket, DomainError> {
        self.blobs
            .issue_upload_url()
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    #[instrument(name = "listings.service.list_categories", skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.directory
            .list_categories()
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    // --- enrichment ---

    async fn enrich_all(
        &self,
        listings: Vec<Listing>,
        with_seller: bool,
    ) -> Result<Vec<EnrichedListing>, DomainError> {
        try_join_all(
            listings
                .into_iter()
                .map(|listing| self.enrich(listing, with_seller)),
        )
        .await
    }

    /// Join one listing with seller, category and resolved image URLs.
    ///
    /// The lookups are independent, so they are gathered concurrently and
    /// joined before assembly. Missing seller/profile/category become `None`
    /// sub-fields rather than failures.
    async fn enrich(
        &self,
        listing: Listing,
        with_seller: bool,
    ) -> Result<EnrichedListing, DomainError> {
        let seller_id = listing.seller_id;

        let (user, profile, category, urls) = tokio::join!(
            async {
                if with_seller {
                    self.directory.find_user(seller_id).await
                } else {
                    Ok(None)
                }
            },
            async {
                if with_seller {
                    self.directory.find_profile(seller_id).await
                } else {
                    Ok(None)
                }
            },
            self.directory.find_category(listing.category_id),
            join_all(listing.images.iter().map(|&blob| self.blobs.resolve_url(blob))),
        );

        let user = user.map_err(|e| DomainError::database(e.to_string()))?;
        let profile = profile.map_err(|e| DomainError::database(e.to_string()))?;
        let category = category.map_err(|e| DomainError::database(e.to_string()))?;

        let mut image_urls = Vec::with_capacity(listing.images.len());
        for resolved in urls {
            let resolved = resolved.map_err(|e| DomainError::database(e.to_string()))?;
            // Unresolved references are filtered out, never surfaced raw.
            if let Some(url) = resolved {
                image_urls.push(url);
            }
        }

        let seller = with_seller.then(|| {
            let (first_name, last_name) = profile
                .map(|p| (p.first_name, p.last_name))
                .unwrap_or((None, None));
            SellerInfo {
                email: user.map(|u| u.email),
                first_name,
                last_name,
            }
        });

        Ok(EnrichedListing {
            listing,
            seller,
            category: category.map(|c| c.name),
            image_urls,
        })
    }

    // --- validation helpers ---

    fn validate_price(&self, price: f64) -> Result<(), DomainError> {
        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::invalid_price(price));
        }
        Ok(())
    }

    async fn require_category(&self, category_id: Uuid) -> Result<(), DomainError> {
        let found = self
            .directory
            .find_category(category_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        if found.is_none() {
            return Err(DomainError::category_not_found(category_id));
        }
        Ok(())
    }

    async fn require_issued_images(&self, images: &[Uuid]) -> Result<(), DomainError> {
        for &blob in images {
            let resolved = self
                .blobs
                .resolve_url(blob)
                .await
                .map_err(|e| DomainError::database(e.to_string()))?;
            if resolved.is_none() {
                return Err(DomainError::unknown_image(blob));
            }
        }
        Ok(())
    }
}

//! SeaORM-backed repository implementations for the domain ports.
//!
//! The structs are generic over `C: ConnectionTrait`, so they can be
//! constructed with a `DatabaseConnection` or a transactional connection.

use anyhow::Context;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::contract::model::{
    Category, Listing, ListingPatch, ListingStatus, Profile, UserAccount,
};
use crate::domain::repo::{DirectoryRepository, ListingsRepository};
use crate::infra::storage::entity::{category, listing, profile, user_account};
use crate::infra::storage::mapper;

/// SeaORM listings repository.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmListingsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmListingsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

fn active() -> sea_orm::sea_query::SimpleExpr {
    listing::Column::Status.eq(ListingStatus::Active.as_str())
}

#[async_trait::async_trait]
impl<C> ListingsRepository for SeaOrmListingsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Listing>> {
        let found = listing::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        found.map(mapper::listing_from_model).transpose()
    }

    async fn insert(&self, l: Listing) -> anyhow::Result<()> {
        let m = listing::ActiveModel {
            id: Set(l.id),
            seller_id: Set(l.seller_id),
            title: Set(l.title),
            description: Set(l.description),
            price: Set(l.price),
            category_id: Set(l.category_id),
            condition: Set(l.condition.as_str().to_string()),
            images: Set(mapper::encode_images(&l.images)?),
            status: Set(l.status.as_str().to_string()),
            contact_method: Set(l.contact_method.as_str().to_string()),
            contact_info: Set(l.contact_info),
            is_featured: Set(l.is_featured),
            views: Set(l.views),
            created_at: Set(l.created_at),
            updated_at: Set(l.updated_at),
        };
        let _ = m.insert(&self.conn).await.context("insert failed")?;
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: ListingPatch) -> anyhow::Result<()> {
        // One statement, only the provided fields. All-or-nothing per call.
        let mut m = listing::ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(title) = patch.title {
            m.title = Set(title);
        }
        if let Some(description) = patch.description {
            m.description = Set(description);
        }
        if let Some(price) = patch.price {
            m.price = Set(price);
        }
        if let Some(category_id) = patch.category_id {
            m.category_id = Set(category_id);
        }
        if let Some(condition) = patch.condition {
            m.condition = Set(condition.as_str().to_string());
        }
        if let Some(ref images) = patch.images {
            m.images = Set(mapper::encode_images(images)?);
        }
        if let Some(status) = patch.status {
            m.status = Set(status.as_str().to_string());
        }
        if let Some(contact_method) = patch.contact_method {
            m.contact_method = Set(contact_method.as_str().to_string());
        }
        if let Some(contact_info) = patch.contact_info {
            m.contact_info = Set(Some(contact_info));
        }
        m.updated_at = Set(Utc::now());

        let _ = m.update(&self.conn).await.context("update failed")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = listing::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn increment_views(&self, id: Uuid) -> anyhow::Result<bool> {
        // Single-record atomic read-modify-write in the store.
        let res = listing::Entity::update_many()
            .col_expr(
                listing::Column::Views,
                Expr::col(listing::Column::Views).add(1),
            )
            .filter(listing::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("increment_views failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn list_active(&self, limit: u32) -> anyhow::Result<Vec<Listing>> {
        let rows = listing::Entity::find()
            .filter(active())
            .order_by_desc(listing::Column::CreatedAt)
            .limit(limit as u64)
            .all(&self.conn)
            .await
            .context("list_active failed")?;
        rows.into_iter().map(mapper::listing_from_model).collect()
    }

    async fn list_active_by_category(
        &self,
        category_id: Uuid,
        limit: u32,
    ) -> anyhow::Result<Vec<Listing>> {
        let rows = listing::Entity::find()
            .filter(listing::Column::CategoryId.eq(category_id))
            .filter(active())
            .order_by_desc(listing::Column::CreatedAt)
            .limit(limit as u64)
            .all(&self.conn)
            .await
            .context("list_active_by_category failed")?;
        rows.into_iter().map(mapper::listing_from_model).collect()
    }

    async fn list_active_featured(&self, limit: u32) -> anyhow::Result<Vec<Listing>> {
        let rows = listing::Entity::find()
            .filter(listing::Column::IsFeatured.eq(true))
            .filter(active())
            .order_by_desc(listing::Column::CreatedAt)
            .limit(limit as u64)
            .all(&self.conn)
            .await
            .context("list_active_featured failed")?;
        rows.into_iter().map(mapper::listing_from_model).collect()
    }

    async fn list_by_seller(&self, seller_id: Uuid) -> anyhow::Result<Vec<Listing>> {
        let rows = listing::Entity::find()
            .filter(listing::Column::SellerId.eq(seller_id))
            .order_by_desc(listing::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("list_by_seller failed")?;
        rows.into_iter().map(mapper::listing_from_model).collect()
    }

    async fn search_active(
        &self,
        term: &str,
        category_id: Option<Uuid>,
        limit: u32,
    ) -> anyhow::Result<Vec<Listing>> {
        let mut query = listing::Entity::find()
            .filter(listing::Column::Title.contains(term))
            .filter(active());
        if let Some(category_id) = category_id {
            query = query.filter(listing::Column::CategoryId.eq(category_id));
        }
        let rows = query
            .limit(limit as u64)
            .all(&self.conn)
            .await
            .context("search_active failed")?;
        rows.into_iter().map(mapper::listing_from_model).collect()
    }
}

/// SeaORM reference-data repository (users, profiles, categories).
pub struct SeaOrmDirectoryRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmDirectoryRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> DirectoryRepository for SeaOrmDirectoryRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_user(&self, id: Uuid) -> anyhow::Result<Option<UserAccount>> {
        let found = user_account::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_user failed")?;
        Ok(found.map(Into::into))
    }

    async fn find_profile(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let found = profile::Entity::find_by_id(user_id)
            .one(&self.conn)
            .await
            .context("find_profile failed")?;
        Ok(found.map(Into::into))
    }

    async fn find_category(&self, id: Uuid) -> anyhow::Result<Option<Category>> {
        let found = category::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_category failed")?;
        Ok(found.map(Into::into))
    }

    async fn list_categories(&self) -> anyhow::Result<Vec<Category>> {
        let rows = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.conn)
            .await
            .context("list_categories failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

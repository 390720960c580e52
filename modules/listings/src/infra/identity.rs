//! Bearer-token identity provider backed by the `user_accounts` table.

use anyhow::Context;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::domain::ports::IdentityProvider;
use crate::infra::storage::entity::user_account;

pub struct SeaOrmIdentityProvider<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmIdentityProvider<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C> IdentityProvider for SeaOrmIdentityProvider<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn resolve_caller(&self, bearer_token: Option<&str>) -> anyhow::Result<Option<Uuid>> {
        let Some(token) = bearer_token else {
            return Ok(None);
        };
        let found = user_account::Entity::find()
            .filter(user_account::Column::AuthToken.eq(token))
            .one(&self.conn)
            .await
            .context("token lookup failed")?;
        Ok(found.map(|account| account.id))
    }
}

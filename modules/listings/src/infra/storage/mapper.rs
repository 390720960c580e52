//! Conversions between SeaORM rows and contract models.

use anyhow::Context;
use uuid::Uuid;

use crate::contract::model::{Category, Listing, Profile, UserAccount};
use crate::infra::storage::entity::{category, listing, profile, user_account};

pub(crate) fn encode_images(images: &[Uuid]) -> anyhow::Result<String> {
    serde_json::to_string(images).context("failed to encode image references")
}

pub(crate) fn decode_images(raw: &str) -> anyhow::Result<Vec<Uuid>> {
    serde_json::from_str(raw).context("failed to decode image references")
}

pub(crate) fn listing_from_model(m: listing::Model) -> anyhow::Result<Listing> {
    Ok(Listing {
        id: m.id,
        seller_id: m.seller_id,
        title: m.title,
        description: m.description,
        price: m.price,
        category_id: m.category_id,
        condition: m.condition.parse().map_err(anyhow::Error::msg)?,
        images: decode_images(&m.images)?,
        status: m.status.parse().map_err(anyhow::Error::msg)?,
        contact_method: m.contact_method.parse().map_err(anyhow::Error::msg)?,
        contact_info: m.contact_info,
        is_featured: m.is_featured,
        views: m.views,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

impl From<category::Model> for Category {
    fn from(m: category::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

impl From<profile::Model> for Profile {
    fn from(m: profile::Model) -> Self {
        Self {
            user_id: m.user_id,
            first_name: m.first_name,
            last_name: m.last_name,
        }
    }
}

impl From<user_account::Model> for UserAccount {
    fn from(m: user_account::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
        }
    }
}

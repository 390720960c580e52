use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Physical condition of the item being sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    New,
    LikeNew,
    Good,
    Fair,
    Poor,
}

/// Lifecycle status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ListingStatus {
    Active,
    Sold,
    Pending,
    Inactive,
}

/// How buyers are expected to reach the seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ContactMethod {
    Email,
    Phone,
    Message,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::LikeNew => "like-new",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "like-new" => Ok(Self::LikeNew),
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "poor" => Ok(Self::Poor),
            other => Err(format!("unknown condition: {other}")),
        }
    }
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Sold => "sold",
            Self::Pending => "pending",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for ListingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "sold" => Ok(Self::Sold),
            "pending" => Ok(Self::Pending),
            "inactive" => Ok(Self::Inactive),
            other => Err(format!("unknown listing status: {other}")),
        }
    }
}

impl ContactMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Message => "message",
        }
    }
}

impl FromStr for ContactMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "message" => Ok(Self::Message),
            other => Err(format!("unknown contact method: {other}")),
        }
    }
}

/// Persisted listing record.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category_id: Uuid,
    pub condition: Condition,
    /// Ordered blob references; resolved to URLs only at read time.
    pub images: Vec<Uuid>,
    pub status: ListingStatus,
    pub contact_method: ContactMethod,
    pub contact_info: Option<String>,
    pub is_featured: bool,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new listing.
///
/// `status`, `is_featured` and `views` are deliberately absent: the service
/// forces them to `active` / `false` / `0` on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category_id: Uuid,
    pub condition: Condition,
    pub images: Vec<Uuid>,
    pub contact_method: ContactMethod,
    pub contact_info: Option<String>,
}

/// Partial update for a listing. Only fields that are `Some` are written.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListingPatch {
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

impl ListingPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category_id.is_none()
            && self.condition.is_none()
            && self.images.is_none()
            && self.status.is_none()
            && self.contact_method.is_none()
            && self.contact_info.is_none()
    }
}

/// Public seller display data joined into an enriched listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerInfo {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Response shape for reads: a listing joined with seller, category and
/// resolved image URLs. Recomputed on every read, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedListing {
    pub listing: Listing,
    /// Absent for owner-scoped reads where the caller already knows the seller.
    pub seller: Option<SellerInfo>,
    pub category: Option<String>,
    /// Resolved URLs only; unresolved blob references are filtered out.
    pub image_urls: Vec<String>,
}

/// Per-user public display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Reference data for browsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

/// Account record backing identity resolution and the seller email join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
}

/// Result of upload-URL issuance: callers PUT the file to `upload_url`
/// out-of-band, then reference `blob_id` from a listing's `images`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    pub blob_id: Uuid,
    pub upload_url: String,
}

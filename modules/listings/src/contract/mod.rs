pub mod client;
pub mod error;
pub mod model;

pub use client::ListingsApi;
pub use error::ListingsError;
pub use model::{
    Category, Condition, ContactMethod, EnrichedListing, Listing, ListingPatch, ListingStatus,
    NewListing, Profile, SellerInfo, UploadTicket, UserAccount,
};

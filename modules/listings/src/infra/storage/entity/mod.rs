pub mod category;
pub mod listing;
pub mod profile;
pub mod user_account;

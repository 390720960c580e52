pub mod blobs;
pub mod identity;
pub mod storage;

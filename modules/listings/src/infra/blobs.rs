//! Local stand-in for the hosted blob store.
//!
//! Issues upload tickets and resolves previously-issued blob references to
//! retrievable URLs under the configured public base URL. The registry of
//! issued blobs lives in memory; a real deployment swaps in a client for the
//! managed storage service behind the same port.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::contract::model::UploadTicket;
use crate::domain::ports::BlobStore;

pub struct LocalBlobStore {
    public_base_url: String,
    issued: DashMap<Uuid, ()>,
}

impl LocalBlobStore {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        let mut public_base_url = public_base_url.into();
        while public_base_url.ends_with('/') {
            public_base_url.pop();
        }
        Self {
            public_base_url,
            issued: DashMap::new(),
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn issue_upload_url(&self) -> anyhow::Result<UploadTicket> {
        let blob_id = Uuid::new_v4();
        self.issued.insert(blob_id, ());
        Ok(UploadTicket {
            blob_id,
            upload_url: format!("{}/uploads/{}", self.public_base_url, blob_id),
        })
    }

    async fn resolve_url(&self, blob_id: Uuid) -> anyhow::Result<Option<String>> {
        if self.issued.contains_key(&blob_id) {
            Ok(Some(format!("{}/files/{}", self.public_base_url, blob_id)))
        } else {
            Ok(None)
        }
    }
}

use anyhow::Error;
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use std::sync::Arc;

pub mod blob;
pub mod media_cdn;
#[cfg(test)]
pub mod memory;
pub mod s3_client;

use crate::storage::blob::BlobStorage;
use crate::storage::media_cdn::MediaCdnStorage;
use crate::storage::s3_client::ObjectStorage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageResult {
    pub url: String,
    pub download_url: Option<String>,
    pub key: Option<String>,
}

/// A remote store that keeps uploaded bytes and hands back a public url.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn upload(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<StorageResult, Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageType {
    #[default]
    Blob,
    MediaCdn,
    ObjectStore,
}

impl StorageType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "blob" | "vercel-blob" => Some(StorageType::Blob),
            "media-cdn" | "cloudinary" => Some(StorageType::MediaCdn),
            "object-store" | "aws-s3" | "s3" => Some(StorageType::ObjectStore),
            _ => None,
        }
    }

    pub fn parse_or_default(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|| {
            tracing::warn!(value = raw, "unrecognized STORAGE_TYPE, using blob storage");
            StorageType::default()
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Blob => "blob",
            StorageType::MediaCdn => "media-cdn",
            StorageType::ObjectStore => "object-store",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// each variant reads its own credentials from the environment
pub async fn build_backend(storage_type: StorageType) -> Result<Arc<dyn StorageBackend>, Error> {
    let backend: Arc<dyn StorageBackend> = match storage_type {
        StorageType::Blob => Arc::new(BlobStorage::from_env()?),
        StorageType::MediaCdn => Arc::new(MediaCdnStorage::from_env()?),
        StorageType::ObjectStore => Arc::new(ObjectStorage::from_env().await?),
    };
    tracing::info!(storage = %storage_type, "storage backend initialized");
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::StorageType;

    #[test]
    fn test_parse_storage_type() {
        assert_eq!(StorageType::parse("blob"), Some(StorageType::Blob));
        assert_eq!(StorageType::parse("media-cdn"), Some(StorageType::MediaCdn));
        assert_eq!(
            StorageType::parse("object-store"),
            Some(StorageType::ObjectStore)
        );
        assert_eq!(StorageType::parse("cloudinary"), Some(StorageType::MediaCdn));
        assert_eq!(StorageType::parse("aws-s3"), Some(StorageType::ObjectStore));
        assert_eq!(StorageType::parse("Blob"), None);
        assert_eq!(StorageType::parse_or_default("gcs"), StorageType::Blob);
        assert_eq!(StorageType::parse_or_default(""), StorageType::Blob);
    }

    #[test]
    fn test_display_round_trips() {
        for t in [
            StorageType::Blob,
            StorageType::MediaCdn,
            StorageType::ObjectStore,
        ] {
            assert_eq!(StorageType::parse(&t.to_string()), Some(t));
        }
    }
}

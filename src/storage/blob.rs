use crate::storage::{StorageBackend, StorageResult};
use crate::utils::get_env::{get_env_var, get_env_var_or};
use crate::utils::urls::join_url;
use anyhow::{Context, Error, anyhow};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_BLOB_API_URL: &str = "https://blob.vercel-storage.com";
const BLOB_API_VERSION: &str = "7";

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct BlobPutResponse {
    url: String,
    download_url: Option<String>,
    pathname: Option<String>,
}

// vercel-style blob store, one PUT per object
pub struct BlobStorage {
    http_client: Client,
    api_url: String,
    token: String,
}

impl BlobStorage {
    pub fn new(http_client: Client, api_url: String, token: String) -> Self {
        Self {
            http_client,
            api_url,
            token,
        }
    }

    pub fn from_env() -> Result<Self, Error> {
        let token = get_env_var("BLOB_READ_WRITE_TOKEN")?;
        let api_url = get_env_var_or("BLOB_API_URL", DEFAULT_BLOB_API_URL);
        Ok(Self::new(Client::new(), api_url, token))
    }
}

#[async_trait]
impl StorageBackend for BlobStorage {
    async fn upload(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<StorageResult, Error> {
        let url = join_url(&self.api_url, &[filename])
            .with_context(|| format!("invalid blob api url {}", self.api_url))?;

        tracing::debug!(%url, size = bytes.len(), "uploading to blob storage");

        let response = self
            .http_client
            .put(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("x-api-version", BLOB_API_VERSION)
            .header("x-content-type", content_type)
            .header("x-add-random-suffix", "0")
            .body(bytes)
            .send()
            .await
            .context("blob storage request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("blob storage returned {} - {}", status, error_text));
        }

        let blob: BlobPutResponse = response
            .json()
            .await
            .context("unexpected blob storage response")?;

        Ok(StorageResult {
            url: blob.url,
            download_url: blob.download_url,
            key: blob.pathname,
        })
    }
}

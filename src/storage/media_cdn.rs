use crate::storage::{StorageBackend, StorageResult};
use crate::utils::get_env::{get_env_var, get_env_var_or};
use crate::utils::urls::join_url;
use anyhow::{Context, Error, anyhow};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};

pub const DEFAULT_CLOUDINARY_API_URL: &str = "https://api.cloudinary.com";
pub const UPLOAD_FOLDER: &str = "photo-hosting";

#[derive(Deserialize, Debug)]
struct CdnUploadResponse {
    secure_url: String,
    public_id: Option<String>,
}

#[derive(Clone)]
pub struct MediaCdnCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

// cloudinary-style media cdn, signed form upload
pub struct MediaCdnStorage {
    http_client: Client,
    api_url: String,
    credentials: MediaCdnCredentials,
}

/// Signs the upload parameters: sorted `key=value` pairs joined with `&`,
/// followed by the api secret, hashed with SHA-256 and hex encoded.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by_key(|(k, _)| *k);

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

impl MediaCdnStorage {
    pub fn new(http_client: Client, api_url: String, credentials: MediaCdnCredentials) -> Self {
        Self {
            http_client,
            api_url,
            credentials,
        }
    }

    pub fn from_env() -> Result<Self, Error> {
        let credentials = MediaCdnCredentials {
            cloud_name: get_env_var("CLOUDINARY_CLOUD_NAME")?,
            api_key: get_env_var("CLOUDINARY_API_KEY")?,
            api_secret: get_env_var("CLOUDINARY_API_SECRET")?,
        };
        let api_url = get_env_var_or("CLOUDINARY_API_URL", DEFAULT_CLOUDINARY_API_URL);
        Ok(Self::new(Client::new(), api_url, credentials))
    }
}

#[async_trait]
impl StorageBackend for MediaCdnStorage {
    async fn upload(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<StorageResult, Error> {
        let url = join_url(
            &self.api_url,
            &["v1_1", &self.credentials.cloud_name, "image", "upload"],
        )
        .with_context(|| format!("invalid media cdn api url {}", self.api_url))?;

        // the cdn appends its own extension
        let public_id = filename
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(filename);
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[
                ("folder", UPLOAD_FOLDER),
                ("public_id", public_id),
                ("timestamp", &timestamp),
            ],
            &self.credentials.api_secret,
        );
        let file = format!("data:{};base64,{}", content_type, STANDARD.encode(&bytes));

        tracing::debug!(%url, public_id, size = bytes.len(), "uploading to media cdn");

        let response = self
            .http_client
            .post(url)
            .form(&[
                ("file", file.as_str()),
                ("api_key", self.credentials.api_key.as_str()),
                ("timestamp", timestamp.as_str()),
                ("public_id", public_id),
                ("folder", UPLOAD_FOLDER),
                ("signature", signature.as_str()),
                ("signature_algorithm", "sha256"),
            ])
            .send()
            .await
            .context("media cdn request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("media cdn returned {} - {}", status, error_text));
        }

        let uploaded: CdnUploadResponse = response
            .json()
            .await
            .context("unexpected media cdn response")?;

        Ok(StorageResult {
            url: uploaded.secure_url,
            download_url: None,
            key: uploaded.public_id,
        })
    }
}

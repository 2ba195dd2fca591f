use crate::storage::{StorageBackend, StorageResult};
use crate::utils::get_env::{get_env_var, get_env_var_or, get_optional_env_var};
use crate::utils::urls::join_url;
use anyhow::{Context, Error};
use async_trait::async_trait;
use aws_config::Region;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::{Client, Config, config::Credentials};
use bytes::Bytes;
use std::time::Duration;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const KEY_PREFIX: &str = "images";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectStoreSettings {
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub public_url: Option<String>,
}

impl ObjectStoreSettings {
    pub fn object_key(&self, filename: &str) -> String {
        format!("{KEY_PREFIX}/{filename}")
    }

    /// Where the object is publicly reachable: an explicit public base wins,
    /// then a custom (path-style) endpoint, then the virtual-hosted aws url.
    pub fn public_url(&self, key: &str) -> Result<String, Error> {
        let url = match (&self.public_url, &self.endpoint) {
            (Some(base), _) => join_url(base, &[key]),
            (None, Some(endpoint)) => join_url(endpoint, &[&self.bucket, key]),
            (None, None) => join_url(
                &format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region),
                &[key],
            ),
        }
        .context("failed to build public object url")?;
        Ok(url.to_string())
    }
}

// s3-compatible bucket written through the aws sdk
pub struct ObjectStorage {
    client: Client,
    settings: ObjectStoreSettings,
}

pub fn init_s3_client(settings: &ObjectStoreSettings) -> Result<Client, Error> {
    let access_key_id = get_env_var("AWS_ACCESS_KEY_ID")?;
    let secret_access_key = get_env_var("AWS_SECRET_ACCESS_KEY")?;

    let credentials = Credentials::new(
        access_key_id,
        secret_access_key,
        None, // session token
        None, // expiration
        "pixdrop",
    );

    // the gateway never retries, so neither does the sdk
    let retry_config = RetryConfig::disabled();

    let timeout_config = TimeoutConfig::builder()
        .connect_timeout(Duration::from_secs(10))
        .operation_timeout(Duration::from_secs(120))
        .build();

    let mut builder = Config::builder()
        .region(Region::new(settings.region.clone()))
        .credentials_provider(credentials)
        .retry_config(retry_config)
        .timeout_config(timeout_config)
        .behavior_version_latest();

    if let Some(endpoint) = &settings.endpoint {
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }

    Ok(Client::from_conf(builder.build()))
}

impl ObjectStorage {
    pub fn new(client: Client, settings: ObjectStoreSettings) -> Self {
        Self { client, settings }
    }

    pub async fn from_env() -> Result<Self, Error> {
        let settings = ObjectStoreSettings {
            bucket: get_env_var("AWS_BUCKET_NAME")?,
            region: get_env_var_or("AWS_REGION", DEFAULT_REGION),
            endpoint: get_optional_env_var("S3_ENDPOINT"),
            public_url: get_optional_env_var("S3_PUBLIC_URL"),
        };
        let client = init_s3_client(&settings)?;
        Ok(Self::new(client, settings))
    }
}

#[async_trait]
impl StorageBackend for ObjectStorage {
    async fn upload(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<StorageResult, Error> {
        let key = self.settings.object_key(filename);

        tracing::debug!(bucket = %self.settings.bucket, %key, size = bytes.len(), "uploading to object store");

        self.client
            .put_object()
            .bucket(&self.settings.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .with_context(|| format!("put_object to bucket {} failed", self.settings.bucket))?;

        Ok(StorageResult {
            url: self.settings.public_url(&key)?,
            download_url: None,
            key: Some(key),
        })
    }
}

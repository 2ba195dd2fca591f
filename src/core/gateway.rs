use crate::core::data_uri::decode_data_uri;
use crate::core::error::UploadError;
use crate::core::filename::generate_filename;
use crate::storage::{StorageBackend, StorageResult};
use crate::utils::constants::MAX_IMAGE_SIZE;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub image_data_uri: Option<String>,
    pub original_filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub filename: String,
    pub stored: StorageResult,
}

/// Validates image uploads and hands accepted ones to the storage backend.
///
/// Everything up to the backend call is pure validation, so a rejected
/// request never reaches the backend.
#[derive(Clone)]
pub struct UploadGateway {
    backend: Arc<dyn StorageBackend>,
    timeout: Duration,
}

impl UploadGateway {
    pub fn new(backend: Arc<dyn StorageBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub async fn handle(&self, request: UploadRequest) -> Result<UploadOutcome, UploadError> {
        let start_time = Instant::now();

        let data_uri = request
            .image_data_uri
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| UploadError::MalformedPayload("No image data provided".to_string()))?;

        let image = decode_data_uri(data_uri)?;

        if image.bytes.len() > MAX_IMAGE_SIZE {
            return Err(UploadError::PayloadTooLarge(image.bytes.len()));
        }

        let filename = generate_filename(image.image_type);
        let content_type = image.image_type.as_mime();
        let size = image.bytes.len();

        tracing::info!(
            %filename,
            content_type,
            size,
            original_filename = request.original_filename.as_deref().unwrap_or("image"),
            "delegating upload to storage backend"
        );

        let stored = match tokio::time::timeout(
            self.timeout,
            self.backend.upload(image.bytes, &filename, content_type),
        )
        .await
        {
            Ok(Ok(stored)) => stored,
            Ok(Err(e)) => return Err(UploadError::StorageUnavailable(format!("{e:#}"))),
            Err(_) => {
                return Err(UploadError::StorageUnavailable(format!(
                    "storage backend timed out after {:?}",
                    self.timeout
                )));
            }
        };

        tracing::info!(
            %filename,
            url = %stored.url,
            elapsed = ?start_time.elapsed(),
            "upload completed"
        );

        Ok(UploadOutcome { filename, stored })
    }
}

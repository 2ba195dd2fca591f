use crate::storage::{StorageBackend, StorageResult};
use anyhow::{Error, anyhow};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

// in-memory backend that records every delegated upload
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<Vec<StoredObject>>,
    failure: Option<String>,
    delay: Option<Duration>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    async fn upload(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<StorageResult, Error> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.objects.lock().unwrap().push(StoredObject {
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            bytes,
        });

        if let Some(message) = &self.failure {
            return Err(anyhow!(message.clone()));
        }

        Ok(StorageResult {
            url: format!("memory://images/{filename}"),
            download_url: None,
            key: Some(format!("images/{filename}")),
        })
    }
}

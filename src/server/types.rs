use crate::core::gateway::UploadGateway;
use crate::storage::StorageType;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct AppState {
    pub gateway: UploadGateway,
    pub storage_type: StorageType,
}

// request body; both fields optional so a missing image gets our own error
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct UploadPayload {
    pub image: Option<String>,
    pub filename: Option<String>,
}

// Response structure
#[derive(Serialize, Debug, Deserialize, Clone)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub filename: String,
    pub message: String,
}

#[derive(Serialize, Debug, Deserialize, Clone)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

use crate::core::error::UploadError;
use crate::core::gateway::UploadRequest;
use crate::server::types::{AppState, ErrorResponse, UploadPayload, UploadResponse};
use crate::utils::constants::{SERVER_REQUEST_BODY_LIMIT, UPLOAD_SUCCESS_MESSAGE};
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::{Value, json};
use std::sync::Arc;

// server status handler
pub async fn server_status_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({"status": "running", "storage": state.storage_type.as_str()}))
}

// the body is parsed by hand so a missing content-type header or bad json
// still gets the json error shape
pub async fn upload_image_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<UploadResponse>, UploadError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            // exact size unknown, the body was cut off at the limit
            UploadError::PayloadTooLarge(SERVER_REQUEST_BODY_LIMIT)
        } else {
            UploadError::MalformedPayload(rejection.body_text())
        }
    })?;

    let payload: UploadPayload = serde_json::from_slice(&body)
        .map_err(|e| UploadError::MalformedPayload(format!("Invalid request body: {e}")))?;

    let outcome = state
        .gateway
        .handle(UploadRequest {
            image_data_uri: payload.image,
            original_filename: payload.filename,
        })
        .await?;

    Ok(Json(UploadResponse {
        success: true,
        url: outcome.stored.url,
        filename: outcome.filename,
        message: UPLOAD_SUCCESS_MESSAGE.to_string(),
    }))
}

pub async fn method_not_allowed_handler() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method not allowed")),
    )
}

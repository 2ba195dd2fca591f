use crate::server::handlers::{
    method_not_allowed_handler, server_status_handler, upload_image_handler,
};
use crate::server::types::AppState;
use crate::utils::constants::SERVER_REQUEST_BODY_LIMIT;
use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::get, routing::post};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

// request_timeout must stay above the gateway's storage timeout so a slow
// backend surfaces as a json 500 from the gateway, not a bare 408
pub fn build_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let timeout = TimeoutLayer::new(request_timeout);
    let request_body_limit = DefaultBodyLimit::max(SERVER_REQUEST_BODY_LIMIT);

    let upload = post(upload_image_handler).fallback(method_not_allowed_handler);

    Router::new()
        .route("/", get(server_status_handler))
        .route("/api/upload", upload.clone())
        // shorter alias
        .route("/upload", upload)
        .layer(timeout)
        .layer(cors)
        .layer(request_body_limit)
        .with_state(state)
}

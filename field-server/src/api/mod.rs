//! HTTP API routes for the field builder mock server

use axum::http::{header, HeaderValue, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub mod field;

use crate::app_state::AppState;

/// Configure all API routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/field", get(field::get_field).post(field::save_field))
}

/// Allow exactly one browser origin, with credentials
pub fn cors_layer(client_url: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(client_url)
        .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{client_url}': {e}"))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::exact(origin))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(std::time::Duration::from_secs(3600)))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidBody(_) => axum::http::StatusCode::BAD_REQUEST,
        };
        (
            status,
            Json(json!({
                "status": "error",
                "error": self.to_string(),
            })),
        )
            .into_response()
    }
}

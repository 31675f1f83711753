//! Field Builder mock server - echo backend with REST API
//!
//! Serves one field definition and echoes saved payloads back without
//! validating or storing them.

pub mod api;
pub mod app_state;
pub mod config;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::config::Config;

/// Assemble the full application: API routes, CORS, tracing and the
/// optional static UI fallback.
pub fn build_app(config: &Config, state: AppState) -> anyhow::Result<Router> {
    let cors = api::cors_layer(&config.client_url)?;

    let mut app = api::router().with_state(state);

    if let Some(dist) = config.frontend_dist.as_ref() {
        if dist.is_dir() {
            tracing::info!(path = %dist.display(), "Serving field builder UI");
            app = app.fallback_service(ServeDir::new(dist));
        } else {
            tracing::warn!(
                path = %dist.display(),
                "FRONTEND_DIST is not a directory; serving API only"
            );
        }
    }

    Ok(app.layer(cors).layer(TraceLayer::new_for_http()))
}

//! Field API endpoints
//!
//! `GET` serves the seeded field; `POST` echoes whatever JSON it receives.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use field_types::{FieldBuilderData, SaveFieldResponse};

use crate::api::ApiError;
use crate::app_state::AppState;

pub async fn get_field(State(state): State<AppState>) -> Json<FieldBuilderData> {
    tracing::debug!(label = %state.seed().label, "Serving field");
    Json(state.seed().clone())
}

pub async fn save_field(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<SaveFieldResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected field payload");
        ApiError::InvalidBody(rejection.body_text())
    })?;

    tracing::info!(payload = %body, "Received field data");

    let delay = state.save_delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    Ok(Json(SaveFieldResponse::success(body)))
}

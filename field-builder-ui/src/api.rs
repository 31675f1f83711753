use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use std::sync::OnceLock;
use web_sys::RequestCredentials;

use field_types::{to_wire_object, FieldBuilderData, FieldMap, SaveFieldResponse};

use crate::builder::{LoadTransport, SaveTransport, TransportError};

/// Get the API base URL based on current environment
/// - In development (localhost): use http://localhost:3000/api
/// - In production: use same origin (the server serves the bundle)
fn get_api_base() -> String {
    let hostname = web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default();

    if hostname == "localhost" || hostname == "127.0.0.1" {
        "http://localhost:3000/api".to_string()
    } else {
        "/api".to_string()
    }
}

static API_BASE_CACHE: OnceLock<String> = OnceLock::new();

/// Get the cached API base URL
pub fn api_base() -> &'static str {
    API_BASE_CACHE.get_or_init(get_api_base).as_str()
}

/// Client for the `/api/field` endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFieldApi {
    base: String,
}

impl HttpFieldApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn from_location() -> Self {
        Self::new(api_base())
    }

    fn field_url(&self) -> String {
        format!("{}/field", self.base.trim_end_matches('/'))
    }
}

fn check_status(response: &Response) -> Result<(), TransportError> {
    if response.ok() {
        Ok(())
    } else {
        Err(TransportError::Status(response.status()))
    }
}

#[async_trait(?Send)]
impl SaveTransport for HttpFieldApi {
    async fn save(&self, fields: &FieldMap) -> Result<serde_json::Value, TransportError> {
        let body = to_wire_object(fields);

        let response = Request::post(&self.field_url())
            .credentials(RequestCredentials::Include)
            .json(&body)
            .map_err(|e| TransportError::Request(format!("Failed to serialize request: {e}")))?
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        check_status(&response)?;

        let envelope: SaveFieldResponse = response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        if !envelope.is_success() {
            return Err(TransportError::Rejected(envelope.status));
        }

        Ok(envelope.data)
    }
}

#[async_trait(?Send)]
impl LoadTransport for HttpFieldApi {
    async fn load(&self) -> Result<FieldBuilderData, TransportError> {
        let response = Request::get(&self.field_url())
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        check_status(&response)?;

        response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

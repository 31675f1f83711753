//! Transport seams used by the form
//!
//! The form never talks HTTP itself; the host hands it something that can
//! save a value map and return the server's echo.

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use field_types::{FieldBuilderData, FieldMap};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Server reported status '{0}'")]
    Rejected(String),
}

/// Persists a set of form values and returns the server's echoed data
/// (the `data` member of the response envelope).
#[async_trait(?Send)]
pub trait SaveTransport {
    async fn save(&self, fields: &FieldMap) -> Result<serde_json::Value, TransportError>;
}

/// Fetches the field being edited
#[async_trait(?Send)]
pub trait LoadTransport {
    async fn load(&self) -> Result<FieldBuilderData, TransportError>;
}

/// Shareable save transport, comparable by identity so it can be a prop
#[derive(Clone)]
pub struct SaveClient(Rc<dyn SaveTransport>);

impl SaveClient {
    pub fn new(transport: impl SaveTransport + 'static) -> Self {
        Self(Rc::new(transport))
    }
}

impl PartialEq for SaveClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SaveClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SaveClient(..)")
    }
}

#[async_trait(?Send)]
impl SaveTransport for SaveClient {
    async fn save(&self, fields: &FieldMap) -> Result<serde_json::Value, TransportError> {
        self.0.save(fields).await
    }
}

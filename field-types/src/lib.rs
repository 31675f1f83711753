//! Shared field builder types between frontend and backend
//!
//! These types are used by both:
//! - the mock persistence server (native Rust)
//! - the Dioxus field builder (WASM)
//!
//! Serializable with serde for JSON over HTTP

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============================================================================
// Form Values
// ============================================================================

/// Value held by a single form field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(untagged)]
#[ts(export, export_to = "../../field-builder-ui/bindings/generated.ts")]
pub enum FieldValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Convert an arbitrary JSON value into a field value.
    ///
    /// Only strings, booleans and arrays made entirely of strings qualify.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(ToString::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Self::List),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| serde_json::Value::String(item.clone()))
                    .collect(),
            ),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// `false`, `""` and `[]` are empty
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Bool(b) => !b,
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Form values keyed by field name
pub type FieldMap = BTreeMap<String, FieldValue>;

// ============================================================================
// Field Builder Data
// ============================================================================

/// Display order for list choices
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../../field-builder-ui/bindings/generated.ts")]
pub enum FieldOrder {
    #[default]
    Asc,
    Desc,
}

impl FieldOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parse a wire value; anything unrecognised is `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Field metadata as served and accepted by the persistence endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../../field-builder-ui/bindings/generated.ts")]
pub struct FieldBuilderData {
    pub label: String,

    /// Field kind shown to the user (e.g. "multi-select")
    #[serde(rename = "type")]
    pub field_type: String,

    #[serde(default)]
    pub required: bool,

    /// Wire name is `default`; the form calls it `defaultValue`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub default: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub choices: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub order: Option<FieldOrder>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub display_alpha: Option<bool>,
}

// ============================================================================
// API Types
// ============================================================================

/// Echo envelope returned by `POST /api/field`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../field-builder-ui/bindings/generated.ts")]
pub struct SaveFieldResponse {
    pub status: String,
    #[ts(type = "unknown")]
    pub data: serde_json::Value,
}

impl SaveFieldResponse {
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            data,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

// ============================================================================
// Wire Conversion
// ============================================================================

/// Build the outbound JSON object for a set of form values.
///
/// `defaultValue` is sent as `default`.
pub fn to_wire_object(values: &FieldMap) -> serde_json::Value {
    let object = values
        .iter()
        .map(|(key, value)| {
            let key = if key == DEFAULT_VALUE_KEY {
                WIRE_DEFAULT_KEY.to_string()
            } else {
                key.clone()
            };
            (key, value.to_json())
        })
        .collect::<serde_json::Map<_, _>>();
    serde_json::Value::Object(object)
}

/// Read form values back out of a JSON object.
///
/// `default` is renamed to `defaultValue`; entries whose shape is not a
/// [`FieldValue`] are dropped. Non-object input yields an empty map.
pub fn from_wire_object(value: &serde_json::Value) -> FieldMap {
    let Some(object) = value.as_object() else {
        return FieldMap::new();
    };

    object
        .iter()
        .filter_map(|(key, value)| {
            let key = if key == WIRE_DEFAULT_KEY {
                DEFAULT_VALUE_KEY.to_string()
            } else {
                key.clone()
            };
            FieldValue::from_json(value).map(|value| (key, value))
        })
        .collect()
}

// ============================================================================
// Constants
// ============================================================================

pub const DEFAULT_VALUE_KEY: &str = "defaultValue";
pub const WIRE_DEFAULT_KEY: &str = "default";
pub const STATUS_SUCCESS: &str = "success";

// ============================================================================
// Tests
// ============================================================================

//! Multi-select field builder configuration

use std::collections::HashSet;

use field_types::{FieldBuilderData, FieldMap, FieldOrder, FieldValue, DEFAULT_VALUE_KEY};

use crate::builder::form::SaveFormat;
use crate::builder::variant::FieldDefinition;

/// Per-value character limit for label, default value and each choice
pub const MAX_VALUE_LENGTH: i32 = 40;
pub const MAX_CHOICES: usize = 50;

pub const REQUIRED_TOOLTIP: &str = "A Value is required for this field.";

pub const CHOICES_KEY: &str = "choices";

pub fn label_validation(value: &FieldValue) -> Option<String> {
    match value.as_text() {
        Some(label) if !label.trim().is_empty() => None,
        _ => Some("Label is required.".to_string()),
    }
}

pub fn default_value_validation(value: &FieldValue) -> Option<String> {
    let text = value.as_text().unwrap_or_default();
    if text.trim().is_empty() {
        return Some("Default value is cannot be empty.".to_string());
    }
    if text.chars().count() > MAX_VALUE_LENGTH as usize {
        return Some(format!(
            "Default value must be {MAX_VALUE_LENGTH} characters or less."
        ));
    }
    None
}

pub fn choices_validation(value: &FieldValue) -> Option<String> {
    let Some(choices) = value.as_list() else {
        return Some("Choices must be an array.".to_string());
    };

    if choices.iter().any(|c| c.trim().is_empty()) {
        return Some("Choices cannot contain empty values.".to_string());
    }

    let unique: HashSet<&str> = choices.iter().map(String::as_str).collect();
    if unique.len() != choices.len() {
        return Some("Choices must be unique.".to_string());
    }

    if choices
        .iter()
        .any(|c| c.chars().count() > MAX_VALUE_LENGTH as usize)
    {
        return Some(format!(
            "Each choice must be {MAX_VALUE_LENGTH} characters or less."
        ));
    }

    if choices.len() > MAX_CHOICES {
        return Some(format!(
            "Too many choices. Maximum allowed is {MAX_CHOICES}."
        ));
    }

    None
}

/// Make sure the default value is one of the choices.
///
/// The trimmed default is appended when it is non-empty and missing.
pub fn inject_default_choice(values: &FieldMap) -> FieldMap {
    let mut next = values.clone();
    let default = values
        .get(DEFAULT_VALUE_KEY)
        .and_then(FieldValue::as_text)
        .map(str::trim)
        .unwrap_or_default();
    if default.is_empty() {
        return next;
    }

    if let Some(FieldValue::List(choices)) = next.get_mut(CHOICES_KEY) {
        if !choices.iter().any(|c| c == default) {
            choices.push(default.to_string());
        }
    }
    next
}

pub fn before_save_format() -> SaveFormat {
    SaveFormat::new(inject_default_choice)
}

/// "multi-select" reads as "Multi-Select"; other kinds are capitalized
/// Upper-case the first character
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn type_label(value: &str) -> String {
    match value {
        "multiselect" | "multi-select" => "Multi-Select".to_string(),
        other => capitalize(other),
    }
}

pub fn order_label(value: &str) -> String {
    match FieldOrder::parse(value) {
        Some(FieldOrder::Asc) => "Ascending (A-Z)".to_string(),
        Some(FieldOrder::Desc) => "Descending (Z-A)".to_string(),
        None => value.to_string(),
    }
}

/// Form fields for editing a multi-select field
pub fn multi_select_fields(data: &FieldBuilderData) -> Vec<FieldDefinition> {
    let order = data.order.unwrap_or_default();
    let order_choices = [FieldOrder::Asc, FieldOrder::Desc]
        .iter()
        .map(|o| o.as_str().to_string())
        .collect();

    vec![
        FieldDefinition::text("Label", "label", data.label.clone())
            .with_max_length(MAX_VALUE_LENGTH)
            .with_validation(label_validation),
        FieldDefinition::readonly("Type", "type", data.field_type.clone()).with_format(type_label),
        FieldDefinition::checkbox("Required", "required", data.required)
            .with_tooltip(REQUIRED_TOOLTIP),
        FieldDefinition::text(
            "Default Value",
            DEFAULT_VALUE_KEY,
            data.default.clone().unwrap_or_default(),
        )
        .with_max_length(MAX_VALUE_LENGTH)
        .with_validation(default_value_validation),
        FieldDefinition::list(
            "Choices",
            CHOICES_KEY,
            data.choices.clone().unwrap_or_default(),
        )
        .with_sort(order)
        .with_sort_from("order")
        .with_max_length(MAX_VALUE_LENGTH)
        .with_validation(choices_validation),
        FieldDefinition::dropdown("Order", "order", order.as_str(), order_choices)
            .with_format(order_label),
    ]
}

//! Field variants and the change events they produce

use std::fmt;
use std::rc::Rc;

use dioxus_logger::tracing;
use field_types::{FieldOrder, FieldValue};

/// Default overflow threshold for text and list inputs
pub const DEFAULT_MAX_LENGTH: i32 = 1000;

// ============================================================================
// Shared callbacks
// ============================================================================

/// Per-field validation; returns the message to show, or `None` when valid
#[derive(Clone)]
pub struct Validator(Rc<dyn Fn(&FieldValue) -> Option<String>>);

impl Validator {
    pub fn new(f: impl Fn(&FieldValue) -> Option<String> + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn check(&self, value: &FieldValue) -> Option<String> {
        (self.0)(value)
    }
}

/// Display-only transform for choice labels
#[derive(Clone)]
pub struct Formatter(Rc<dyn Fn(&str) -> String>);

impl Formatter {
    pub fn new(f: impl Fn(&str) -> String + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn apply(&self, value: &str) -> String {
        (self.0)(value)
    }
}

/// Click handler carried by a button field
#[derive(Clone)]
pub struct ButtonAction(Rc<dyn Fn()>);

impl ButtonAction {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn fire(&self) {
        (self.0)()
    }
}

// Callbacks compare by identity so definitions can be used as component props.
impl PartialEq for Validator {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Formatter {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ButtonAction {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Formatter(..)")
    }
}

impl fmt::Debug for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ButtonAction(..)")
    }
}

// ============================================================================
// Variants
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    Text,
    Dropdown,
    Checkbox,
    List,
    Readonly,
    Button,
}

impl VariantKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Dropdown => "dropdown",
            Self::Checkbox => "checkbox",
            Self::List => "list",
            Self::Readonly => "readonly",
            Self::Button => "button",
        }
    }

    pub fn parse(tag: &str) -> Result<Self, VariantError> {
        match tag {
            "text" => Ok(Self::Text),
            "dropdown" => Ok(Self::Dropdown),
            "checkbox" => Ok(Self::Checkbox),
            "list" => Ok(Self::List),
            "readonly" => Ok(Self::Readonly),
            "button" => Ok(Self::Button),
            other => Err(VariantError::UnsupportedType(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum VariantError {
    #[error("Unsupported field type: {0}")]
    UnsupportedType(String),

    #[error("Field '{name}' of type {kind} cannot hold {value:?}")]
    ValueMismatch {
        name: String,
        kind: &'static str,
        value: FieldValue,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextVariant {
    pub value: String,
    pub placeholder: Option<String>,
    pub max_length: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropdownVariant {
    pub value: String,
    pub choices: Vec<String>,
    pub format: Option<Formatter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxVariant {
    pub value: bool,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListVariant {
    pub value: Vec<String>,
    pub sort: FieldOrder,
    /// Field whose live value, when it parses as an order, overrides `sort`
    pub sort_from: Option<String>,
    pub max_length: i32,
    pub format: Option<Formatter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadonlyVariant {
    pub value: String,
    pub format: Option<Formatter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonVariant {
    /// Button caption
    pub value: String,
    pub action: Option<ButtonAction>,
}

/// One form field's input kind plus its type-specific attributes.
///
/// The `value` carried here is only the mount-time value; the live value is
/// owned by [`FieldForm`](crate::builder::FieldForm).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldVariant {
    Text(TextVariant),
    Dropdown(DropdownVariant),
    Checkbox(CheckboxVariant),
    List(ListVariant),
    Readonly(ReadonlyVariant),
    Button(ButtonVariant),
}

impl FieldVariant {
    pub fn kind(&self) -> VariantKind {
        match self {
            Self::Text(_) => VariantKind::Text,
            Self::Dropdown(_) => VariantKind::Dropdown,
            Self::Checkbox(_) => VariantKind::Checkbox,
            Self::List(_) => VariantKind::List,
            Self::Readonly(_) => VariantKind::Readonly,
            Self::Button(_) => VariantKind::Button,
        }
    }

    /// Value the form starts with
    pub fn initial_value(&self) -> FieldValue {
        match self {
            Self::Text(v) => FieldValue::Text(v.value.clone()),
            Self::Dropdown(v) => FieldValue::Text(v.value.clone()),
            Self::Checkbox(v) => FieldValue::Bool(v.value),
            Self::List(v) => FieldValue::List(v.value.clone()),
            Self::Readonly(v) => FieldValue::Text(v.value.clone()),
            Self::Button(v) => FieldValue::Text(v.value.clone()),
        }
    }

    /// Value the form resets to on clear
    pub fn cleared_value(&self) -> FieldValue {
        match self {
            Self::Checkbox(_) => FieldValue::Bool(false),
            Self::List(_) => FieldValue::List(Vec::new()),
            Self::Readonly(v) => FieldValue::Text(v.value.clone()),
            Self::Dropdown(v) => FieldValue::Text(v.value.clone()),
            Self::Text(_) | Self::Button(_) => FieldValue::Text(String::new()),
        }
    }

    /// Readonly and button fields never emit change events
    pub fn emits_changes(&self) -> bool {
        !matches!(self, Self::Readonly(_) | Self::Button(_))
    }

    pub fn max_length(&self) -> Option<i32> {
        match self {
            Self::Text(v) => Some(v.max_length),
            Self::List(v) => Some(v.max_length),
            _ => None,
        }
    }

    /// Render a value for display, applying the variant's formatter if any
    pub fn display(&self, value: &str) -> String {
        let format = match self {
            Self::Dropdown(v) => v.format.as_ref(),
            Self::List(v) => v.format.as_ref(),
            Self::Readonly(v) => v.format.as_ref(),
            _ => None,
        };
        match format {
            Some(format) => format.apply(value),
            None => value.to_string(),
        }
    }
}

// ============================================================================
// Field Definitions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    /// Unique key within a form
    pub name: String,
    pub label: String,
    pub variant: FieldVariant,
    pub validation: Option<Validator>,
}

impl FieldDefinition {
    pub fn new(label: impl Into<String>, name: impl Into<String>, variant: FieldVariant) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            variant,
            validation: None,
        }
    }

    pub fn text(label: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            label,
            name,
            FieldVariant::Text(TextVariant {
                value: value.into(),
                placeholder: None,
                max_length: DEFAULT_MAX_LENGTH,
            }),
        )
    }

    pub fn dropdown(
        label: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
        choices: Vec<String>,
    ) -> Self {
        Self::new(
            label,
            name,
            FieldVariant::Dropdown(DropdownVariant {
                value: value.into(),
                choices,
                format: None,
            }),
        )
    }

    pub fn checkbox(label: impl Into<String>, name: impl Into<String>, value: bool) -> Self {
        Self::new(
            label,
            name,
            FieldVariant::Checkbox(CheckboxVariant {
                value,
                tooltip: None,
            }),
        )
    }

    pub fn list(label: impl Into<String>, name: impl Into<String>, value: Vec<String>) -> Self {
        Self::new(
            label,
            name,
            FieldVariant::List(ListVariant {
                value,
                sort: FieldOrder::Asc,
                sort_from: None,
                max_length: DEFAULT_MAX_LENGTH,
                format: None,
            }),
        )
    }

    pub fn readonly(label: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            label,
            name,
            FieldVariant::Readonly(ReadonlyVariant {
                value: value.into(),
                format: None,
            }),
        )
    }

    pub fn button(label: impl Into<String>, name: impl Into<String>, caption: impl Into<String>) -> Self {
        Self::new(
            label,
            name,
            FieldVariant::Button(ButtonVariant {
                value: caption.into(),
                action: None,
            }),
        )
    }

    /// Build a field from a type tag and an initial value.
    ///
    /// Fails on unknown tags and on values whose shape does not fit the kind.
    pub fn of_kind(
        tag: &str,
        label: impl Into<String>,
        name: impl Into<String>,
        value: FieldValue,
    ) -> Result<Self, VariantError> {
        let kind = VariantKind::parse(tag)?;
        let (label, name) = (label.into(), name.into());
        match (kind, value) {
            (VariantKind::Text, FieldValue::Text(v)) => Ok(Self::text(label, name, v)),
            (VariantKind::Dropdown, FieldValue::Text(v)) => {
                Ok(Self::dropdown(label, name, v, Vec::new()))
            }
            (VariantKind::Checkbox, FieldValue::Bool(v)) => Ok(Self::checkbox(label, name, v)),
            (VariantKind::List, FieldValue::List(v)) => Ok(Self::list(label, name, v)),
            (VariantKind::Readonly, FieldValue::Text(v)) => Ok(Self::readonly(label, name, v)),
            (VariantKind::Button, FieldValue::Text(v)) => Ok(Self::button(label, name, v)),
            (kind, value) => Err(VariantError::ValueMismatch {
                name,
                kind: kind.as_str(),
                value,
            }),
        }
    }

    pub fn with_validation(mut self, f: impl Fn(&FieldValue) -> Option<String> + 'static) -> Self {
        self.validation = Some(Validator::new(f));
        self
    }

    /// Applies to text and list fields
    pub fn with_max_length(mut self, max_length: i32) -> Self {
        match &mut self.variant {
            FieldVariant::Text(v) => v.max_length = max_length,
            FieldVariant::List(v) => v.max_length = max_length,
            _ => {}
        }
        self
    }

    /// Applies to text fields
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        if let FieldVariant::Text(v) = &mut self.variant {
            v.placeholder = Some(placeholder.into());
        }
        self
    }

    /// Applies to checkbox fields
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        if let FieldVariant::Checkbox(v) = &mut self.variant {
            v.tooltip = Some(tooltip.into());
        }
        self
    }

    /// Applies to list fields
    pub fn with_sort(mut self, sort: FieldOrder) -> Self {
        if let FieldVariant::List(v) = &mut self.variant {
            v.sort = sort;
        }
        self
    }

    /// Applies to list fields: take the view order from another field's value
    pub fn with_sort_from(mut self, name: impl Into<String>) -> Self {
        if let FieldVariant::List(v) = &mut self.variant {
            v.sort_from = Some(name.into());
        }
        self
    }

    /// Applies to dropdown, list and readonly fields
    pub fn with_format(mut self, f: impl Fn(&str) -> String + 'static) -> Self {
        match &mut self.variant {
            FieldVariant::Dropdown(v) => v.format = Some(Formatter::new(f)),
            FieldVariant::List(v) => v.format = Some(Formatter::new(f)),
            FieldVariant::Readonly(v) => v.format = Some(Formatter::new(f)),
            _ => {}
        }
        self
    }

    /// Applies to button fields
    pub fn with_action(mut self, f: impl Fn() + 'static) -> Self {
        if let FieldVariant::Button(v) = &mut self.variant {
            v.action = Some(ButtonAction::new(f));
        }
        self
    }

    pub fn validate(&self, value: &FieldValue) -> Option<String> {
        self.validation.as_ref().and_then(|v| v.check(value))
    }
}

// ============================================================================
// Change Normalization
// ============================================================================

/// Normalized change emitted by every editable variant
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub name: String,
    pub value: FieldValue,
}

/// Edits a list field supports. Indices refer to the stored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    Add(String),
    Remove(usize),
}

/// Raw widget input before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    Text(String),
    Selected(String),
    Checked(bool),
    List(ListAction),
}

/// Apply a list edit; `None` when the edit is a no-op (blank add, bad index).
pub fn apply_list_action(items: &[String], action: ListAction) -> Option<Vec<String>> {
    match action {
        ListAction::Add(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }
            let mut next = items.to_vec();
            next.push(trimmed.to_string());
            Some(next)
        }
        ListAction::Remove(index) => {
            if index >= items.len() {
                return None;
            }
            let next = items
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, item)| item.clone())
                .collect();
            Some(next)
        }
    }
}

/// Turn raw widget input into the field's change event.
///
/// `current` is the field's live value (needed for list edits). Readonly and
/// button fields, blank list additions and inputs that do not belong to the
/// variant produce nothing.
pub fn normalize_input(
    field: &FieldDefinition,
    current: &FieldValue,
    input: RawInput,
) -> Option<ChangeEvent> {
    let value = match (&field.variant, input) {
        (FieldVariant::Text(_), RawInput::Text(text)) => FieldValue::Text(text),
        (FieldVariant::Dropdown(_), RawInput::Selected(choice)) => FieldValue::Text(choice),
        (FieldVariant::Checkbox(_), RawInput::Checked(checked)) => FieldValue::Bool(checked),
        (FieldVariant::List(_), RawInput::List(action)) => {
            let items = current.as_list().unwrap_or_default();
            FieldValue::List(apply_list_action(items, action)?)
        }
        (FieldVariant::Readonly(_) | FieldVariant::Button(_), _) => return None,
        (variant, input) => {
            tracing::warn!(
                field = %field.name,
                kind = variant.kind().as_str(),
                ?input,
                "Input does not belong to field variant"
            );
            debug_assert!(false, "input does not belong to field '{}'", field.name);
            return None;
        }
    };

    Some(ChangeEvent {
        name: field.name.clone(),
        value,
    })
}

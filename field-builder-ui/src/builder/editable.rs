//! Overflow-highlighting text controller
//!
//! The surface is a native text input. What survives from a rich-text
//! editor is the overflow decoration (text past `max_length` is shown in a
//! danger span while the whole string stays the logical value) and a
//! logical caret that knows whether a new value came from typing or from
//! the outside.

use field_types::FieldValue;

use crate::builder::variant::ChangeEvent;

/// A value split at the overflow threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverflowSplit<'a> {
    pub within: &'a str,
    pub overflow: &'a str,
}

impl OverflowSplit<'_> {
    pub fn has_overflow(&self) -> bool {
        !self.overflow.is_empty()
    }
}

/// Split `value` after `max_length` characters.
///
/// A `max_length` of zero or less puts the whole value in the overflow.
pub fn split_overflow(value: &str, max_length: i32) -> OverflowSplit<'_> {
    if max_length <= 0 {
        return OverflowSplit {
            within: "",
            overflow: value,
        };
    }

    match value.char_indices().nth(max_length as usize) {
        Some((at, _)) => OverflowSplit {
            within: &value[..at],
            overflow: &value[at..],
        },
        None => OverflowSplit {
            within: value,
            overflow: "",
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// The value is what the user just typed
    Internal,
    /// The value was replaced from outside (reset, cancel, server echo)
    External,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditableText {
    name: String,
    value: String,
    max_length: i32,
    focused: bool,
    /// Caret offset in characters; `None` while unfocused
    caret: Option<usize>,
}

impl EditableText {
    pub fn new(name: impl Into<String>, value: impl Into<String>, max_length: i32) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_length,
            focused: false,
            caret: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn max_length(&self) -> i32 {
        self.max_length
    }

    pub fn set_max_length(&mut self, max_length: i32) {
        self.max_length = max_length;
    }

    pub fn split(&self) -> OverflowSplit<'_> {
        split_overflow(&self.value, self.max_length)
    }

    pub fn caret(&self) -> Option<usize> {
        self.caret
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Focusing puts the caret at the end
    pub fn focus(&mut self) {
        self.focused = true;
        self.caret = Some(self.len());
    }

    pub fn blur(&mut self) {
        self.focused = false;
        self.caret = None;
    }

    /// The user typed. Records the raw text and the caret the surface
    /// reported, and returns the change to forward.
    pub fn on_input(&mut self, raw: &str, caret: Option<usize>) -> ChangeEvent {
        self.value = raw.to_string();
        if self.focused {
            let len = self.len();
            self.caret = Some(caret.unwrap_or(len).min(len));
        }
        ChangeEvent {
            name: self.name.clone(),
            value: FieldValue::Text(self.value.clone()),
        }
    }

    /// Reconcile with the value the owner now holds.
    ///
    /// Matching the last input keeps the caret where it was. Anything else is
    /// an external replacement: the caret jumps to the end when focused and
    /// is left alone (cleared) when not.
    pub fn sync(&mut self, value: &str) -> ChangeOrigin {
        if value == self.value {
            return ChangeOrigin::Internal;
        }

        self.value = value.to_string();
        self.caret = if self.focused { Some(self.len()) } else { None };
        ChangeOrigin::External
    }
}

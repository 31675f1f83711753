//! Form state owner
//!
//! Holds the live values, the last-saved snapshot and the single error
//! line for one mounted form. Every mutation recomputes the changed-field
//! set before returning, so `has_field_changes` is always current.

use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use dioxus_logger::tracing;
use field_types::{from_wire_object, FieldMap, FieldOrder};

use crate::builder::changes::detect_changes;
use crate::builder::transport::{SaveTransport, TransportError};
use crate::builder::variant::{ChangeEvent, FieldDefinition, FieldVariant};

/// Shown for every transport failure
pub const SAVE_FAILED_MESSAGE: &str = "An error occurred while saving the field.";

static NEXT_FORM_ID: AtomicU64 = AtomicU64::new(1);

/// Caller-supplied transform applied right before validation and saving
#[derive(Clone)]
pub struct SaveFormat(Rc<dyn Fn(&FieldMap) -> FieldMap>);

impl SaveFormat {
    pub fn new(f: impl Fn(&FieldMap) -> FieldMap + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn apply(&self, values: &FieldMap) -> FieldMap {
        (self.0)(values)
    }
}

impl PartialEq for SaveFormat {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SaveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SaveFormat(..)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Clean,
    Dirty,
    Saving,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0}")]
    Validation(String),

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("An error occurred while saving the field.")]
    Transport(#[source] TransportError),
}

/// Identifies one save attempt of one form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket {
    form_id: u64,
    generation: u64,
}

/// A validated payload ready to hand to the transport
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSave {
    pub ticket: SaveTicket,
    pub payload: FieldMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Failed,
    /// The completion belonged to an abandoned or foreign save
    Discarded,
}

struct InFlight {
    generation: u64,
    payload: FieldMap,
}

pub struct FieldForm {
    id: u64,
    fields: Vec<FieldDefinition>,
    values: FieldMap,
    snapshot: FieldMap,
    changed: BTreeSet<String>,
    error: Option<String>,
    before_save: Option<SaveFormat>,
    generation: u64,
    in_flight: Option<InFlight>,
}

impl fmt::Debug for FieldForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldForm")
            .field("id", &self.id)
            .field("values", &self.values)
            .field("changed", &self.changed)
            .field("error", &self.error)
            .field("saving", &self.in_flight.is_some())
            .finish()
    }
}

impl FieldForm {
    /// Build the value map from each field's mount-time value and take the
    /// snapshot. Field names must be unique; a repeated name keeps the last
    /// definition's value.
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        let mut values = FieldMap::new();
        for field in &fields {
            if values
                .insert(field.name.clone(), field.variant.initial_value())
                .is_some()
            {
                tracing::warn!(field = %field.name, "Duplicate field name in form");
            }
        }

        Self {
            id: NEXT_FORM_ID.fetch_add(1, Ordering::Relaxed),
            fields,
            snapshot: values.clone(),
            values,
            changed: BTreeSet::new(),
            error: None,
            before_save: None,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn with_before_save(mut self, format: SaveFormat) -> Self {
        self.before_save = Some(format);
        self
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn values(&self) -> &FieldMap {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&field_types::FieldValue> {
        self.values.get(name)
    }

    /// View order for a list field. A `sort_from` field holding "asc" or
    /// "desc" wins over the order fixed at mount.
    pub fn effective_sort(&self, field: &FieldDefinition) -> Option<FieldOrder> {
        let FieldVariant::List(list) = &field.variant else {
            return None;
        };
        let live = list
            .sort_from
            .as_deref()
            .and_then(|name| self.value(name))
            .and_then(field_types::FieldValue::as_text)
            .and_then(FieldOrder::parse);
        Some(live.unwrap_or(list.sort))
    }

    pub fn snapshot(&self) -> &FieldMap {
        &self.snapshot
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn changed_fields(&self) -> &BTreeSet<String> {
        &self.changed
    }

    pub fn has_field_changes(&self) -> bool {
        !self.changed.is_empty()
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn phase(&self) -> FormPhase {
        if self.is_saving() {
            FormPhase::Saving
        } else if self.has_field_changes() {
            FormPhase::Dirty
        } else {
            FormPhase::Clean
        }
    }

    fn recompute(&mut self) {
        self.changed = detect_changes(&self.snapshot, &self.values);
    }

    /// Apply a field edit and clear the error. Names that are not part of
    /// this form are ignored so the key set never changes.
    pub fn on_change(&mut self, event: ChangeEvent) -> bool {
        self.error = None;
        let Some(slot) = self.values.get_mut(&event.name) else {
            tracing::warn!(field = %event.name, "Change for unknown field ignored");
            return false;
        };
        *slot = event.value;
        self.recompute();
        true
    }

    /// Format, validate and mark the form as saving.
    ///
    /// On validation failure the first message becomes the error and nothing
    /// is sent. A second call while a save is in flight is rejected.
    pub fn begin_save(&mut self) -> Result<PendingSave, FormError> {
        if self.is_saving() {
            tracing::debug!(form_id = self.id, "Submit ignored while saving");
            return Err(FormError::SaveInProgress);
        }

        let payload = match self.before_save.as_ref() {
            Some(format) => format.apply(&self.values),
            None => self.values.clone(),
        };

        let first_error = self.fields.iter().find_map(|field| {
            payload
                .get(&field.name)
                .and_then(|value| field.validate(value))
        });
        if let Some(message) = first_error {
            tracing::debug!(form_id = self.id, %message, "Validation failed");
            self.error = Some(message.clone());
            return Err(FormError::Validation(message));
        }

        self.generation += 1;
        self.in_flight = Some(InFlight {
            generation: self.generation,
            payload: payload.clone(),
        });

        Ok(PendingSave {
            ticket: SaveTicket {
                form_id: self.id,
                generation: self.generation,
            },
            payload,
        })
    }

    /// Apply the transport's answer for `ticket`.
    ///
    /// Success replaces both values and snapshot with the submitted payload
    /// overlaid by the echo (`default` read as `defaultValue`, non-form keys
    /// dropped). Failure keeps the user's edits and sets the generic error.
    pub fn finish_save(
        &mut self,
        ticket: SaveTicket,
        result: Result<serde_json::Value, TransportError>,
    ) -> SaveOutcome {
        let current = ticket.form_id == self.id
            && self
                .in_flight
                .as_ref()
                .is_some_and(|f| f.generation == ticket.generation);
        if !current {
            tracing::debug!(form_id = self.id, ?ticket, "Stale save completion discarded");
            return SaveOutcome::Discarded;
        }

        let Some(in_flight) = self.in_flight.take() else {
            return SaveOutcome::Discarded;
        };

        match result {
            Ok(echo) => {
                let echoed = from_wire_object(&echo);
                let merged: FieldMap = self
                    .values
                    .iter()
                    .map(|(name, current)| {
                        let value = echoed
                            .get(name)
                            .or_else(|| in_flight.payload.get(name))
                            .unwrap_or(current)
                            .clone();
                        (name.clone(), value)
                    })
                    .collect();

                tracing::info!(form_id = self.id, "Field saved successfully");
                self.snapshot = merged.clone();
                self.values = merged;
                self.error = None;
                self.recompute();
                SaveOutcome::Saved
            }
            Err(e) => {
                tracing::warn!(form_id = self.id, error = %e, "Field save failed");
                self.error = Some(SAVE_FAILED_MESSAGE.to_string());
                SaveOutcome::Failed
            }
        }
    }

    /// Full round-trip against `transport`
    pub async fn submit<T: SaveTransport + ?Sized>(
        &mut self,
        transport: &T,
    ) -> Result<(), FormError> {
        let pending = self.begin_save()?;
        let result = transport.save(&pending.payload).await;
        let failure = result.as_ref().err().cloned();
        match self.finish_save(pending.ticket, result) {
            SaveOutcome::Failed => Err(FormError::Transport(
                failure.unwrap_or_else(|| TransportError::Request("unknown".to_string())),
            )),
            SaveOutcome::Saved | SaveOutcome::Discarded => Ok(()),
        }
    }

    /// Restore the last-saved snapshot
    pub fn on_cancel(&mut self) {
        self.values = self.snapshot.clone();
        self.error = None;
        self.recompute();
    }

    /// Reset every field to its variant's empty value. The snapshot is kept,
    /// so the form reads as changed unless the defaults match it.
    pub fn on_clear(&mut self) {
        for field in &self.fields {
            self.values
                .insert(field.name.clone(), field.variant.cleared_value());
        }
        self.error = None;
        self.recompute();
    }

    /// Forget any in-flight save; its completion will be discarded.
    /// Called when the owning view goes away.
    pub fn abandon(&mut self) {
        if self.in_flight.take().is_some() {
            tracing::debug!(form_id = self.id, "In-flight save abandoned");
        }
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use async_trait::async_trait;
    use field_types::{FieldValue, DEFAULT_VALUE_KEY};
    use futures::executor::block_on;
    use serde_json::json;

    use crate::builder::variant::FieldDefinition;

    struct RecordingTransport {
        calls: RefCell<Vec<FieldMap>>,
        response: Result<serde_json::Value, TransportError>,
    }

    impl RecordingTransport {
        fn echoing() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                response: Ok(serde_json::Value::Null),
            }
        }

        fn responding(response: Result<serde_json::Value, TransportError>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                response,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl SaveTransport for RecordingTransport {
        async fn save(&self, fields: &FieldMap) -> Result<serde_json::Value, TransportError> {
            self.calls.borrow_mut().push(fields.clone());
            match &self.response {
                Ok(serde_json::Value::Null) => Ok(field_types::to_wire_object(fields)),
                other => other.clone(),
            }
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_fields() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::text("Label", "label", "Sales region").with_validation(|v| {
                match v.as_text() {
                    Some(s) if !s.trim().is_empty() => None,
                    _ => Some("Label is required.".to_string()),
                }
            }),
            FieldDefinition::readonly("Type", "type", "multi-select"),
            FieldDefinition::checkbox("Required", "required", true),
            FieldDefinition::text("Default Value", DEFAULT_VALUE_KEY, "Asia"),
            FieldDefinition::list("Choices", "choices", strings(&["Asia", "Europe"])),
            FieldDefinition::dropdown("Order", "order", "asc", strings(&["asc", "desc"])),
        ]
    }

    fn change(name: &str, value: impl Into<FieldValue>) -> ChangeEvent {
        ChangeEvent {
            name: name.to_string(),
            value: value.into(),
        }
    }

    #[test]
    fn clean_after_mount() {
        let form = FieldForm::new(sample_fields());
        assert!(!form.has_field_changes());
        assert_eq!(form.phase(), FormPhase::Clean);
        assert_eq!(form.values(), form.snapshot());
        assert_eq!(form.values().len(), 6);
        assert_eq!(form.error(), None);
    }

    #[test]
    fn change_marks_dirty_and_reverting_cleans() {
        let mut form = FieldForm::new(sample_fields());

        assert!(form.on_change(change("label", "Region")));
        assert!(form.has_field_changes());
        assert_eq!(form.phase(), FormPhase::Dirty);
        assert_eq!(
            form.changed_fields().iter().collect::<Vec<_>>(),
            vec!["label"]
        );

        form.on_change(change("label", "Sales region"));
        assert!(!form.has_field_changes());
    }

    #[test]
    fn change_clears_error() {
        let mut form = FieldForm::new(sample_fields());
        form.on_change(change("label", ""));
        assert!(form.begin_save().is_err());
        assert_eq!(form.error(), Some("Label is required."));

        form.on_change(change("label", "L"));
        assert_eq!(form.error(), None);
    }

    #[test]
    fn change_to_unknown_field_is_ignored() {
        let mut form = FieldForm::new(sample_fields());
        assert!(!form.on_change(change("nope", "x")));
        assert!(form.value("nope").is_none());
        assert!(!form.has_field_changes());
    }

    #[test]
    fn validation_failure_blocks_transport() {
        let mut form = FieldForm::new(sample_fields());
        form.on_change(change("label", ""));
        let transport = RecordingTransport::echoing();

        let result = block_on(form.submit(&transport));
        assert_eq!(
            result,
            Err(FormError::Validation("Label is required.".to_string()))
        );
        assert_eq!(form.error(), Some("Label is required."));
        assert_eq!(transport.call_count(), 0);
        assert!(!form.is_saving());
    }

    #[test]
    fn first_validation_message_wins() {
        let fields = vec![
            FieldDefinition::text("A", "a", "").with_validation(|_| Some("first".to_string())),
            FieldDefinition::text("B", "b", "").with_validation(|_| Some("second".to_string())),
        ];
        let mut form = FieldForm::new(fields);
        assert_eq!(
            form.begin_save(),
            Err(FormError::Validation("first".to_string()))
        );
    }

    #[test]
    fn before_save_format_reaches_transport() {
        let fields = vec![
            FieldDefinition::text("Label", "label", "L"),
            FieldDefinition::list("Choices", "choices", strings(&["A"])),
            FieldDefinition::text("Default Value", DEFAULT_VALUE_KEY, "B"),
        ];
        let mut form = FieldForm::new(fields).with_before_save(SaveFormat::new(|values| {
            let mut next = values.clone();
            let default = values
                .get(DEFAULT_VALUE_KEY)
                .and_then(FieldValue::as_text)
                .unwrap_or_default()
                .to_string();
            if let Some(FieldValue::List(choices)) = next.get_mut("choices") {
                if !choices.contains(&default) {
                    choices.push(default);
                }
            }
            next
        }));
        let transport = RecordingTransport::echoing();

        block_on(form.submit(&transport)).unwrap();
        let calls = transport.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0]["choices"], FieldValue::List(strings(&["A", "B"])));
        assert_eq!(
            form.value("choices"),
            Some(&FieldValue::List(strings(&["A", "B"])))
        );
        assert!(!form.has_field_changes());
    }

    #[test]
    fn save_success_resyncs_snapshot_and_renames_default() {
        let mut form = FieldForm::new(sample_fields());
        form.on_change(change("label", "Region"));
        let transport = RecordingTransport::responding(Ok(json!({
            "label": "Region (server)",
            "type": "multi-select",
            "required": true,
            "default": "Europe",
            "choices": ["Asia", "Europe"],
            "order": "asc",
            "displayAlpha": true,
            "extra": 12
        })));

        block_on(form.submit(&transport)).unwrap();
        assert_eq!(form.phase(), FormPhase::Clean);
        assert!(!form.has_field_changes());
        assert_eq!(
            form.value("label"),
            Some(&FieldValue::Text("Region (server)".to_string()))
        );
        assert_eq!(
            form.value(DEFAULT_VALUE_KEY),
            Some(&FieldValue::Text("Europe".to_string()))
        );
        assert!(form.value("default").is_none());
        assert!(form.value("displayAlpha").is_none());
        assert_eq!(form.values(), form.snapshot());
    }

    #[test]
    fn echo_missing_keys_keep_submitted_values() {
        let mut form = FieldForm::new(sample_fields());
        form.on_change(change("required", false));
        let transport = RecordingTransport::responding(Ok(json!({ "label": "Only label" })));

        block_on(form.submit(&transport)).unwrap();
        assert_eq!(form.value("required"), Some(&FieldValue::Bool(false)));
        assert_eq!(form.snapshot()["required"], FieldValue::Bool(false));
        assert_eq!(form.values().len(), 6);
    }

    #[test]
    fn formatted_value_survives_echo_without_it() {
        let mut form = FieldForm::new(sample_fields()).with_before_save(SaveFormat::new(|values| {
            let mut next = values.clone();
            if let Some(FieldValue::Text(label)) = next.get_mut("label") {
                *label = label.to_uppercase();
            }
            next
        }));
        form.on_change(change("label", "Emea"));
        let transport = RecordingTransport::responding(Ok(json!({ "required": true })));

        block_on(form.submit(&transport)).unwrap();
        assert_eq!(transport.calls.borrow()[0]["label"], FieldValue::from("EMEA"));
        assert_eq!(form.value("label"), Some(&FieldValue::from("EMEA")));
        assert_eq!(form.snapshot()["label"], FieldValue::from("EMEA"));
        assert!(!form.has_field_changes());
    }

    #[test]
    fn list_sort_follows_live_order_value() {
        let mut fields = sample_fields();
        fields[4] = FieldDefinition::list("Choices", "choices", strings(&["Asia", "Europe"]))
            .with_sort(FieldOrder::Asc)
            .with_sort_from("order");
        let mut form = FieldForm::new(fields);
        let choices = form.fields()[4].clone();
        assert_eq!(form.effective_sort(&choices), Some(FieldOrder::Asc));

        form.on_change(change("order", "desc"));
        assert_eq!(form.effective_sort(&choices), Some(FieldOrder::Desc));

        form.on_change(change("order", "sideways"));
        assert_eq!(form.effective_sort(&choices), Some(FieldOrder::Asc));

        assert_eq!(form.effective_sort(&form.fields()[0].clone()), None);
    }

    #[test]
    fn transport_failure_keeps_edits() {
        let mut form = FieldForm::new(sample_fields());
        form.on_change(change("label", "Edited"));
        let transport = RecordingTransport::responding(Err(TransportError::Status(500)));

        let result = block_on(form.submit(&transport));
        assert_eq!(
            result,
            Err(FormError::Transport(TransportError::Status(500)))
        );
        assert_eq!(form.error(), Some(SAVE_FAILED_MESSAGE));
        assert_eq!(form.value("label"), Some(&FieldValue::Text("Edited".to_string())));
        assert_eq!(form.phase(), FormPhase::Dirty);
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn second_submit_while_saving_is_rejected() {
        let mut form = FieldForm::new(sample_fields());
        let pending = form.begin_save().unwrap();
        assert_eq!(form.phase(), FormPhase::Saving);
        assert_eq!(form.begin_save(), Err(FormError::SaveInProgress));

        assert_eq!(
            form.finish_save(pending.ticket, Ok(json!({}))),
            SaveOutcome::Saved
        );
        assert!(form.begin_save().is_ok());
    }

    #[test]
    fn abandoned_save_is_discarded() {
        let mut form = FieldForm::new(sample_fields());
        form.on_change(change("label", "Edited"));
        let pending = form.begin_save().unwrap();

        form.abandon();
        assert!(!form.is_saving());
        assert_eq!(
            form.finish_save(pending.ticket, Ok(json!({ "label": "Server" }))),
            SaveOutcome::Discarded
        );
        assert_eq!(form.value("label"), Some(&FieldValue::Text("Edited".to_string())));
        assert_eq!(form.error(), None);
    }

    #[test]
    fn ticket_from_another_form_is_discarded() {
        let mut first = FieldForm::new(sample_fields());
        let mut second = FieldForm::new(sample_fields());
        let pending = first.begin_save().unwrap();
        let _ = second.begin_save().unwrap();

        assert_eq!(
            second.finish_save(pending.ticket, Err(TransportError::Status(500))),
            SaveOutcome::Discarded
        );
        assert!(second.is_saving());
        assert_eq!(second.error(), None);
    }

    #[test]
    fn clear_uses_variant_defaults() {
        let mut form = FieldForm::new(sample_fields());
        form.on_clear();

        assert_eq!(form.value("label"), Some(&FieldValue::Text(String::new())));
        assert_eq!(
            form.value("type"),
            Some(&FieldValue::Text("multi-select".to_string()))
        );
        assert_eq!(form.value("required"), Some(&FieldValue::Bool(false)));
        assert_eq!(form.value("choices"), Some(&FieldValue::List(Vec::new())));
        assert_eq!(form.value("order"), Some(&FieldValue::Text("asc".to_string())));
        assert!(form.has_field_changes());
        assert!(!form.changed_fields().contains("type"));
    }

    #[test]
    fn clear_then_cancel_restores_snapshot() {
        let mut form = FieldForm::new(sample_fields());
        let mounted = form.snapshot().clone();

        form.on_clear();
        form.on_cancel();
        assert_eq!(form.values(), &mounted);
        assert!(!form.has_field_changes());
        assert_eq!(form.error(), None);
    }

    #[test]
    fn cancel_restores_last_saved_not_mount_values() {
        let mut form = FieldForm::new(sample_fields());
        form.on_change(change("label", "Saved label"));
        block_on(form.submit(&RecordingTransport::echoing())).unwrap();

        form.on_change(change("label", "Unsaved"));
        form.on_cancel();
        assert_eq!(
            form.value("label"),
            Some(&FieldValue::Text("Saved label".to_string()))
        );
    }
}

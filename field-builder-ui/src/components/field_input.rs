//! Variant renderers

use dioxus::prelude::*;
use dioxus_logger::tracing;
use field_types::{FieldOrder, FieldValue};
use wasm_bindgen::JsCast;

use crate::builder::{
    list_rows, normalize_input, split_overflow, ChangeEvent, ChangeOrigin, EditableText,
    FieldDefinition, FieldVariant, Formatter, ListAction, RawInput,
};

/// Render one field by its variant
#[component]
pub fn FieldInput(
    field: FieldDefinition,
    value: FieldValue,
    on_change: EventHandler<ChangeEvent>,
) -> Element {
    let label = field.label.clone();
    let dispatch = {
        let field = field.clone();
        let value = value.clone();
        move |input: RawInput| {
            if let Some(event) = normalize_input(&field, &value, input) {
                on_change.call(event);
            }
        }
    };

    let control = match field.variant.clone() {
        FieldVariant::Text(text) => rsx! {
            EditableTextInput {
                name: field.name.clone(),
                value: value.as_text().unwrap_or_default().to_string(),
                max_length: text.max_length,
                placeholder: text.placeholder.unwrap_or_default(),
                on_change,
            }
        },
        FieldVariant::Dropdown(dropdown) => {
            let current = value.as_text().unwrap_or_default().to_string();
            let options: Vec<(String, String, bool)> = dropdown
                .choices
                .iter()
                .map(|choice| (choice.clone(), field.variant.display(choice), *choice == current))
                .collect();
            rsx! {
                select {
                    class: "field-select",
                    name: "{field.name}",
                    onchange: move |e: FormEvent| dispatch(RawInput::Selected(e.value())),
                    for (choice, caption, selected) in options {
                        option { key: "{choice}", value: "{choice}", selected, "{caption}" }
                    }
                }
            }
        }
        FieldVariant::Checkbox(checkbox) => {
            let checked = value.as_bool().unwrap_or(false);
            rsx! {
                input {
                    class: "field-checkbox",
                    r#type: "checkbox",
                    name: "{field.name}",
                    checked,
                    onchange: move |e: FormEvent| dispatch(RawInput::Checked(e.checked())),
                }
                if let Some(tooltip) = checkbox.tooltip {
                    span { class: "field-builder-status", " {tooltip}" }
                }
            }
        }
        FieldVariant::List(list) => rsx! {
            ListInput {
                name: field.name.clone(),
                items: value.as_list().map(<[String]>::to_vec).unwrap_or_default(),
                sort: list.sort,
                max_length: list.max_length,
                format: list.format,
                on_action: move |action: ListAction| dispatch(RawInput::List(action)),
            }
        },
        FieldVariant::Readonly(_) => {
            let shown = field.variant.display(value.as_text().unwrap_or_default());
            rsx! {
                div { class: "field-readonly", "{shown}" }
            }
        }
        FieldVariant::Button(button) => {
            let caption = button.value.clone();
            let action = button.action.clone();
            rsx! {
                button {
                    class: "field-button",
                    r#type: "button",
                    onclick: move |_| {
                        if let Some(action) = action.as_ref() {
                            action.fire();
                        }
                    },
                    "{caption}"
                }
            }
        }
    };

    rsx! {
        div {
            class: "field-row",
            label { class: "field-row-label", "{label}" }
            div { {control} }
        }
    }
}

/// Text input with the characters past `max_length` mirrored in a danger span
#[component]
pub fn EditableTextInput(
    name: String,
    value: String,
    max_length: i32,
    #[props(default)] placeholder: String,
    on_change: EventHandler<ChangeEvent>,
    on_enter: Option<EventHandler<()>>,
) -> Element {
    let element_id = use_hook(|| format!("field-text-{}", uuid::Uuid::new_v4()));
    let mut controller = use_signal(|| EditableText::new(name.clone(), value.clone(), max_length));

    let id_for_sync = element_id.clone();
    {
        let value = value.clone();
        use_effect(use_reactive!(|(value, max_length)| {
            let mut controller = controller.write();
            controller.set_max_length(max_length);
            if controller.sync(&value) == ChangeOrigin::External {
                if let Some(caret) = controller.caret() {
                    place_caret(&id_for_sync, &value, caret);
                }
            }
        }));
    }

    let id_for_input = element_id.clone();
    let split = split_overflow(&value, max_length);
    let wrap_class = if split.has_overflow() {
        "field-text-wrap has-overflow"
    } else {
        "field-text-wrap"
    };

    rsx! {
        div {
            class: "{wrap_class}",
            input {
                id: "{element_id}",
                class: "field-text",
                r#type: "text",
                name: "{name}",
                value: "{value}",
                placeholder: "{placeholder}",
                aria_invalid: split.has_overflow(),
                onfocus: move |_| controller.write().focus(),
                onblur: move |_| controller.write().blur(),
                oninput: move |e: FormEvent| {
                    let raw = e.value();
                    let caret = read_caret(&id_for_input, &raw);
                    let event = controller.write().on_input(&raw, caret);
                    on_change.call(event);
                },
                onkeydown: move |e: KeyboardEvent| {
                    if let Some(on_enter) = on_enter {
                        if e.key() == Key::Enter {
                            e.prevent_default();
                            on_enter.call(());
                        }
                    }
                },
            }
            if split.has_overflow() {
                div {
                    class: "field-text-mirror",
                    aria_hidden: "true",
                    span { "{split.within}" }
                    span { class: "field-text-overflow", "{split.overflow}" }
                }
            }
        }
    }
}

/// Sorted list with remove buttons and an add input.
///
/// `format` only changes the row captions; actions carry stored indices and
/// the draft text as typed.
#[component]
pub fn ListInput(
    name: String,
    items: Vec<String>,
    sort: FieldOrder,
    max_length: i32,
    #[props(!optional)] format: Option<Formatter>,
    on_action: EventHandler<ListAction>,
) -> Element {
    let mut draft = use_signal(String::new);

    let mut commit = move || {
        let text = draft.peek().clone();
        if text.trim().is_empty() {
            return;
        }
        on_action.call(ListAction::Add(text));
        draft.set(String::new());
    };

    let rows = list_rows(&items, sort, max_length, format.as_ref());

    rsx! {
        div {
            class: "field-list",
            div {
                class: "field-list-add",
                div {
                    class: "field-list-draft",
                    EditableTextInput {
                        name: "{name}-draft",
                        value: draft(),
                        max_length,
                        placeholder: "Add a choice",
                        on_change: move |event: ChangeEvent| {
                            draft.set(event.value.as_text().unwrap_or_default().to_string());
                        },
                        on_enter: move |_| commit(),
                    }
                }
                button {
                    class: "field-button",
                    r#type: "button",
                    disabled: draft.read().trim().is_empty(),
                    onclick: move |_| commit(),
                    "Add"
                }
            }
            if !rows.is_empty() {
                ul {
                    class: "field-list-items",
                    for row in rows {
                        li {
                            key: "{row.index}-{row.within}{row.overflow}",
                            class: "field-list-item",
                            span {
                                "{row.within}"
                                if !row.overflow.is_empty() {
                                    span { class: "field-text-overflow", "{row.overflow}" }
                                }
                            }
                            button {
                                class: "field-list-remove",
                                r#type: "button",
                                title: "Remove",
                                onclick: move |_| on_action.call(ListAction::Remove(row.index)),
                                "×"
                            }
                        }
                    }
                }
            }
        }
    }
}

// DOM selection offsets are UTF-16 code units; the controller counts chars.

fn chars_to_utf16(value: &str, chars: usize) -> u32 {
    value.chars().take(chars).map(char::len_utf16).sum::<usize>() as u32
}

fn utf16_to_chars(value: &str, units: u32) -> usize {
    let mut seen = 0usize;
    value
        .chars()
        .take_while(|c| {
            seen += c.len_utf16();
            seen <= units as usize
        })
        .count()
}

fn find_input(element_id: &str) -> Option<web_sys::HtmlInputElement> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(element_id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
}

fn read_caret(element_id: &str, value: &str) -> Option<usize> {
    let input = find_input(element_id)?;
    let units = input.selection_start().ok().flatten()?;
    Some(utf16_to_chars(value, units))
}

fn place_caret(element_id: &str, value: &str, caret: usize) {
    let Some(input) = find_input(element_id) else {
        return;
    };
    let at = chars_to_utf16(value, caret);
    if let Err(e) = input.set_selection_range(at, at) {
        tracing::debug!("Failed to move caret: {:?}", e);
    }
}

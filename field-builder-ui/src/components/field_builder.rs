use dioxus::prelude::*;
use dioxus_logger::tracing;

use crate::api::HttpFieldApi;
use crate::builder::{
    before_save_format, multi_select_fields, product_before_save_format, product_fields,
    ChangeEvent, FieldDefinition, FieldForm, LoadTransport, ProductData, SaveClient, SaveFormat,
    SaveOutcome, SaveTransport, PRODUCT_TITLE,
};
use crate::components::field_input::FieldInput;
use crate::components::styles::FIELD_BUILDER_STYLES;

/// Generic form host: renders every field and owns the save lifecycle
#[component]
pub fn FieldBuilder(
    fields: Vec<FieldDefinition>,
    save: SaveClient,
    #[props(!optional)] before_save: Option<SaveFormat>,
    #[props(default)] title: String,
) -> Element {
    let mut form = use_signal(|| {
        let form = FieldForm::new(fields.clone());
        match before_save.clone() {
            Some(format) => form.with_before_save(format),
            None => form,
        }
    });

    // The save task dies with this scope; make sure a late completion is
    // never applied to a form that outlived it.
    use_drop(move || {
        if let Ok(mut form) = form.try_write() {
            form.abandon();
        }
    });

    let on_save = move |_: MouseEvent| {
        let started = form.write().begin_save();
        let pending = match started {
            Ok(pending) => pending,
            Err(e) => {
                tracing::debug!("Save not started: {}", e);
                return;
            }
        };

        let save = save.clone();
        spawn(async move {
            let result = save.save(&pending.payload).await;
            if let Err(e) = &result {
                tracing::error!("Failed to save field: {}", e);
            }
            let outcome = form.write().finish_save(pending.ticket, result);
            if outcome == SaveOutcome::Discarded {
                tracing::debug!("Save completion discarded");
            }
        });
    };

    let state = form.read();
    let entries: Vec<(FieldDefinition, field_types::FieldValue)> = state
        .fields()
        .iter()
        .map(|field| {
            let value = state
                .value(&field.name)
                .cloned()
                .unwrap_or_else(|| field.variant.initial_value());
            let field = match state.effective_sort(field) {
                Some(order) => field.clone().with_sort(order),
                None => field.clone(),
            };
            (field, value)
        })
        .collect();
    let saving = state.is_saving();
    let has_changes = state.has_field_changes();
    let error = state.error().map(str::to_string);
    drop(state);

    rsx! {
        style { {FIELD_BUILDER_STYLES} }

        div {
            class: "field-builder",
            if !title.is_empty() {
                h2 { class: "field-builder-title", "{title}" }
            }

            for (field, value) in entries {
                FieldInput {
                    key: "{field.name}",
                    field,
                    value,
                    on_change: move |event: ChangeEvent| {
                        form.write().on_change(event);
                    },
                }
            }

            if let Some(error) = error {
                p { class: "field-builder-error", role: "alert", "{error}" }
            }

            div {
                class: "field-builder-actions",
                button {
                    class: "field-button",
                    r#type: "button",
                    disabled: saving,
                    onclick: move |_| form.write().on_clear(),
                    "Clear"
                }
                button {
                    class: "field-button",
                    r#type: "button",
                    disabled: saving || !has_changes,
                    onclick: move |_| form.write().on_cancel(),
                    "Cancel"
                }
                button {
                    class: "field-button field-button--primary",
                    r#type: "button",
                    disabled: saving || !has_changes,
                    onclick: on_save,
                    if saving { "Saving..." } else { "Save changes" }
                }
            }
        }
    }
}

/// Loads the field from the server and edits it as a multi-select
#[component]
pub fn MultiSelectFieldBuilder() -> Element {
    let api = use_hook(HttpFieldApi::from_location);
    let save = use_hook({
        let api = api.clone();
        move || SaveClient::new(api)
    });
    let before_save = use_hook(before_save_format);

    let field = use_resource(move || {
        let api = api.clone();
        async move {
            api.load()
                .await
                .inspect_err(|e| tracing::error!("Failed to load field: {}", e))
        }
    });

    let content = match &*field.read() {
        None => rsx! {
            div { class: "field-builder-status", "Loading field..." }
        },
        Some(Err(e)) => rsx! {
            p { class: "field-builder-error", role: "alert", "Failed to load field: {e}" }
        },
        Some(Ok(data)) => rsx! {
            FieldBuilder {
                title: "Field Builder",
                fields: multi_select_fields(data),
                save: save.clone(),
                before_save: Some(before_save.clone()),
            }
        },
    };

    content
}

/// Product showcase form; saves through the same field endpoint
#[component]
pub fn ProductFieldBuilder(#[props(default)] product: ProductData) -> Element {
    let save = use_hook(|| SaveClient::new(HttpFieldApi::from_location()));
    let before_save = use_hook(product_before_save_format);

    rsx! {
        FieldBuilder {
            title: PRODUCT_TITLE.to_string(),
            fields: product_fields(&product),
            save: save.clone(),
            before_save: Some(before_save.clone()),
        }
    }
}

//! Dioxus views over the builder engine

mod field_builder;
mod field_input;
mod styles;

pub use field_builder::{FieldBuilder, MultiSelectFieldBuilder, ProductFieldBuilder};
pub use field_input::{EditableTextInput, FieldInput, ListInput};
pub use styles::FIELD_BUILDER_STYLES;

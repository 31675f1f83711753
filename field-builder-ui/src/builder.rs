//! Field builder engine - no RSX, no signals
//!
//! Everything the components need to decide *what* to show and *what* to
//! send lives here so it can be exercised without a browser.

pub mod changes;
pub mod config;
pub mod editable;
pub mod form;
pub mod ordering;
pub mod product;
pub mod transport;
pub mod variant;

pub use changes::detect_changes;
pub use config::{before_save_format, inject_default_choice, multi_select_fields};
pub use editable::{split_overflow, ChangeOrigin, EditableText, OverflowSplit};
pub use form::{
    FieldForm, FormError, FormPhase, PendingSave, SaveFormat, SaveOutcome, SaveTicket,
    SAVE_FAILED_MESSAGE,
};
pub use ordering::{list_rows, order_by, ordered_view, ListRow};
pub use product::{product_before_save_format, product_fields, ProductData, PRODUCT_TITLE};
pub use transport::{LoadTransport, SaveClient, SaveTransport, TransportError};
pub use variant::{
    normalize_input, ChangeEvent, FieldDefinition, FieldVariant, Formatter, ListAction, RawInput,
    VariantError, VariantKind,
};

//! View-time ordering for list choices
//!
//! Stored lists keep insertion order; sorting only happens when rendering.

use std::cmp::Ordering;

use field_types::FieldOrder;

use crate::builder::editable::split_overflow;
use crate::builder::variant::Formatter;

/// Case-insensitive comparison with a case-sensitive tiebreak, close to what
/// a browser's default collation does for plain labels.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare(order: FieldOrder, a: &str, b: &str) -> Ordering {
    match order {
        FieldOrder::Asc => collate(a, b),
        FieldOrder::Desc => collate(b, a),
    }
}

/// Sorted copy of `values`; the input is left untouched.
pub fn order_by(values: &[String], order: FieldOrder) -> Vec<String> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| compare(order, a, b));
    sorted
}

/// Sorted view that remembers each element's stored index.
///
/// Use the index, not the view position, when editing the underlying list.
pub fn ordered_view(values: &[String], order: FieldOrder) -> Vec<(usize, &str)> {
    let mut view: Vec<(usize, &str)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i, v.as_str()))
        .collect();
    view.sort_by(|(_, a), (_, b)| compare(order, a, b));
    view
}

/// One rendered list entry: the stored index plus its caption split at the
/// overflow threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub index: usize,
    pub within: String,
    pub overflow: String,
}

/// Rows in view order. Sorting uses the stored values; only the caption is
/// passed through `format`.
pub fn list_rows(
    values: &[String],
    order: FieldOrder,
    max_length: i32,
    format: Option<&Formatter>,
) -> Vec<ListRow> {
    ordered_view(values, order)
        .into_iter()
        .map(|(index, item)| {
            let caption = match format {
                Some(f) => f.apply(item),
                None => item.to_string(),
            };
            let split = split_overflow(&caption, max_length);
            ListRow {
                index,
                within: split.within.to_string(),
                overflow: split.overflow.to_string(),
            }
        })
        .collect()
}

use std::collections::BTreeSet;

use field_types::FieldMap;

/// Names of fields in `current` whose value differs from `snapshot`.
///
/// Values compare structurally (lists element-wise). A key missing from the
/// snapshot counts as changed. An empty result means the form is clean.
pub fn detect_changes(snapshot: &FieldMap, current: &FieldMap) -> BTreeSet<String> {
    current
        .iter()
        .filter(|(name, value)| snapshot.get(name.as_str()) != Some(*value))
        .map(|(name, _)| name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_types::FieldValue;

    fn map(entries: &[(&str, FieldValue)]) -> FieldMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn identical_maps_are_clean() {
        let values = map(&[
            ("label", FieldValue::Text("L".to_string())),
            ("choices", FieldValue::List(vec!["a".to_string()])),
        ]);
        assert!(detect_changes(&values, &values.clone()).is_empty());
    }

    #[test]
    fn lists_compare_element_wise() {
        let snapshot = map(&[(
            "choices",
            FieldValue::List(vec!["a".to_string(), "b".to_string()]),
        )]);
        let reordered = map(&[(
            "choices",
            FieldValue::List(vec!["b".to_string(), "a".to_string()]),
        )]);
        let changes = detect_changes(&snapshot, &reordered);
        assert_eq!(changes.into_iter().collect::<Vec<_>>(), vec!["choices"]);
    }

    #[test]
    fn empty_string_and_empty_list_differ() {
        let snapshot = map(&[("value", FieldValue::Text(String::new()))]);
        let current = map(&[("value", FieldValue::List(Vec::new()))]);
        assert!(detect_changes(&snapshot, &current).contains("value"));
    }

    #[test]
    fn missing_snapshot_key_counts_as_changed() {
        let snapshot = FieldMap::new();
        let current = map(&[("required", FieldValue::Bool(false))]);
        assert!(detect_changes(&snapshot, &current).contains("required"));
    }

    #[test]
    fn only_current_keys_are_reported() {
        let snapshot = map(&[("gone", FieldValue::Bool(true))]);
        assert!(detect_changes(&snapshot, &FieldMap::new()).is_empty());
    }
}

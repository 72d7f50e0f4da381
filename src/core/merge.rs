//! Merging backend data objects into UI state.
//!
//! A data object is a JSON map. Merging copies the source fields over the
//! target; overwriting additionally nulls every target field the source does
//! not carry, so stale values disappear from the view without the key itself
//! vanishing from templates that read it.

use leptos::prelude::*;
use serde_json::{Map, Value};

/// How [`merge_into`] treats fields that only exist in the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    /// Keep target-only fields untouched.
    #[default]
    Merge,
    /// Set target-only fields to `null`.
    Overwrite,
}

/// Copy `src` into `obj` according to `mode`.
pub fn merge_into(obj: &mut Map<String, Value>, src: &Map<String, Value>, mode: MergeMode) {
    for (key, value) in src {
        obj.insert(key.clone(), value.clone());
    }

    if mode == MergeMode::Overwrite {
        for (key, value) in obj.iter_mut() {
            if src.get(key) != Some(&*value) {
                *value = Value::Null;
            }
        }
    }
}

/// Something a data object can be merged into.
pub trait MergeTarget {
    /// Merge `src` into the target.
    fn merge(&mut self, src: &Map<String, Value>, mode: MergeMode);

    /// A copy of the current data object.
    fn snapshot(&self) -> Map<String, Value>;
}

impl MergeTarget for Map<String, Value> {
    fn merge(&mut self, src: &Map<String, Value>, mode: MergeMode) {
        merge_into(self, src, mode);
    }

    fn snapshot(&self) -> Map<String, Value> {
        self.clone()
    }
}

/// Reactive target: subscribers are notified once per merge.
impl MergeTarget for RwSignal<Map<String, Value>> {
    fn merge(&mut self, src: &Map<String, Value>, mode: MergeMode) {
        self.update(|obj| merge_into(obj, src, mode));
    }

    fn snapshot(&self) -> Map<String, Value> {
        self.get_untracked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_merge_keeps_target_only_fields() {
        let mut obj = map(json!({"name": "old", "color": "red"}));
        merge_into(&mut obj, &map(json!({"name": "new", "size": 3})), MergeMode::Merge);

        assert_eq!(
            Value::Object(obj),
            json!({"name": "new", "color": "red", "size": 3})
        );
    }

    #[test]
    fn test_overwrite_nulls_target_only_fields() {
        let mut obj = map(json!({"name": "old", "color": "red"}));
        merge_into(&mut obj, &map(json!({"name": "new", "size": 3})), MergeMode::Overwrite);

        assert_eq!(
            Value::Object(obj),
            json!({"name": "new", "color": null, "size": 3})
        );
    }

    #[test]
    fn test_overwrite_with_empty_source() {
        let mut obj = map(json!({"a": 1, "b": [1, 2]}));
        merge_into(&mut obj, &Map::new(), MergeMode::Overwrite);

        assert_eq!(Value::Object(obj), json!({"a": null, "b": null}));
    }

    #[test]
    fn test_nested_values_are_replaced_not_merged() {
        let mut obj = map(json!({"meta": {"a": 1, "b": 2}}));
        merge_into(&mut obj, &map(json!({"meta": {"c": 3}})), MergeMode::Merge);

        assert_eq!(Value::Object(obj), json!({"meta": {"c": 3}}));
    }

    #[test]
    fn test_map_target_snapshot() {
        let mut target = map(json!({"x": 1}));
        MergeTarget::merge(&mut target, &map(json!({"y": 2})), MergeMode::Merge);
        assert_eq!(Value::Object(target.snapshot()), json!({"x": 1, "y": 2}));
    }

    #[test]
    fn test_signal_target() {
        let owner = leptos::reactive::owner::Owner::new();
        owner.with(|| {
            let mut signal = RwSignal::new(map(json!({"x": 1, "stale": true})));
            signal.merge(&map(json!({"x": 2})), MergeMode::Overwrite);

            assert_eq!(
                Value::Object(signal.snapshot()),
                json!({"x": 2, "stale": null})
            );
        });
    }
}

//! Field-wise merge of two evaluated config objects.

use super::value::{ConfigMap, ConfigValue};

/// Keys emitted first, in this order, when present.
pub const CANONICAL_ORDER: [&str; 6] = ["darkMode", "presets", "content", "theme", "plugins", "variants"];

/// How one top-level key combines its existing and incoming values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Incoming wins when present.
    Override,
    /// Existing items first, then new ones; duplicates dropped.
    UnionDedupe,
    /// Key-wise recursive merge of nested maps.
    DeepMerge,
}

impl MergePolicy {
    pub fn for_key(key: &str) -> Self {
        match key {
            "presets" | "plugins" => Self::UnionDedupe,
            "theme" | "variants" => Self::DeepMerge,
            // content globs are regenerated on every run
            _ => Self::Override,
        }
    }

    fn apply(self, existing: &ConfigValue, incoming: &ConfigValue) -> ConfigValue {
        match self {
            Self::Override => incoming.clone(),
            Self::UnionDedupe => union_dedupe(existing, incoming),
            Self::DeepMerge => deep_merge(existing, incoming),
        }
    }
}

/// Merge `incoming` into `existing`.
///
/// Keys present on one side only pass through. Output order is
/// [`CANONICAL_ORDER`], then remaining existing keys, then incoming-only keys.
/// Merging the same incoming map twice is a no-op the second time.
pub fn merge(existing: &ConfigMap, incoming: &ConfigMap) -> ConfigMap {
    let mut merged = ConfigMap::with_capacity(existing.len() + incoming.len());

    let ordered_keys = CANONICAL_ORDER
        .iter()
        .copied()
        .filter(|k| existing.contains_key(*k) || incoming.contains_key(*k))
        .chain(existing.keys().map(String::as_str))
        .chain(incoming.keys().map(String::as_str));

    for key in ordered_keys {
        if merged.contains_key(key) {
            continue;
        }
        let value = match (existing.get(key), incoming.get(key)) {
            (Some(old), Some(new)) => MergePolicy::for_key(key).apply(old, new),
            (Some(only), None) | (None, Some(only)) => only.clone(),
            (None, None) => continue,
        };
        merged.insert(key.to_string(), value);
    }

    merged
}

fn union_dedupe(existing: &ConfigValue, incoming: &ConfigValue) -> ConfigValue {
    let mut items: Vec<ConfigValue> = Vec::new();
    for item in as_list(existing).iter().chain(as_list(incoming)) {
        if !items.contains(item) {
            items.push(item.clone());
        }
    }
    ConfigValue::Array(items)
}

/// A non-array value counts as a one-element list.
fn as_list(value: &ConfigValue) -> &[ConfigValue] {
    match value {
        ConfigValue::Array(items) => items,
        other => std::slice::from_ref(other),
    }
}

fn deep_merge(existing: &ConfigValue, incoming: &ConfigValue) -> ConfigValue {
    let (ConfigValue::Object(old), ConfigValue::Object(new)) = (existing, incoming) else {
        return incoming.clone();
    };

    let mut merged = old.clone();
    for (key, value) in new {
        let next = match merged.get(key) {
            Some(current) => deep_merge(current, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    ConfigValue::Object(merged)
}

//! Two-layer property resolution.
//!
//! A variant declares a defaults layer; a document may store an override
//! layer per block. Lookups consult the override layer first and fall back to
//! the defaults layer. The merge is shallow: an override value replaces the
//! default for that key wholesale, so a stored array is never appended to the
//! default array and stored objects are never merged into default objects.
//!
//! JSON `null` in the override layer counts as "not set" and falls through
//! to the default. So does an override whose shape does not fit the declared
//! default: a string where a list is declared, a non-boolean where a flag is
//! declared. Keys with no declared default accept any non-null value.

use serde_json::{Map, Value};
use std::borrow::Cow;

/// Property object as stored in documents and declared by variants.
pub type PropertyMap = Map<String, Value>;

/// Read-only view over a defaults layer and an override layer.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedProperties<'a> {
    defaults: &'a PropertyMap,
    overrides: &'a PropertyMap,
}

impl<'a> ResolvedProperties<'a> {
    pub fn new(defaults: &'a PropertyMap, overrides: &'a PropertyMap) -> Self {
        Self {
            defaults,
            overrides,
        }
    }

    fn usable_override(&self, key: &str) -> Option<&'a Value> {
        self.overrides
            .get(key)
            .filter(|v| fits_default(self.defaults.get(key), v))
    }

    /// Effective value for `key`.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.usable_override(key).or_else(|| self.defaults.get(key))
    }

    /// True when the override layer supplies a usable value for `key`.
    pub fn is_overridden(&self, key: &str) -> bool {
        self.usable_override(key).is_some()
    }

    /// String value for `key`.
    ///
    /// Numbers and booleans stored by the editor are displayed as text. A
    /// value of any other shape falls back to the declared default, and a key
    /// with no usable value yields an empty string.
    pub fn text(&self, key: &str) -> Cow<'a, str> {
        self.overrides
            .get(key)
            .and_then(scalar_text)
            .or_else(|| self.defaults.get(key).and_then(scalar_text))
            .unwrap_or(Cow::Borrowed(""))
    }

    /// Boolean value for `key`; non-boolean overrides fall back to the default.
    pub fn flag(&self, key: &str) -> bool {
        self.overrides
            .get(key)
            .and_then(Value::as_bool)
            .or_else(|| self.defaults.get(key).and_then(Value::as_bool))
            .unwrap_or(false)
    }

    /// Array value for `key`; non-array overrides fall back to the default.
    pub fn list(&self, key: &str) -> &'a [Value] {
        self.overrides
            .get(key)
            .and_then(Value::as_array)
            .or_else(|| self.defaults.get(key).and_then(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// String items of the array at `key`, skipping entries that are not text.
    pub fn text_list(&self, key: &str) -> Vec<Cow<'a, str>> {
        self.list(key).iter().filter_map(scalar_text).collect()
    }

    /// Flatten both layers into the effective property object.
    ///
    /// Agrees with the typed readers: a value reported here is the one a
    /// variant renders.
    pub fn effective(&self) -> PropertyMap {
        let mut merged = self.defaults.clone();
        for (key, value) in self.overrides {
            if fits_default(self.defaults.get(key), value) {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    }
}

/// Whether an override can stand in for the declared default.
fn fits_default(default: Option<&Value>, value: &Value) -> bool {
    match (default, value) {
        (_, Value::Null) => false,
        (None | Some(Value::Null), _) => true,
        (Some(Value::String(_) | Value::Number(_)), v) => scalar_text(v).is_some(),
        (Some(Value::Bool(_)), v) => v.is_boolean(),
        (Some(Value::Array(_)), v) => v.is_array(),
        (Some(Value::Object(_)), v) => v.is_object(),
    }
}

fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

/// Read a text field from a nested object such as a project entry.
pub fn field_text<'v>(item: &'v Value, key: &str) -> Cow<'v, str> {
    item.get(key)
        .and_then(scalar_text)
        .unwrap_or(Cow::Borrowed(""))
}

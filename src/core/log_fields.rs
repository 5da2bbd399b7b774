//! Key-value fields attached to log events
//!
//! Values are coerced to their `Display` form on insertion, so an emitted
//! event only ever carries strings. Absent values become [`NIL`].

use serde::{Deserialize, Serialize};
use std::collections::hash_map::{self, HashMap};
use std::fmt;

/// Placeholder written for a field value that is absent.
pub const NIL: &str = "nil";

/// Renders `Some(value)` as the value and `None` as [`NIL`]
///
/// ```
/// use rust_json_logger::OrNil;
///
/// assert_eq!(OrNil(Some(3)).to_string(), "3");
/// assert_eq!(OrNil::<i32>(None).to_string(), "nil");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OrNil<T>(pub Option<T>);

impl<T: fmt::Display> fmt::Display for OrNil<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => fmt::Display::fmt(value, f),
            None => f.write_str(NIL),
        }
    }
}

/// String-keyed fields for one event or for a logger's permanent set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields {
    fields: HashMap<String, String>,
}

impl Fields {
    /// Create an empty set of fields
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Add a field, rendering the value with `Display`
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: fmt::Display,
    {
        self.add_field(key, value);
        self
    }

    /// Add a field whose value may be absent; `None` is stored as [`NIL`]
    pub fn with_optional<K, V>(mut self, key: K, value: Option<V>) -> Self
    where
        K: Into<String>,
        V: fmt::Display,
    {
        self.add_field(key, OrNil(value));
        self
    }

    /// Add a field (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: fmt::Display,
    {
        self.fields.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, String> {
        self.fields.iter()
    }

    /// Combine per-call fields with a logger's permanent fields.
    ///
    /// Every permanent key overwrites the same per-call key. Keys present on
    /// only one side pass through. The result is always freshly allocated.
    pub fn merge(per_call: Option<&Fields>, permanent: &Fields) -> Fields {
        let capacity = per_call.map_or(0, Fields::len) + permanent.len();
        let mut merged = HashMap::with_capacity(capacity);

        if let Some(per_call) = per_call {
            merged.extend(per_call.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged.extend(permanent.iter().map(|(k, v)| (k.clone(), v.clone())));

        Fields { fields: merged }
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: fmt::Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        fields.extend(iter);
        fields
    }
}

impl<K, V> Extend<(K, V)> for Fields
where
    K: Into<String>,
    V: fmt::Display,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add_field(key, value);
        }
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = (&'a String, &'a String);
    type IntoIter = hash_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_display_strings() {
        let fields = Fields::new()
            .with_field("user_id", 12345)
            .with_field("ratio", 0.5)
            .with_field("ok", true)
            .with_optional::<_, &str>("session", None);

        assert_eq!(fields.get("user_id"), Some("12345"));
        assert_eq!(fields.get("ratio"), Some("0.5"));
        assert_eq!(fields.get("ok"), Some("true"));
        assert_eq!(fields.get("session"), Some(NIL));
    }

    #[test]
    fn test_permanent_fields_win() {
        let per_call = Fields::new()
            .with_field("test", "shadow")
            .with_field("local", "message");
        let permanent = Fields::new().with_field("test", "message");

        let merged = Fields::merge(Some(&per_call), &permanent);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("test"), Some("message"));
        assert_eq!(merged.get("local"), Some("message"));
    }

    #[test]
    fn test_merge_with_empty_sides() {
        let permanent = Fields::new().with_field("service", "api");
        assert_eq!(Fields::merge(None, &permanent), permanent);

        let per_call = Fields::new().with_field("request", "42");
        assert_eq!(Fields::merge(Some(&per_call), &Fields::new()), per_call);

        assert!(Fields::merge(None, &Fields::new()).is_empty());
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let fields: Fields = [("a", 1)].into_iter().collect();
        assert_eq!(serde_json::to_string(&fields).unwrap(), r#"{"a":"1"}"#);
    }
}

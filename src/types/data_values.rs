use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Value;

/// Current snapshot of a signal form: data element id → field value.
///
/// Ids are opaque; unlike rule variable names they are never parsed.
/// Deserializes from a flat JSON object such as the `dataValues` of an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataValues {
    data: HashMap<String, Value>,
}

impl DataValues {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, builder style.
    #[must_use]
    pub fn set(mut self, id: &str, value: impl Into<Value>) -> Self {
        self.insert(id, value.into());
        self
    }

    pub fn insert(&mut self, id: &str, value: Value) {
        self.data.insert(id.to_owned(), value);
    }

    /// Look up a field. `None` means the field is absent from the snapshot,
    /// which is different from a field explicitly set to `null`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.data.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.data.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The field's value as text, when it holds a string.
    #[must_use]
    pub fn text(&self, id: &str) -> Option<&str> {
        match self.data.get(id)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DataValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Resolved rule variables: variable name → value for one evaluation pass.
///
/// Produced by [`resolve`](crate::resolve). Unknown names read as
/// [`Value::Null`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableValues {
    values: HashMap<String, Value>,
}

static NULL: Value = Value::Null;

impl VariableValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Bind a variable. The empty-literal placeholder `''` is stored as `null`.
    pub fn insert(&mut self, name: &str, value: Value) {
        let value = match value {
            Value::String(s) if s == "''" => Value::Null,
            other => other,
        };
        self.values.insert(name.to_owned(), value);
    }

    /// The variable's value, or `null` when it was never bound.
    #[must_use]
    pub fn get(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&NULL)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let values = DataValues::new().set("DE1", "20");
        assert_eq!(values.get("DE1"), Some(&Value::String("20".to_owned())));
        assert_eq!(values.text("DE1"), Some("20"));
    }

    #[test]
    fn absent_and_null_are_distinct() {
        let values = DataValues::new().set("DE1", Value::Null);
        assert!(values.contains("DE1"));
        assert_eq!(values.get("DE1"), Some(&Value::Null));
        assert_eq!(values.get("DE2"), None);
    }

    #[test]
    fn dotted_ids_are_not_paths() {
        let values = DataValues::new().set("a.b", 1).set("a", 2);
        assert_eq!(values.get("a.b"), Some(&Value::Number(1.0)));
        assert_eq!(values.get("a"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn overwrite_value() {
        let values = DataValues::new().set("x", "old").set("x", "new");
        assert_eq!(values.text("x"), Some("new"));
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn from_iterator() {
        let values: DataValues = [("DE1", "a"), ("DE2", "b")].into_iter().collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values.text("DE2"), Some("b"));
    }

    #[test]
    fn deserialize_from_json_object() {
        let values: DataValues =
            serde_json::from_str(r#"{"DE1": "20", "DE2": null, "DE3": true}"#).unwrap();
        assert_eq!(values.get("DE1"), Some(&Value::String("20".into())));
        assert_eq!(values.get("DE2"), Some(&Value::Null));
        assert_eq!(values.get("DE3"), Some(&Value::Bool(true)));
    }

    #[test]
    fn unbound_variable_reads_null() {
        let vars = VariableValues::new();
        assert_eq!(vars.get("missing"), &Value::Null);
    }

    #[test]
    fn empty_literal_placeholder_becomes_null() {
        let vars = VariableValues::new().set("x", "''").set("y", "");
        assert_eq!(vars.get("x"), &Value::Null);
        assert_eq!(vars.get("y"), &Value::String(String::new()));
    }
}

//! Statement parameters.
//!
//! Parameters are sent alongside the statement text in the request envelope
//! and referenced from the query as `$name` (or `{name}` on older servers).

use serde::Serialize;
use std::collections::BTreeMap;

/// Parameter value for a statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Parameter {
    /// NULL value
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Float value
    Float(f64),
    /// String value
    String(String),
    /// List of values
    List(Vec<Parameter>),
    /// Nested map of values
    Map(BTreeMap<String, Parameter>),
}

impl From<bool> for Parameter {
    fn from(value: bool) -> Self {
        Parameter::Boolean(value)
    }
}

impl From<i32> for Parameter {
    fn from(value: i32) -> Self {
        Parameter::Integer(value as i64)
    }
}

impl From<i64> for Parameter {
    fn from(value: i64) -> Self {
        Parameter::Integer(value)
    }
}

impl From<f64> for Parameter {
    fn from(value: f64) -> Self {
        Parameter::Float(value)
    }
}

impl From<String> for Parameter {
    fn from(value: String) -> Self {
        Parameter::String(value)
    }
}

impl From<&str> for Parameter {
    fn from(value: &str) -> Self {
        Parameter::String(value.to_string())
    }
}

impl<T: Into<Parameter>> From<Vec<T>> for Parameter {
    fn from(value: Vec<T>) -> Self {
        Parameter::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Parameter>> From<Option<T>> for Parameter {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Parameter::Null)
    }
}

impl From<Parameters> for Parameter {
    fn from(value: Parameters) -> Self {
        Parameter::Map(value.entries)
    }
}

/// Named parameters for one statement, serialized as a JSON object.
///
/// # Example
///
/// ```
/// use neo4j_http::query::Parameters;
///
/// let params = Parameters::new()
///     .with("name", "Alice")
///     .with("age", 42)
///     .with("tags", vec!["a", "b"]);
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Parameters {
    entries: BTreeMap<String, Parameter>,
}

impl Parameters {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Parameter>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Parameter>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Parameter>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameter_conversions() {
        assert_eq!(Parameter::from(true), Parameter::Boolean(true));
        assert_eq!(Parameter::from(7), Parameter::Integer(7));
        assert_eq!(Parameter::from(1.5), Parameter::Float(1.5));
        assert_eq!(Parameter::from("x"), Parameter::String("x".to_string()));
        assert_eq!(Parameter::from(None::<i64>), Parameter::Null);
    }

    #[test]
    fn test_parameters_serialize_as_object() {
        let params = Parameters::new()
            .with("id", 12)
            .with("name", "Bob")
            .with("scores", vec![1.5, 2.0])
            .with("nested", Parameters::new().with("k", Option::<bool>::None));

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 12,
                "name": "Bob",
                "scores": [1.5, 2.0],
                "nested": {"k": null}
            })
        );
    }

    #[test]
    fn test_parameter_serializes_as_plain_json() {
        let value = serde_json::to_value(Parameter::from(vec![
            Parameter::Null,
            Parameter::from(false),
            Parameter::from(3),
            Parameter::from("s"),
        ]))
        .unwrap();
        assert_eq!(value, json!([null, false, 3, "s"]));
    }

    #[test]
    fn test_empty_parameters_serialize_as_empty_object() {
        let value = serde_json::to_value(Parameters::new()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_insert_replaces() {
        let mut params: Parameters = vec![("a", 1)].into_iter().collect();
        params.insert("a", 2);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("a"), Some(&Parameter::Integer(2)));
    }
}

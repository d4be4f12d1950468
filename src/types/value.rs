//! Cell values decoded from result rows.
//!
//! The wire format is plain JSON, so a cell is one of a small set of
//! JSON-shaped variants. Numbers have no separate integer form on the wire and
//! are all kept as `f64`; integer reads narrow them on access.

use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::collections::HashMap;
use std::fmt;

/// A single column value within one row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// JSON null
    Null,
    /// Boolean value
    Bool(bool),
    /// Any JSON number
    Float(f64),
    /// String value
    String(String),
    /// Ordered sequence of values
    Array(Vec<CellValue>),
    /// String-keyed map of values
    Map(HashMap<String, CellValue>),
}

impl CellValue {
    /// Name of the variant, used in type mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "bool",
            CellValue::Float(_) => "number",
            CellValue::String(_) => "string",
            CellValue::Array(_) => "array",
            CellValue::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Narrow a number to an integer, truncating toward zero.
    ///
    /// Values outside the `i64` range saturate and NaN becomes 0.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_f64().map(|f| f as i64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[CellValue]> {
        match self {
            CellValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, CellValue>> {
        match self {
            CellValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "null"),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::String(s) => write!(f, "{:?}", s),
            CellValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            CellValue::Map(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", key, map[key])?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CellVisitor)
    }
}

/// Visitor producing a `CellValue` from any JSON token in one pass.
struct CellVisitor;

impl<'de> Visitor<'de> for CellVisitor {
    type Value = CellValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(CellValue::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(CellValue::Float(v as f64))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(CellValue::Float(v as f64))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(CellValue::Float(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(CellValue::String(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(CellValue::String(v))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(CellValue::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(CellValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CellVisitor)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(CellValue::Array(items))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = HashMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, CellValue>()? {
            map.insert(key, value);
        }
        Ok(CellValue::Map(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> CellValue {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(decode("null"), CellValue::Null);
        assert_eq!(decode("true"), CellValue::Bool(true));
        assert_eq!(decode("\"hello\""), CellValue::String("hello".to_string()));
        assert_eq!(decode("1.2"), CellValue::Float(1.2));
    }

    #[test]
    fn test_integers_become_floats() {
        assert_eq!(decode("1"), CellValue::Float(1.0));
        assert_eq!(decode("-42"), CellValue::Float(-42.0));
    }

    #[test]
    fn test_nested_structures() {
        let value = decode(r#"{"k": 1, "list": [1, 2.2, {"deep": "x"}]}"#);
        let map = value.as_map().unwrap();

        assert_eq!(map["k"], CellValue::Float(1.0));
        let list = map["list"].as_array().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[1].as_f64(), Some(2.2));
        assert_eq!(list[2].as_map().unwrap()["deep"].as_str(), Some("x"));
    }

    #[test]
    fn test_as_i64_truncates() {
        assert_eq!(CellValue::Float(7.0).as_i64(), Some(7));
        assert_eq!(CellValue::Float(7.9).as_i64(), Some(7));
        assert_eq!(CellValue::Float(-7.9).as_i64(), Some(-7));
        assert_eq!(CellValue::String("7".to_string()).as_i64(), None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(CellValue::Null.kind(), "null");
        assert_eq!(CellValue::Array(vec![]).kind(), "array");
        assert_eq!(CellValue::Map(HashMap::new()).kind(), "map");
    }

    #[test]
    fn test_display_is_stable_for_maps() {
        let value = decode(r#"{"b": [true, null], "a": "x"}"#);
        assert_eq!(value.to_string(), r#"{"a": "x", "b": [true, null]}"#);
    }
}

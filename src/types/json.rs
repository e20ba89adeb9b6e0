//! Dynamic JSON values carried in extracted data and webhook metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Any JSON value.
///
/// Decoding tries the variants in declaration order (string, number,
/// boolean, array, object, null) and keeps the first that parses. Because
/// JSON tokens are self-describing this only matters for callers that build
/// values through other serde formats, but the order is kept stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonValue {
    /// A JSON string
    String(String),
    /// A JSON number, preserving integer vs. float
    Number(serde_json::Number),
    /// A JSON boolean
    Bool(bool),
    /// A JSON array
    Array(Vec<JsonValue>),
    /// A JSON object with keys kept in sorted order
    Object(BTreeMap<String, JsonValue>),
    /// JSON `null`
    #[default]
    Null,
}

impl JsonValue {
    /// Returns the string if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number as `f64` if this is a numeric value.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Returns the number as `i64` if it is an integer that fits.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the elements if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a key if this is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Returns true for JSON `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Decodes this value into a concrete type.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not match `T`'s shape.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(serde_json::Value::from(self.clone()))
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<JsonValue> for serde_json::Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => Self::Number(n),
            JsonValue::String(s) => Self::String(s),
            JsonValue::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for JsonValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> JsonValue {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn decodes_each_variant() {
        assert_eq!(decode(r#""text""#), JsonValue::String("text".to_string()));
        assert_eq!(decode("42"), JsonValue::from(42_i64));
        assert_eq!(decode("true"), JsonValue::Bool(true));
        assert_eq!(decode("null"), JsonValue::Null);
        assert!(matches!(decode("[1, \"a\"]"), JsonValue::Array(items) if items.len() == 2));
        assert!(matches!(decode(r#"{"a": 1}"#), JsonValue::Object(_)));
    }

    #[test]
    fn numeric_string_stays_a_string() {
        let value = decode(r#""123""#);

        assert_eq!(value.as_str(), Some("123"));
        assert!(value.as_f64().is_none());
    }

    #[test]
    fn integers_and_floats_are_preserved() {
        assert_eq!(decode("7").as_i64(), Some(7));
        assert_eq!(decode("1.5").as_f64(), Some(1.5));
        assert_eq!(serde_json::to_string(&decode("7")).unwrap(), "7");
    }

    #[test]
    fn nested_object_lookup() {
        let value = decode(r#"{"product": {"name": "Widget", "tags": ["a", "b"]}}"#);

        let product = value.get("product").unwrap();
        assert_eq!(product.get("name").and_then(JsonValue::as_str), Some("Widget"));
        assert_eq!(product.get("tags").and_then(JsonValue::as_array).map(<[_]>::len), Some(2));
    }

    #[test]
    fn encoding_is_stable() {
        let json = r#"{"a":[1,2.5,"x",false,null],"b":{"c":"d"}}"#;
        let once = serde_json::to_string(&decode(json)).unwrap();
        let twice = serde_json::to_string(&decode(&once)).unwrap();

        assert_eq!(once, json);
        assert_eq!(once, twice);
    }

    #[test]
    fn converts_through_serde_json_value() {
        let original = serde_json::json!({"price": 9.99, "in_stock": true});
        let value = JsonValue::from(original.clone());

        assert_eq!(serde_json::Value::from(value), original);
    }

    #[test]
    fn decode_into_concrete_type() {
        #[derive(Deserialize)]
        struct Product {
            name: String,
            price: f64,
        }

        let value = decode(r#"{"name": "Widget", "price": 9.99}"#);
        let product: Product = value.decode().unwrap();

        assert_eq!(product.name, "Widget");
        assert!((product.price - 9.99).abs() < f64::EPSILON);
    }
}

//! JSON-schema subset used to describe structured extraction output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A schema property, discriminated by its `type` field.
///
/// Objects nest further properties and arrays carry a boxed item schema,
/// so arbitrarily deep schemas can be expressed.
///
/// # Example
///
/// ```
/// use firecrawl::types::SchemaProperty;
///
/// let schema = SchemaProperty::object([
///     ("name", SchemaProperty::string()),
///     ("price", SchemaProperty::number()),
///     ("tags", SchemaProperty::array(SchemaProperty::string())),
/// ])
/// .with_required(["name"]);
///
/// let json = serde_json::to_value(&schema).unwrap();
/// assert_eq!(json["type"], "object");
/// assert_eq!(json["properties"]["tags"]["items"]["type"], "string");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaProperty {
    /// A string value, optionally restricted to an enumeration
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
        allowed: Option<Vec<String>>,
    },
    /// A numeric value
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// A boolean value
    Boolean {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// A homogeneous list
    Array {
        items: Box<SchemaProperty>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// An object with named properties
    Object {
        #[serde(default)]
        properties: BTreeMap<String, SchemaProperty>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        required: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl SchemaProperty {
    /// A plain string property.
    #[must_use]
    pub const fn string() -> Self {
        Self::String {
            description: None,
            allowed: None,
        }
    }

    /// A string property restricted to the given values.
    #[must_use]
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::String {
            description: None,
            allowed: Some(values.into_iter().map(Into::into).collect()),
        }
    }

    /// A numeric property.
    #[must_use]
    pub const fn number() -> Self {
        Self::Number { description: None }
    }

    /// A boolean property.
    #[must_use]
    pub const fn boolean() -> Self {
        Self::Boolean { description: None }
    }

    /// An array of `items`.
    #[must_use]
    pub fn array(items: Self) -> Self {
        Self::Array {
            items: Box::new(items),
            description: None,
        }
    }

    /// An object with the given properties and nothing required.
    #[must_use]
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Self)>,
        K: Into<String>,
    {
        Self::Object {
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
            required: Vec::new(),
            description: None,
        }
    }

    /// Marks object properties as required. No effect on non-objects.
    #[must_use]
    pub fn with_required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Self::Object { required, .. } = &mut self {
            required.extend(names.into_iter().map(Into::into));
        }
        self
    }

    /// Sets the description on any variant.
    #[must_use]
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        let text = Some(text.into());
        match &mut self {
            Self::String { description, .. }
            | Self::Number { description }
            | Self::Boolean { description }
            | Self::Array { description, .. }
            | Self::Object { description, .. } => *description = text,
        }
        self
    }

    /// Returns the `type` discriminant.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String { .. } => "string",
            Self::Number { .. } => "number",
            Self::Boolean { .. } => "boolean",
            Self::Array { .. } => "array",
            Self::Object { .. } => "object",
        }
    }
}

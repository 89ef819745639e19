//! Typed property values attached to node events.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Declared type of a node property (e.g. `string`, `boolean`, `DateTime`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyType(String);

impl PropertyType {
    /// Type reported for properties a node type does not declare.
    pub const FALLBACK: &'static str = "string";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn fallback() -> Self {
        Self::new(Self::FALLBACK)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PropertyType {
    fn default() -> Self {
        Self::fallback()
    }
}

impl core::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A raw property value tagged with its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub value: JsonValue,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
}

impl PropertyValue {
    pub fn new(value: JsonValue, property_type: PropertyType) -> Self {
        Self {
            value,
            property_type,
        }
    }
}

/// Property name → typed value, in declaration order.
pub type PropertyValues = IndexMap<String, PropertyValue>;

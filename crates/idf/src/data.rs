//! Entry data: the JSON map from anchor names to embedded-content descriptors.

use serde_json::{Map, Value};

/// A JSON object describing one piece of embedded content, e.g.
/// `{"type": "crafting", "recipe": "immersiveengineering:wirecutter"}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor(Value);

impl Descriptor {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The descriptor's `type` field, if any.
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Descriptor {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// What an entry's data holds for one anchor name.
#[derive(Debug, Clone, PartialEq)]
pub enum AnchorData<'a> {
    Missing,
    Single(&'a Value),
    /// An array: the anchor fans out into one node per element.
    Many(&'a [Value]),
}

/// The per-entry data document, keyed by anchor name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntryData(Map<String, Value>);

impl EntryData {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Builds entry data from any JSON value; anything but an object yields empty data.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn lookup(&self, name: &str) -> AnchorData<'_> {
        match self.0.get(name) {
            None | Some(Value::Null) => AnchorData::Missing,
            Some(Value::Array(items)) => AnchorData::Many(items),
            Some(value) => AnchorData::Single(value),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

//! Value types for document data and sections
//!
//! The key/value block and the section map both distinguish a single value
//! from an ordered list of values. That distinction is modeled with explicit
//! enum tags so every encode/decode path switches on the tag instead of
//! inspecting runtime types.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single typed value decoded from the key/value block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean value (`true`/`false`, decoded case-insensitively)
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Plain string value
    Str(String),
}

impl Scalar {
    /// Whether this scalar carries no content (an empty string)
    pub fn is_empty(&self) -> bool {
        matches!(self, Scalar::Str(s) if s.is_empty())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

/// A data value: one scalar, or an ordered list of scalars
///
/// A key with exactly one value is always `Scalar`, never a one-element list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Single value
    Scalar(Scalar),
    /// Ordered list of values, first occurrence first
    List(Vec<Scalar>),
}

impl Value {
    /// Collapse a list of scalars into a `Value`, or `None` when nothing is left
    ///
    /// Empty scalars are dropped; a single survivor becomes `Scalar`.
    pub(crate) fn from_scalars(scalars: Vec<Scalar>) -> Option<Value> {
        let mut scalars: Vec<Scalar> = scalars.into_iter().filter(|s| !s.is_empty()).collect();
        match scalars.len() {
            0 => None,
            1 => Some(Value::Scalar(scalars.remove(0))),
            _ => Some(Value::List(scalars)),
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

/// A named section value: one text block, or an ordered list of text blocks
///
/// A section name used exactly once is always `Text`; repeats accumulate into
/// `Many` in order of appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionValue {
    /// Single occurrence
    Text(String),
    /// Repeated occurrences, in order of appearance
    Many(Vec<String>),
}

/// An insertion-ordered string-keyed map
///
/// The codec preserves key order across a parse/generate round trip, so a
/// plain `HashMap` will not do. A vector of pairs is enough at document scale.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

/// Data carried in the embedded key/value block
pub type DataMap = OrderedMap<Value>;

/// Named free-text sections
pub type SectionMap = OrderedMap<SectionValue>;

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        OrderedMap {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Insert a value, keeping the original position when the key exists
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove a key, returning its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl OrderedMap<SectionValue> {
    /// Append one section occurrence, promoting a repeat to a list
    pub fn push_section(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let name = name.into();
        let content = content.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, SectionValue::Text(first))) => {
                let first = std::mem::take(first);
                self.insert(name, SectionValue::Many(vec![first, content]));
            }
            Some((_, SectionValue::Many(items))) => items.push(content),
            None => self.entries.push((name, SectionValue::Text(content))),
        }
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<V> {
    marker: std::marker::PhantomData<V>,
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string-keyed map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

//! Raw profile records as supplied by the profile source.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single field value of a raw record.
///
/// Deserializes from plain JSON values; integers are widened to `f64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Returns `true` for [`FieldValue::Null`].
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Short name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Number(_) => "number",
            FieldValue::Text(_) => "string",
            FieldValue::List(_) => "list",
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        FieldValue::Number(v as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(v: Vec<FieldValue>) -> Self {
        FieldValue::List(v)
    }
}

/// Keys checked, in order, when looking for a record identifier.
const IDENTIFIER_KEYS: [&str; 4] = ["id", "developer_id", "github_username", "login"];

/// A raw profile record: named fields of counts, strings and lists.
///
/// Serializes transparently as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl ProfileRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Look up a field. Explicit nulls are returned as `Some(&FieldValue::Null)`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Returns `true` if the field exists and is not null.
    #[inline]
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.is_null())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Profile identifier, taken from the first of `id`, `developer_id`,
    /// `github_username` or `login` that holds a string or number.
    pub fn identifier(&self) -> Option<String> {
        IDENTIFIER_KEYS.iter().find_map(|key| match self.get(key)? {
            FieldValue::Text(s) if !s.is_empty() => Some(s.clone()),
            FieldValue::Number(n) if n.fract() == 0.0 => Some(format!("{}", *n as i64)),
            FieldValue::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }
}

impl FromIterator<(String, FieldValue)> for ProfileRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}

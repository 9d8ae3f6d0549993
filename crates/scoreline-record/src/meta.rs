//! Flat key/value meta information attached to a record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{RecordError, RecordResult};

/// A single meta value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MetaValue {
    Int(i64),
    Double(f64),
    Text(String),
    Flag(bool),
}

impl MetaValue {
    /// Name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            MetaValue::Int(_) => "int",
            MetaValue::Double(_) => "double",
            MetaValue::Text(_) => "text",
            MetaValue::Flag(_) => "flag",
        }
    }
}

impl From<i64> for MetaValue {
    fn from(v: i64) -> Self {
        MetaValue::Int(v)
    }
}

impl From<f64> for MetaValue {
    fn from(v: f64) -> Self {
        MetaValue::Double(v)
    }
}

impl From<bool> for MetaValue {
    fn from(v: bool) -> Self {
        MetaValue::Flag(v)
    }
}

impl From<String> for MetaValue {
    fn from(v: String) -> Self {
        MetaValue::Text(v)
    }
}

impl From<&str> for MetaValue {
    fn from(v: &str) -> Self {
        MetaValue::Text(v.to_string())
    }
}

/// Meta information: string keys to [`MetaValue`]s, iterated in key order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaInfo {
    values: BTreeMap<String, MetaValue>,
}

impl MetaInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Set a value, returning the one it replaced.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MetaValue>,
    ) -> Option<MetaValue> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.values.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<MetaValue> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy every entry of `other` into `self`; `other` wins on collisions.
    pub fn merge(&mut self, other: &MetaInfo) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    fn require(&self, key: &str) -> RecordResult<&MetaValue> {
        self.values
            .get(key)
            .ok_or_else(|| RecordError::MissingMeta(key.to_string()))
    }

    fn mismatch(key: &str, expected: &'static str, found: &MetaValue) -> RecordError {
        RecordError::MetaTypeMismatch {
            key: key.to_string(),
            expected,
            found: found.kind(),
        }
    }

    /// A numeric value as `f64`. Integers are widened.
    pub fn get_f64(&self, key: &str) -> RecordResult<f64> {
        match self.require(key)? {
            MetaValue::Double(v) => Ok(*v),
            MetaValue::Int(v) => Ok(*v as f64),
            other => Err(Self::mismatch(key, "double", other)),
        }
    }

    pub fn get_i64(&self, key: &str) -> RecordResult<i64> {
        match self.require(key)? {
            MetaValue::Int(v) => Ok(*v),
            other => Err(Self::mismatch(key, "int", other)),
        }
    }

    pub fn get_str(&self, key: &str) -> RecordResult<&str> {
        match self.require(key)? {
            MetaValue::Text(v) => Ok(v.as_str()),
            other => Err(Self::mismatch(key, "text", other)),
        }
    }

    pub fn get_bool(&self, key: &str) -> RecordResult<bool> {
        match self.require(key)? {
            MetaValue::Flag(v) => Ok(*v),
            other => Err(Self::mismatch(key, "flag", other)),
        }
    }
}

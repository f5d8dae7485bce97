//! Partial records: a subset of an entity's columns with values.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;

use super::value::Value;
use crate::error::StoreError;
use crate::result::StoreResult;

/// Column values for entity `T`, keyed by column name.
///
/// Used both as the input to `create`/`save` and as the patch of a bulk
/// update. Keys are not checked against the entity here; stores do that.
pub struct Partial<T> {
    values: BTreeMap<String, Value>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Partial<T> {
    /// An empty partial record.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            _entity: PhantomData,
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set a column, replacing any previous value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(column.into(), value.into());
    }

    /// Remove a column.
    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.values.remove(column)
    }

    /// The value for a column, if set.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Whether a column is set. A column explicitly set to `Null` counts.
    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Number of columns set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no column is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay `other` on top of `self`; columns in `other` win.
    pub fn merge(mut self, other: Partial<T>) -> Self {
        self.values.extend(other.values);
        self
    }

    /// Keep only the columns for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.values.retain(|k, _| keep(k));
    }

    /// Build from a JSON object.
    pub fn from_json(json: serde_json::Value) -> StoreResult<Self> {
        match json {
            serde_json::Value::Object(map) => {
                let mut partial = Self::new();
                for (column, value) in map {
                    partial.insert(column, Value::from_json(value)?);
                }
                Ok(partial)
            }
            other => Err(StoreError::InvalidValue(format!(
                "expected a JSON object for partial data, got {other}"
            ))),
        }
    }

    /// JSON object form.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl<T: Serialize> Partial<T> {
    /// Capture every serialized field of a full entity.
    pub fn from_entity(entity: &T) -> StoreResult<Self> {
        let json = serde_json::to_value(entity)
            .map_err(|e| StoreError::InvalidValue(format!("entity serialization failed: {e}")))?;
        Self::from_json(json)
    }
}

impl<T> Default for Partial<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Partial<T> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> PartialEq for Partial<T> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<T> fmt::Debug for Partial<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.values.iter()).finish()
    }
}

impl<T, K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Partial<T> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut partial = Self::new();
        for (k, v) in iter {
            partial.insert(k, v);
        }
        partial
    }
}

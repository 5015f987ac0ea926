//! Observations: ordered, read-only mappings from field names to arrays.
//!
//! Environments nest some fields under blocks (e.g. `global.actions`), so a
//! value is either an [`Array`] or another [`Observation`]. Adding a field
//! never touches the original: [`Observation::with_entry`] builds a new map
//! whose untouched values share storage with the old one.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::array::Array;
use crate::error::CoreError;

/// A single observation field.
#[derive(Debug, Clone, PartialEq)]
pub enum ObsValue {
    Array(Array),
    Nested(Observation),
}

impl ObsValue {
    /// The array, if this value is one.
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            ObsValue::Array(a) => Some(a),
            ObsValue::Nested(_) => None,
        }
    }

    /// The nested block, if this value is one.
    pub fn as_nested(&self) -> Option<&Observation> {
        match self {
            ObsValue::Array(_) => None,
            ObsValue::Nested(o) => Some(o),
        }
    }
}

impl From<Array> for ObsValue {
    fn from(array: Array) -> Self {
        ObsValue::Array(array)
    }
}

impl From<Observation> for ObsValue {
    fn from(observation: Observation) -> Self {
        ObsValue::Nested(observation)
    }
}

/// An immutable mapping from keys to observation values, ordered by key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Observation {
    entries: Arc<BTreeMap<String, ObsValue>>,
}

impl Observation {
    /// Create an empty observation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert used while assembling an observation.
    ///
    /// Consumes `self`; existing clones are unaffected.
    pub fn with(self, key: impl Into<String>, value: impl Into<ObsValue>) -> Self {
        self.with_entry(key, value)
    }

    /// Return a new observation with `key` bound to `value`.
    ///
    /// An existing entry under `key` is replaced in the result only.
    pub fn with_entry(&self, key: impl Into<String>, value: impl Into<ObsValue>) -> Self {
        let mut entries = BTreeMap::clone(&self.entries);
        entries.insert(key.into(), value.into());
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Look up a top-level field.
    pub fn get(&self, key: &str) -> Option<&ObsValue> {
        self.entries.get(key)
    }

    /// Whether a top-level field exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObsValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Follow a path of keys through nested blocks.
    ///
    /// Errors name the dotted path up to the failing key.
    pub fn value_at(&self, path: &[&str]) -> Result<&ObsValue, CoreError> {
        let mut current = self;
        let mut walked = Vec::with_capacity(path.len());
        let mut found = None;
        for (depth, key) in path.iter().enumerate() {
            walked.push(*key);
            let value = current
                .get(key)
                .ok_or_else(|| CoreError::MissingObservation {
                    key: walked.join("."),
                })?;
            if depth + 1 < path.len() {
                current = value.as_nested().ok_or_else(|| CoreError::NotNested {
                    key: walked.join("."),
                })?;
            } else {
                found = Some(value);
            }
        }
        found.ok_or_else(|| CoreError::MissingObservation { key: String::new() })
    }

    /// Follow a path and require an array at its end.
    pub fn array_at(&self, path: &[&str]) -> Result<&Array, CoreError> {
        self.value_at(path)?
            .as_array()
            .ok_or_else(|| CoreError::NotAnArray {
                key: path.join("."),
            })
    }

    /// A required top-level array.
    pub fn array(&self, key: &str) -> Result<&Array, CoreError> {
        self.array_at(&[key])
    }
}

impl<K, V> FromIterator<(K, V)> for Observation
where
    K: Into<String>,
    V: Into<ObsValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(entries),
        }
    }
}

//! The open-ended field map attached to files, collections and stored records.

use super::AttrValue;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Mapping from field name to scalar value.
///
/// Keys carry no schema. The map is sorted only so that serialized records are
/// stable across writes; key order has no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, AttrValue>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` for unset fields.
    pub fn get(&self, field: &str) -> Option<&AttrValue> {
        self.0.get(field)
    }

    /// Sets a field, returning the previous value. Field names are not
    /// validated here; entity setters do that before calling in.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.0.insert(field.into(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<AttrValue> {
        self.0.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, AttrValue> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// First field whose value cannot be persisted, if any.
    pub fn first_unstorable(&self) -> Option<(&str, &AttrValue)> {
        self.0
            .iter()
            .find(|(_, v)| !v.is_storable())
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `other` into `self`; `other` wins on key collision.
    ///
    /// Returns true if anything changed.
    pub fn merge_from(&mut self, other: &Metadata) -> bool {
        let mut changed = false;
        for (key, value) in other.iter() {
            if self.0.get(key) != Some(value) {
                self.0.insert(key.clone(), value.clone());
                changed = true;
            }
        }
        changed
    }

    /// A copy of `self` with `base` filling in the keys `self` lacks.
    pub fn merged_under(&self, base: &Metadata) -> Metadata {
        let mut result = base.clone();
        result.merge_from(self);
        result
    }

    /// Fields present with equal values in both maps.
    pub fn intersection(&self, other: &Metadata) -> Metadata {
        self.0
            .iter()
            .filter(|(k, v)| other.0.get(*k) == Some(*v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// True if every field of `other` is present here with the same value.
    pub fn is_superset_of(&self, other: &Metadata) -> bool {
        other.iter().all(|(k, v)| self.0.get(k) == Some(v))
    }
}

impl FromIterator<(String, AttrValue)> for Metadata {
    fn from_iter<T: IntoIterator<Item = (String, AttrValue)>>(iter: T) -> Self {
        Metadata(iter.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<AttrValue>, const N: usize> From<[(K, V); N]> for Metadata {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Metadata {
    type Item = (&'a String, &'a AttrValue);
    type IntoIter = btree_map::Iter<'a, String, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

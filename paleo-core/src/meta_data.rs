//! This module defines [MetaData], the immutable key-value annotation
//! attached to every column and schema field,
//! and [MetaDataBuilder], which is used to assemble it.

use std::mem::size_of;

use linked_hash_map::LinkedHashMap;
use serde::{Deserialize, Serialize};

use crate::bytesized::ByteSized;

/// Immutable mapping from string keys to string values.
///
/// Iteration follows insertion order,
/// but two [MetaData] objects with the same entries are equal regardless of their order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaData {
    entries: LinkedHashMap<String, String>,
}

impl MetaData {
    /// Create a [MetaData] object without any entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Return a fresh [MetaDataBuilder].
    pub fn builder() -> MetaDataBuilder {
        MetaDataBuilder::new()
    }

    /// Return the value associated with `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Return whether there is an entry for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Return the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Iterate over all keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl PartialEq for MetaData {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(key, value)| other.entries.get(key) == Some(value))
    }
}

impl Eq for MetaData {}

impl<K, V> FromIterator<(K, V)> for MetaData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut builder = MetaDataBuilder::new();
        builder.put_all(iter);
        builder.into_meta_data()
    }
}

impl ByteSized for MetaData {
    fn size_bytes(&self) -> u64 {
        // Every linked entry additionally carries two pointers
        let entry_overhead = 2 * size_of::<usize>() as u64;

        size_of::<Self>() as u64
            + self
                .entries
                .iter()
                .map(|(key, value)| key.size_bytes() + value.size_bytes() + entry_overhead)
                .sum::<u64>()
    }
}

/// Accumulator for [MetaData].
///
/// The builder is not consumed by [MetaDataBuilder::build],
/// so it can keep collecting entries for further snapshots.
#[derive(Clone, Debug, Default)]
pub struct MetaDataBuilder {
    entries: LinkedHashMap<String, String>,
}

impl MetaDataBuilder {
    /// Create a new, empty [MetaDataBuilder].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty [MetaDataBuilder] with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: LinkedHashMap::with_capacity(capacity),
        }
    }

    /// Associate `value` with `key`.
    ///
    /// An existing entry for `key` is overwritten but keeps its position.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();

        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
        } else {
            self.entries.insert(key, value);
        }

        self
    }

    /// Merge all given entries into this builder, in iteration order.
    pub fn put_all<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.put(key, value);
        }

        self
    }

    /// Return the number of entries collected so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return whether no entries were collected so far.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take a snapshot of the entries collected so far.
    pub fn build(&self) -> MetaData {
        log::trace!("metadata snapshot with {} entries", self.entries.len());

        MetaData {
            entries: self.entries.clone(),
        }
    }

    /// Turn this builder into [MetaData] without copying.
    pub fn into_meta_data(self) -> MetaData {
        MetaData {
            entries: self.entries,
        }
    }
}

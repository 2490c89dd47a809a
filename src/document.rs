//! Ordered document type.
//!
//! This module provides [`Document`], a wrapper around [`IndexMap`] that keeps fields in
//! insertion order. The binary document model is ordered, so canonical output must emit
//! fields exactly as encountered and never sort them.
//!
//! ## Examples
//!
//! ```rust
//! use canonical_extjson::{Bson, Document};
//!
//! let mut doc = Document::new();
//! doc.insert("name", "Alice");
//! doc.insert("age", 30);
//!
//! assert_eq!(doc.len(), 2);
//! assert_eq!(doc.get("name").and_then(Bson::as_str), Some("Alice"));
//! ```

use indexmap::IndexMap;

use crate::Bson;

/// An insertion-ordered map of field names to values.
///
/// # Examples
///
/// ```rust
/// use canonical_extjson::Document;
///
/// let mut doc = Document::new();
/// doc.insert("second", 2);
/// doc.insert("first", 1);
///
/// let keys: Vec<_> = doc.keys().cloned().collect();
/// assert_eq!(keys, vec!["second", "first"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document(IndexMap<String, Bson>);

impl Document {
    /// Creates an empty `Document`.
    #[must_use]
    pub fn new() -> Self {
        Document(IndexMap::new())
    }

    /// Creates an empty `Document` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Document(IndexMap::with_capacity(capacity))
    }

    /// Inserts a field.
    ///
    /// If the document already had this field, its value is replaced in place (keeping the
    /// original position) and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use canonical_extjson::Document;
    ///
    /// let mut doc = Document::new();
    /// assert!(doc.insert("key", 42).is_none());
    /// assert!(doc.insert("key", 43).is_some());
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Bson>) -> Option<Bson> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Bson> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the field names, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Bson> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Bson> {
        self.0.values()
    }

    /// Returns an iterator over the fields, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Bson> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Bson);
    type IntoIter = indexmap::map::Iter<'a, String, Bson>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Document {
    type Item = (String, Bson);
    type IntoIter = indexmap::map::IntoIter<String, Bson>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<Bson>> FromIterator<(K, V)> for Document {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Document(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

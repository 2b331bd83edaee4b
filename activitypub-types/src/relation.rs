//! Ordered relations with a singular "first element" view.
//!
//! Every plural property in the vocabulary (`attachment`, `to`, `tag`, ...)
//! has a singular convenience form. [`Relation<T>`] implements that pairing
//! once so the rule cannot drift between fields:
//!
//! - reading the singular form yields the first element, if any
//! - writing `None` clears the whole relation
//! - writing `Some(v)` inserts `v` at index 0, keeping the existing elements after it

use crate::shape;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::Deref;

/// An ordered sequence of related values. The first element is the primary one.
///
/// On the wire a relation uses the single-or-array shape described in
/// [`shape`]. Containers should skip empty relations with
/// `skip_serializing_if = "Relation::is_empty"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relation<T>(Vec<T>);

impl<T> Default for Relation<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Relation<T> {
    /// Creates an empty relation.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a relation holding exactly one value.
    #[must_use]
    pub fn one(value: T) -> Self {
        Self(vec![value])
    }

    /// Returns the primary (first) element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.0.first()
    }

    /// Returns the primary (first) element mutably.
    pub fn first_mut(&mut self) -> Option<&mut T> {
        self.0.first_mut()
    }

    /// Writes the singular form of this relation.
    ///
    /// `None` clears the relation. `Some(value)` makes `value` the new first
    /// element; existing elements shift back by one.
    pub fn set_first(&mut self, value: Option<T>) {
        match value {
            None => self.0.clear(),
            Some(value) => self.0.insert(0, value),
        }
    }

    /// Appends a value after the existing elements.
    pub fn push(&mut self, value: T) {
        self.0.push(value);
    }

    /// Replaces all elements.
    pub fn replace(&mut self, values: impl IntoIterator<Item = T>) {
        self.0 = values.into_iter().collect();
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the relation has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Consumes the relation, returning its elements.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Deref for Relation<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> Extend<T> for Relation<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<T> From<Vec<T>> for Relation<T> {
    fn from(values: Vec<T>) -> Self {
        Self(values)
    }
}

impl<T> FromIterator<T> for Relation<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Relation<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Relation<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Serialize> Serialize for Relation<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        shape::serialize_one_or_many(&self.0, serializer)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Relation<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        shape::deserialize_one_or_many(deserializer).map(Self)
    }
}

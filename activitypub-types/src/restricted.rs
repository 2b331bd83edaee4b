//! Ordered lists whose membership is limited to a fixed set of kinds.
//!
//! The allow-set is named by a zero-sized marker type implementing
//! [`AllowSet`], so a `RestrictedList<Entity, LinkOrImage>` carries its
//! restriction in its type and can enforce it while decoding.

use crate::error::{ValidationError, ValidationResult};
use crate::shape;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// A value that knows its own runtime kind.
pub trait Kinded {
    /// The kind identifier (e.g. an enum of concrete entity kinds).
    type Kind: Copy + Eq + fmt::Debug + fmt::Display + 'static;

    /// Returns the runtime kind of this value.
    fn kind(&self) -> Self::Kind;
}

/// A fixed allow-set of kinds for a [`RestrictedList`].
pub trait AllowSet<T: Kinded> {
    /// Kinds accepted by the list.
    const ALLOWED: &'static [T::Kind];
}

/// An ordered list that only accepts elements whose [`Kinded::kind`] is in `A::ALLOWED`.
///
/// Every entry point that adds elements validates first and leaves the list
/// unchanged on failure. An empty list and a list that was never assigned
/// are the same thing; both are omitted on encode.
pub struct RestrictedList<T, A> {
    items: Vec<T>,
    allow: PhantomData<fn() -> A>,
}

impl<T: Kinded, A: AllowSet<T>> RestrictedList<T, A> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            allow: PhantomData,
        }
    }

    /// Builds a list from `items`, failing on the first disallowed element.
    pub fn try_from_iter(items: impl IntoIterator<Item = T>) -> ValidationResult<Self> {
        let mut list = Self::new();
        list.replace(items)?;
        Ok(list)
    }

    /// The kinds this list accepts.
    #[must_use]
    pub fn allowed() -> &'static [T::Kind] {
        A::ALLOWED
    }

    /// Returns true if `item` may be stored in this list.
    #[must_use]
    pub fn permits(item: &T) -> bool {
        A::ALLOWED.contains(&item.kind())
    }

    /// Appends an element.
    pub fn add(&mut self, item: T) -> ValidationResult<()> {
        Self::check(&item)?;
        self.items.push(item);
        Ok(())
    }

    /// Inserts an element at `index`. Fails if `index > len`.
    pub fn insert_at(&mut self, index: usize, item: T) -> ValidationResult<()> {
        let len = self.items.len();
        if index > len {
            return Err(ValidationError::IndexOutOfRange { index, len });
        }
        Self::check(&item)?;
        self.items.insert(index, item);
        Ok(())
    }

    /// Replaces every element. Nothing changes if any element is disallowed.
    pub fn replace(&mut self, items: impl IntoIterator<Item = T>) -> ValidationResult<()> {
        let items: Vec<T> = items.into_iter().collect();
        items.iter().try_for_each(Self::check)?;
        self.items = items;
        Ok(())
    }

    /// Returns the primary (first) element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Writes the singular form: `None` clears, `Some` inserts at index 0.
    pub fn set_first(&mut self, item: Option<T>) -> ValidationResult<()> {
        match item {
            None => {
                self.items.clear();
                Ok(())
            }
            Some(item) => self.insert_at(0, item),
        }
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn check(item: &T) -> ValidationResult<()> {
        if Self::permits(item) {
            return Ok(());
        }
        let allowed = A::ALLOWED
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Err(ValidationError::DisallowedKind {
            kind: item.kind().to_string(),
            allowed,
        })
    }
}

impl<T: Kinded, A: AllowSet<T>> Default for RestrictedList<T, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, A> Clone for RestrictedList<T, A> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            allow: PhantomData,
        }
    }
}

impl<T: PartialEq, A> PartialEq for RestrictedList<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: fmt::Debug, A> fmt::Debug for RestrictedList<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

impl<'a, T, A> IntoIterator for &'a RestrictedList<T, A> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize, A> Serialize for RestrictedList<T, A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        shape::serialize_one_or_many(&self.items, serializer)
    }
}

impl<'de, T, A> Deserialize<'de> for RestrictedList<T, A>
where
    T: Kinded + DeserializeOwned,
    A: AllowSet<T>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items: Vec<T> = shape::deserialize_one_or_many(deserializer)?;
        Self::try_from_iter(items).map_err(D::Error::custom)
    }
}

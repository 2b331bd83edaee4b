//! Language-tagged values (`nameMap`, `summaryMap`, `contentMap`).

use crate::settings::Settings;
use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered mapping from language tag to value.
///
/// Entries keep the order in which they were inserted (or read from the
/// document). The "default" projection looks up the process-wide default
/// language from [`Settings::current`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageMap<T> {
    values: IndexMap<String, T>,
}

impl<T> Default for LanguageMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LanguageMap<T> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    /// Returns the value for `language`.
    #[must_use]
    pub fn get(&self, language: &str) -> Option<&T> {
        self.values.get(language)
    }

    /// Sets the value for `language`, returning the previous one.
    pub fn insert(&mut self, language: impl Into<String>, value: T) -> Option<T> {
        self.values.insert(language.into(), value)
    }

    /// Removes the value for `language`, keeping the order of the others.
    pub fn remove(&mut self, language: &str) -> Option<T> {
        self.values.shift_remove(language)
    }

    /// Returns the value for the default language, if present.
    #[must_use]
    pub fn get_default(&self) -> Option<&T> {
        self.get(&Settings::current().default_language)
    }

    /// Writes the default-language slot. Other languages are untouched.
    pub fn set_default(&mut self, value: T) -> Option<T> {
        self.insert(Settings::current().default_language.clone(), value)
    }

    /// Copies every entry of `other` into this map, overwriting shared languages.
    pub fn merge(&mut self, other: LanguageMap<T>) {
        self.values.extend(other.values);
    }

    /// Returns true if a value exists for `language`.
    #[must_use]
    pub fn contains_language(&self, language: &str) -> bool {
        self.values.contains_key(language)
    }

    /// Iterates the language tags in order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterates the values in order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.values.values()
    }

    /// Iterates `(language, value)` pairs in order.
    pub fn iter(&self) -> Iter<'_, String, T> {
        self.values.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Returns true if the only entry is the default-language one.
    pub(crate) fn is_default_only(&self) -> bool {
        self.len() == 1 && self.get_default().is_some()
    }
}

impl<T: Default + Clone> LanguageMap<T> {
    /// The value for the default language, or `T::default()` when absent.
    #[must_use]
    pub fn default_value(&self) -> T {
        self.get_default().cloned().unwrap_or_default()
    }
}

impl<K: Into<String>, T> FromIterator<(K, T)> for LanguageMap<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a LanguageMap<T> {
    type Item = (&'a String, &'a T);
    type IntoIter = Iter<'a, String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<T: Serialize> Serialize for LanguageMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for LanguageMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IndexMap::<String, T>::deserialize(deserializer).map(|values| Self { values })
    }
}

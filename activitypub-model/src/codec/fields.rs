//! Field-by-field map codec shared by every concrete kind.
//!
//! Each kind lists the keys it owns in a [`FieldSchema`] impl and delegates
//! the rest to the schema it embeds (`Activity` → `Object` → `EntityCore`).
//! The generic visitor below drives decoding: unknown keys are skipped
//! without being buffered, so nested entity values always reach their own
//! decoder as original text.

use crate::language::LanguageMap;
use activitypub_types::{AllowSet, Kinded, Relation, RestrictedList};
use serde::de::{self, DeserializeOwned, IgnoredAny, MapAccess, Unexpected, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

pub(crate) trait FieldSchema: Sized {
    /// Shown in "invalid type" errors.
    const EXPECTING: &'static str;

    /// Consumes the value for `key` if this schema owns it.
    ///
    /// Returns `Ok(false)` without touching `map` for keys it does not know.
    fn decode_field<'de, A: MapAccess<'de>>(
        &mut self,
        key: &str,
        map: &mut A,
    ) -> Result<bool, A::Error>;

    fn encode_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error>;

    /// Builds a value from a bare string token, for kinds with a shorthand form.
    fn from_shorthand(_text: &str) -> Option<Self> {
        None
    }
}

pub(crate) fn serialize_fields<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: FieldSchema,
{
    let mut map = serializer.serialize_map(None)?;
    value.encode_fields(&mut map)?;
    map.end()
}

pub(crate) fn deserialize_fields<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FieldSchema + Default,
{
    deserializer.deserialize_any(FieldsVisitor(PhantomData))
}

struct FieldsVisitor<T>(PhantomData<T>);

impl<'de, T: FieldSchema + Default> Visitor<'de> for FieldsVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(T::EXPECTING)
    }

    fn visit_str<E: de::Error>(self, text: &str) -> Result<T, E> {
        T::from_shorthand(text).ok_or_else(|| E::invalid_type(Unexpected::Str(text), &self))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<T, A::Error> {
        let mut value = T::default();
        while let Some(key) = map.next_key::<String>()? {
            if !value.decode_field(&key, &mut map)? {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(value)
    }
}

// ── encode helpers ──────────────────────────────────────────────

pub(crate) fn put_relation<M, T>(map: &mut M, key: &'static str, value: &Relation<T>) -> Result<(), M::Error>
where
    M: SerializeMap,
    T: Serialize,
{
    if value.is_empty() {
        return Ok(());
    }
    map.serialize_entry(key, value)
}

pub(crate) fn put_restricted<M, T, A>(
    map: &mut M,
    key: &'static str,
    value: &RestrictedList<T, A>,
) -> Result<(), M::Error>
where
    M: SerializeMap,
    T: Kinded + Serialize,
    A: AllowSet<T>,
{
    if value.is_empty() {
        return Ok(());
    }
    map.serialize_entry(key, value)
}

pub(crate) fn put_optional<M, T>(map: &mut M, key: &'static str, value: &Option<T>) -> Result<(), M::Error>
where
    M: SerializeMap,
    T: Serialize,
{
    match value {
        Some(value) => map.serialize_entry(key, value),
        None => Ok(()),
    }
}

/// Writes a language map as its `*Map` field plus the single-value field.
///
/// A map holding only the default language collapses to the single-value
/// field alone.
pub(crate) fn put_language_map<M, T>(
    map: &mut M,
    map_key: &'static str,
    single_key: &'static str,
    value: &LanguageMap<T>,
) -> Result<(), M::Error>
where
    M: SerializeMap,
    T: Serialize,
{
    if value.is_empty() {
        return Ok(());
    }
    if !value.is_default_only() {
        map.serialize_entry(map_key, value)?;
    }
    put_optional(map, single_key, &value.get_default())
}

// ── decode helpers ──────────────────────────────────────────────

/// Reads a `*Map` field into `target`. `null` leaves it untouched.
pub(crate) fn take_language_map<'de, A, T>(map: &mut A, target: &mut LanguageMap<T>) -> Result<(), A::Error>
where
    A: MapAccess<'de>,
    T: DeserializeOwned,
{
    if let Some(values) = map.next_value::<Option<LanguageMap<T>>>()? {
        target.merge(values);
    }
    Ok(())
}

/// Reads a single-value language field into the default-language slot.
pub(crate) fn take_language_value<'de, A, T>(map: &mut A, target: &mut LanguageMap<T>) -> Result<(), A::Error>
where
    A: MapAccess<'de>,
    T: DeserializeOwned,
{
    if let Some(value) = map.next_value::<Option<T>>()? {
        target.set_default(value);
    }
    Ok(())
}

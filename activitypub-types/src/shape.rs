//! Single-or-array wire codec.
//!
//! Many document properties may carry either one value or an array of
//! values. Reading accepts both shapes; writing always uses the tersest one:
//!
//! | elements | wire token             |
//! |----------|------------------------|
//! | 0        | absent (field omitted) |
//! | 1        | the bare element       |
//! | 2+       | an array               |
//!
//! Decoding peeks at the raw token instead of buffering it into an
//! intermediate tree, so element decoders that need the original text
//! (polymorphic entities) still receive it.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

/// Decodes one raw JSON token into an ordered sequence.
///
/// An array token decodes element-wise; `null` is an absent field and yields
/// an empty sequence; any other token decodes as a single element through
/// `T`'s own decoder and yields a one-element sequence.
pub fn decode_one_or_many<T: DeserializeOwned>(raw: &RawValue) -> serde_json::Result<Vec<T>> {
    let text = raw.get();
    if text.trim() == "null" {
        return Ok(Vec::new());
    }
    if is_array_token(text) {
        serde_json::from_str(text)
    } else {
        serde_json::from_str(text).map(|one| vec![one])
    }
}

/// Encodes a sequence into its wire token.
///
/// Returns `None` for an empty sequence: the enclosing field is omitted
/// entirely rather than written as `[]`.
pub fn encode_one_or_many<T: Serialize>(
    items: &[T],
) -> serde_json::Result<Option<serde_json::Value>> {
    match items {
        [] => Ok(None),
        [one] => serde_json::to_value(one).map(Some),
        many => serde_json::to_value(many).map(Some),
    }
}

/// `deserialize_with` adapter for [`decode_one_or_many`].
pub fn deserialize_one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    decode_one_or_many(&raw).map_err(D::Error::custom)
}

/// `serialize_with` adapter.
///
/// An empty slice writes `[]`; pair it with a `skip_serializing_if` so empty
/// relations never reach the wire.
pub fn serialize_one_or_many<S, T>(items: &[T], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    match items {
        [one] => one.serialize(serializer),
        many => many.serialize(serializer),
    }
}

fn is_array_token(text: &str) -> bool {
    text.trim_start().starts_with('[')
}

//! Type-tag scanner.
//!
//! Walks the top level of a document on its own deserializer, leaving the
//! caller's text untouched for the full decode that follows. Values of
//! properties other than `type` are skipped whole, so a `type` key nested
//! inside a child document is never mistaken for the outer one.

use crate::error::{CodecError, CodecResult};
use serde::Deserializer as _;
use serde::de::{self, DeserializeSeed, IgnoredAny, MapAccess, SeqAccess, Visitor};
use std::fmt;
use tracing::trace;

const TYPE_KEY: &str = "type";

/// What the top level of a document declares about its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Scan {
    /// The document is a bare string: the href of a [`Link`](crate::Link).
    Shorthand,
    /// The document is an object with a `type` tag. Non-string array
    /// elements have already been dropped.
    Tags(Vec<String>),
    /// The document is an object without a `type` tag, or its input ran out
    /// before one was found.
    Untyped,
}

#[derive(Debug)]
enum State {
    Pending,
    Done(Scan),
    InvalidTag(String),
}

pub(crate) fn scan(text: &str) -> CodecResult<Scan> {
    let mut state = State::Pending;
    let mut deserializer = serde_json::Deserializer::from_str(text);

    // Once the state is settled the remaining properties are never read, so
    // serde_json's complaint about the unfinished map is expected.
    let outcome = deserializer.deserialize_any(TopLevel { state: &mut state });

    match state {
        State::Done(scan) => Ok(scan),
        State::InvalidTag(found) => Err(CodecError::InvalidTypeTag(found)),
        State::Pending if text.trim_start().starts_with('{') => Ok(Scan::Untyped),
        State::Pending => {
            let reason = match outcome {
                Err(e) => e.to_string(),
                Ok(()) => "expected a string or an object".to_string(),
            };
            Err(CodecError::MalformedDocument(reason))
        }
    }
}

struct TopLevel<'a> {
    state: &'a mut State,
}

impl<'de> Visitor<'de> for TopLevel<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or an object")
    }

    fn visit_str<E: de::Error>(self, _href: &str) -> Result<(), E> {
        *self.state = State::Done(Scan::Shorthand);
        Ok(())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
        let mut index = 0usize;
        while let Some(key) = map.next_key::<String>()? {
            if key == TYPE_KEY {
                trace!(index, "type tag found");
                *self.state = match map.next_value_seed(TagValue)? {
                    Tag::Strings(tags) => State::Done(Scan::Tags(tags)),
                    Tag::Other(found) => State::InvalidTag(found),
                };
                return Ok(());
            }
            map.next_value::<IgnoredAny>()?;
            index += 1;
        }
        *self.state = State::Done(Scan::Untyped);
        Ok(())
    }
}

enum Tag {
    Strings(Vec<String>),
    Other(String),
}

/// Reads the value of the `type` property.
struct TagValue;

impl<'de> DeserializeSeed<'de> for TagValue {
    type Value = Tag;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Tag, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for TagValue {
    type Value = Tag;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a type tag string or an array of them")
    }

    fn visit_str<E: de::Error>(self, tag: &str) -> Result<Tag, E> {
        Ok(Tag::Strings(vec![tag.to_string()]))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Tag, A::Error> {
        let mut tags = Vec::new();
        while let Some(element) = seq.next_element_seed(TagElement)? {
            tags.extend(element);
        }
        Ok(Tag::Strings(tags))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Tag, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Tag::Other("an object".to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Tag, E> {
        Ok(Tag::Other(format!("boolean `{v}`")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Tag, E> {
        Ok(Tag::Other(format!("number `{v}`")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Tag, E> {
        Ok(Tag::Other(format!("number `{v}`")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Tag, E> {
        Ok(Tag::Other(format!("number `{v}`")))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Tag, E> {
        Ok(Tag::Other("null".to_string()))
    }
}

/// One element of a `type` array. Anything but a string is skipped.
struct TagElement;

impl<'de> DeserializeSeed<'de> for TagElement {
    type Value = Option<String>;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for TagElement {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_str<E: de::Error>(self, tag: &str) -> Result<Self::Value, E> {
        Ok(Some(tag.to_string()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
}

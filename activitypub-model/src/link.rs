use crate::codec::fields::{self, FieldSchema};
use crate::entity::{EntityCore, EntityKind, EntityType};
use crate::error::FetchError;
use crate::macros::relation_accessors;
use crate::object::Object;
use crate::resolve::ObjectFetcher;
use activitypub_types::{Relation, ValidationError, ValidationResult};
use once_cell::sync::OnceCell;
use serde::de::{Error as _, MapAccess};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Deref, DerefMut};
use tracing::debug;

/// A qualified reference to another resource.
///
/// A link is context-free on construction. A link whose only meaningful
/// field is `href` encodes as the bare href string, and a bare string
/// decodes as a link.
///
/// The target fetched through [`Link::resolve`] is cached on the instance.
/// The cache is not part of the wire shape, is ignored by `==`, and is not
/// carried over by `clone`.
#[derive(Debug)]
pub struct Link {
    core: EntityCore,
    /// Wire: `href`.
    pub href: String,
    /// Wire: `rel`.
    pub rels: Relation<String>,
    /// Wire: `hreflang`.
    pub href_lang: Option<String>,
    height: Option<f64>,
    width: Option<f64>,
    target: OnceCell<Object>,
}

impl Default for Link {
    fn default() -> Self {
        Self {
            core: EntityCore::new(EntityKind::Link),
            href: String::new(),
            rels: Relation::new(),
            href_lang: None,
            height: None,
            width: None,
            target: OnceCell::new(),
        }
    }
}

impl Link {
    pub const DEFAULT_TYPES: &'static [&'static str] = &["Link"];

    /// A context-free link to `href`.
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            ..Self::default()
        }
    }

    relation_accessors! {
        rels => rel / set_rel: String;
    }

    #[must_use]
    pub fn height(&self) -> Option<f64> {
        self.height
    }

    /// Fails on a negative or non-finite value, leaving the height unchanged.
    pub fn set_height(&mut self, height: Option<f64>) -> ValidationResult<()> {
        self.height = check_dimension("height", height)?;
        Ok(())
    }

    #[must_use]
    pub fn width(&self) -> Option<f64> {
        self.width
    }

    /// Fails on a negative or non-finite value, leaving the width unchanged.
    pub fn set_width(&mut self, width: Option<f64>) -> ValidationResult<()> {
        self.width = check_dimension("width", width)?;
        Ok(())
    }

    /// Returns the linked object, fetching it on first use.
    ///
    /// Concurrent callers on the same link wait for a single fetch. A failed
    /// fetch is returned as-is and leaves the cache empty.
    pub fn resolve(&self, fetcher: &dyn ObjectFetcher) -> Result<&Object, FetchError> {
        self.target.get_or_try_init(|| {
            debug!(href = %self.href, "fetching link target");
            fetcher.fetch_object(&self.href)
        })
    }

    /// The cached target, if [`Link::resolve`] has succeeded.
    #[must_use]
    pub fn cached_target(&self) -> Option<&Object> {
        self.target.get()
    }

    /// Returns true if this link encodes as its bare href string.
    #[must_use]
    pub fn is_shorthand(&self) -> bool {
        let core = &self.core;
        core.has_default_types(EntityKind::Link)
            && core.has_default_media_type()
            && core.id.is_none()
            && core.contexts.is_empty()
            && core.names.is_empty()
            && core.previews.is_empty()
            && self.rels.is_empty()
            && self.href_lang.is_none()
            && self.height.is_none()
            && self.width.is_none()
    }
}

fn check_dimension(field: &'static str, value: Option<f64>) -> ValidationResult<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() => Err(ValidationError::NotFinite { field }),
        Some(v) if v < 0.0 => Err(ValidationError::Negative { field, value: v }),
        other => Ok(other),
    }
}

impl Clone for Link {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
            href: self.href.clone(),
            rels: self.rels.clone(),
            href_lang: self.href_lang.clone(),
            height: self.height,
            width: self.width,
            target: OnceCell::new(),
        }
    }
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core
            && self.href == other.href
            && self.rels == other.rels
            && self.href_lang == other.href_lang
            && self.height == other.height
            && self.width == other.width
    }
}

impl Deref for Link {
    type Target = EntityCore;

    fn deref(&self) -> &EntityCore {
        &self.core
    }
}

impl DerefMut for Link {
    fn deref_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }
}

impl EntityType for Link {
    const KIND: EntityKind = EntityKind::Link;

    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }
}

impl FieldSchema for Link {
    const EXPECTING: &'static str = "a Link document or an href string";

    fn decode_field<'de, A: MapAccess<'de>>(
        &mut self,
        key: &str,
        map: &mut A,
    ) -> Result<bool, A::Error> {
        match key {
            "href" => self.href = map.next_value::<Option<String>>()?.unwrap_or_default(),
            "rel" => self.rels = map.next_value()?,
            "hreflang" => self.href_lang = map.next_value()?,
            "height" => {
                let height = map.next_value()?;
                self.set_height(height).map_err(A::Error::custom)?;
            }
            "width" => {
                let width = map.next_value()?;
                self.set_width(width).map_err(A::Error::custom)?;
            }
            _ => return self.core.decode_field(key, map),
        }
        Ok(true)
    }

    fn encode_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        self.core.encode_fields(map)?;
        map.serialize_entry("href", &self.href)?;
        fields::put_relation(map, "rel", &self.rels)?;
        fields::put_optional(map, "hreflang", &self.href_lang)?;
        fields::put_optional(map, "height", &self.height)?;
        fields::put_optional(map, "width", &self.width)
    }

    fn from_shorthand(href: &str) -> Option<Self> {
        Some(Self::new(href))
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_shorthand() {
            return serializer.serialize_str(&self.href);
        }
        fields::serialize_fields(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        fields::deserialize_fields(deserializer)
    }
}

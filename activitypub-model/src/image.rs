use crate::codec::fields::{self, FieldSchema};
use crate::entity::{EntityCore, EntityKind, EntityType};
use crate::link::Link;
use crate::object::Object;
use serde::de::MapAccess;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Deref, DerefMut};

/// An image document. Same fields as [`Object`], tagged `Image`.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    object: Object,
}

impl Image {
    pub const DEFAULT_TYPES: &'static [&'static str] = &["Image"];

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An image whose primary `url` is `href`.
    #[must_use]
    pub fn with_url(href: impl Into<String>) -> Self {
        let mut image = Self::default();
        image.set_url(Some(Link::new(href)));
        image
    }

    #[must_use]
    pub fn as_object(&self) -> &Object {
        &self.object
    }

    pub fn as_object_mut(&mut self) -> &mut Object {
        &mut self.object
    }
}

impl Default for Image {
    fn default() -> Self {
        Self {
            object: Object::of_kind(EntityKind::Image),
        }
    }
}

impl Deref for Image {
    type Target = Object;

    fn deref(&self) -> &Object {
        &self.object
    }
}

impl DerefMut for Image {
    fn deref_mut(&mut self) -> &mut Object {
        &mut self.object
    }
}

impl EntityType for Image {
    const KIND: EntityKind = EntityKind::Image;

    fn core(&self) -> &EntityCore {
        self.object.core()
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        self.object.core_mut()
    }
}

impl FieldSchema for Image {
    const EXPECTING: &'static str = "an Image document";

    fn decode_field<'de, A: MapAccess<'de>>(
        &mut self,
        key: &str,
        map: &mut A,
    ) -> Result<bool, A::Error> {
        self.object.decode_field(key, map)
    }

    fn encode_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        self.object.encode_fields(map)
    }
}

impl Serialize for Image {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        fields::serialize_fields(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Image {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        fields::deserialize_fields(deserializer)
    }
}

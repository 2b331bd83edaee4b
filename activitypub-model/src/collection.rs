use crate::codec::fields::{self, FieldSchema};
use crate::entity::{Entity, EntityCore, EntityKind, EntityType};
use crate::macros::relation_accessors;
use crate::object::Object;
use activitypub_types::Relation;
use serde::de::MapAccess;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Deref, DerefMut};

/// An ordered set of entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    object: Object,
    /// Wire: `items`.
    pub items: Relation<Entity>,
    /// Wire: `totalItems`. Not kept in sync with `items`.
    pub total_items: Option<u64>,
}

impl Collection {
    pub const DEFAULT_TYPES: &'static [&'static str] = &["Collection"];

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection holding `items`, in order.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = Entity>) -> Self {
        Self {
            items: items.into_iter().collect(),
            ..Self::default()
        }
    }

    relation_accessors! {
        items => item / set_item: Entity;
    }

    #[must_use]
    pub fn as_object(&self) -> &Object {
        &self.object
    }

    pub fn as_object_mut(&mut self) -> &mut Object {
        &mut self.object
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            object: Object::of_kind(EntityKind::Collection),
            items: Relation::new(),
            total_items: None,
        }
    }
}

impl Deref for Collection {
    type Target = Object;

    fn deref(&self) -> &Object {
        &self.object
    }
}

impl DerefMut for Collection {
    fn deref_mut(&mut self) -> &mut Object {
        &mut self.object
    }
}

impl EntityType for Collection {
    const KIND: EntityKind = EntityKind::Collection;

    fn core(&self) -> &EntityCore {
        self.object.core()
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        self.object.core_mut()
    }
}

impl FieldSchema for Collection {
    const EXPECTING: &'static str = "a Collection document";

    fn decode_field<'de, A: MapAccess<'de>>(
        &mut self,
        key: &str,
        map: &mut A,
    ) -> Result<bool, A::Error> {
        match key {
            "items" => self.items = map.next_value()?,
            "totalItems" => self.total_items = map.next_value()?,
            _ => return self.object.decode_field(key, map),
        }
        Ok(true)
    }

    fn encode_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        self.object.encode_fields(map)?;
        fields::put_optional(map, "totalItems", &self.total_items)?;
        fields::put_relation(map, "items", &self.items)
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        fields::serialize_fields(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        fields::deserialize_fields(deserializer)
    }
}

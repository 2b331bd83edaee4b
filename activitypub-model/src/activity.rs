use crate::codec::fields::{self, FieldSchema};
use crate::entity::{Entity, EntityCore, EntityKind, EntityType};
use crate::macros::relation_accessors;
use crate::object::Object;
use activitypub_types::Relation;
use serde::de::MapAccess;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Deref, DerefMut};

/// An action that may happen, is happening, or has happened.
///
/// Construct with [`ActivityBuilder`] to get the actor attribution rule:
/// every actor is also appended to `attributed_to`, once, at build time.
/// Later writes to `actors` do not touch `attributed_to`, and decoding
/// keeps both exactly as written.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    object: Object,
    /// Wire: `actor`.
    pub actors: Relation<Entity>,
}

impl Activity {
    pub const DEFAULT_TYPES: &'static [&'static str] = &["Activity"];

    /// An activity whose only type tag is `type_tag` (e.g. `"Create"`).
    #[must_use]
    pub fn new(type_tag: impl Into<String>) -> Self {
        let mut activity = Self::default();
        activity.types = Relation::one(type_tag.into());
        activity
    }

    #[must_use]
    pub fn builder() -> ActivityBuilder {
        ActivityBuilder::default()
    }

    relation_accessors! {
        actors => actor / set_actor: Entity;
    }

    #[must_use]
    pub fn as_object(&self) -> &Object {
        &self.object
    }

    pub fn as_object_mut(&mut self) -> &mut Object {
        &mut self.object
    }

    #[must_use]
    pub fn into_object(self) -> Object {
        self.object
    }
}

impl Default for Activity {
    fn default() -> Self {
        Self {
            object: Object::of_kind(EntityKind::Activity),
            actors: Relation::new(),
        }
    }
}

impl Deref for Activity {
    type Target = Object;

    fn deref(&self) -> &Object {
        &self.object
    }
}

impl DerefMut for Activity {
    fn deref_mut(&mut self) -> &mut Object {
        &mut self.object
    }
}

impl EntityType for Activity {
    const KIND: EntityKind = EntityKind::Activity;

    fn core(&self) -> &EntityCore {
        self.object.core()
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        self.object.core_mut()
    }
}

impl FieldSchema for Activity {
    const EXPECTING: &'static str = "an Activity document";

    fn decode_field<'de, A: MapAccess<'de>>(
        &mut self,
        key: &str,
        map: &mut A,
    ) -> Result<bool, A::Error> {
        match key {
            "actor" => {
                self.actors = map.next_value()?;
                Ok(true)
            }
            _ => self.object.decode_field(key, map),
        }
    }

    fn encode_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        self.object.encode_fields(map)?;
        fields::put_relation(map, "actor", &self.actors)
    }
}

impl Serialize for Activity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        fields::serialize_fields(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Activity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        fields::deserialize_fields(deserializer)
    }
}

/// Builds an [`Activity`], deriving `attributed_to` from the actors.
///
/// The result's `attributed_to` is the explicitly supplied attribution
/// followed by every actor, whichever order the setters were called in.
#[derive(Debug, Clone, Default)]
pub struct ActivityBuilder {
    types: Vec<String>,
    id: Option<String>,
    actors: Vec<Entity>,
    attributed_to: Vec<Entity>,
    object: Option<Object>,
}

impl ActivityBuilder {
    /// Adds a type tag. Without any, the activity keeps `["Activity"]`.
    #[must_use]
    pub fn type_tag(mut self, tag: impl Into<String>) -> Self {
        self.types.push(tag.into());
        self
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn actor(mut self, actor: impl Into<Entity>) -> Self {
        self.actors.push(actor.into());
        self
    }

    #[must_use]
    pub fn actors(mut self, actors: impl IntoIterator<Item = Entity>) -> Self {
        self.actors.extend(actors);
        self
    }

    #[must_use]
    pub fn attributed_to(mut self, attributed_to: impl IntoIterator<Item = Entity>) -> Self {
        self.attributed_to.extend(attributed_to);
        self
    }

    /// Starts from the fields of `object` instead of an empty one. Its
    /// type tags are replaced by the activity's.
    #[must_use]
    pub fn object_fields(mut self, object: Object) -> Self {
        self.object = Some(object);
        self
    }

    #[must_use]
    pub fn build(self) -> Activity {
        let mut activity = Activity::default();
        if let Some(mut object) = self.object {
            object.types = activity.types.clone();
            activity.object = object;
        }
        if !self.types.is_empty() {
            activity.types = Relation::from(self.types);
        }
        if self.id.is_some() {
            activity.id = self.id;
        }

        activity.attributed_to.extend(self.attributed_to);
        activity.attributed_to.extend(self.actors.iter().cloned());
        activity.actors.extend(self.actors);
        activity
    }
}

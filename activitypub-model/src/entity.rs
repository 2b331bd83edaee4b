use crate::activity::Activity;
use crate::codec::{self, fields};
use crate::codec::fields::FieldSchema;
use crate::collection::Collection;
use crate::image::Image;
use crate::language::LanguageMap;
use crate::link::Link;
use crate::object::Object;
use crate::settings::Settings;
use activitypub_types::{Kinded, Relation};
use serde::de::{DeserializeOwned, Error as _, MapAccess};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::fmt;

/// Media type assumed when a document does not declare one.
pub const DEFAULT_MEDIA_TYPE: &str = "text/html";

/// The concrete kinds an [`Entity`] can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Object,
    Link,
    Activity,
    Collection,
    Image,
}

impl EntityKind {
    /// Every kind, general to specific.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Object,
        EntityKind::Link,
        EntityKind::Collection,
        EntityKind::Image,
        EntityKind::Activity,
    ];

    /// Returns the kind's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EntityKind::Object => "Object",
            EntityKind::Link => "Link",
            EntityKind::Activity => "Activity",
            EntityKind::Collection => "Collection",
            EntityKind::Image => "Image",
        }
    }

    /// The fixed `type` tags a new instance of this kind starts with.
    #[must_use]
    pub const fn default_types(self) -> &'static [&'static str] {
        match self {
            EntityKind::Object => Object::DEFAULT_TYPES,
            EntityKind::Link => Link::DEFAULT_TYPES,
            EntityKind::Activity => Activity::DEFAULT_TYPES,
            EntityKind::Collection => Collection::DEFAULT_TYPES,
            EntityKind::Image => Image::DEFAULT_TYPES,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Implemented by every concrete entity kind.
///
/// The `Default` impl is the kind's zero-argument constructor: it seeds
/// `types` with the kind's default tags, which is how the
/// [`TypeRegistry`](crate::TypeRegistry) learns them.
pub trait EntityType:
    Default
    + Clone
    + Serialize
    + DeserializeOwned
    + Into<Entity>
    + TryFrom<Entity, Error = Entity>
    + Send
    + Sync
    + 'static
{
    /// The runtime kind of this type.
    const KIND: EntityKind;

    /// Fields shared by every entity.
    fn core(&self) -> &EntityCore;

    fn core_mut(&mut self) -> &mut EntityCore;
}

/// Fields every entity carries: identity, context, type tags, media type,
/// names and previews.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCore {
    /// Globally unique identifier, by convention. Never validated.
    pub id: Option<String>,
    /// Contexts; the first is the primary one. Wire: `@context`.
    pub contexts: Relation<Entity>,
    /// Type tags; the first is the primary one. Wire: `type`.
    pub types: Relation<String>,
    /// Wire: `mediaType`. Omitted on encode when equal to [`DEFAULT_MEDIA_TYPE`].
    pub media_type: String,
    /// Wire: `nameMap` / `name`.
    pub names: LanguageMap<String>,
    /// Wire: `preview`.
    pub previews: Relation<Entity>,
}

impl EntityCore {
    /// Fields for a fresh instance of `kind`.
    ///
    /// Object-family kinds start with the configured default context; links
    /// are context-free.
    pub(crate) fn new(kind: EntityKind) -> Self {
        let contexts = match kind {
            EntityKind::Link => Relation::new(),
            _ => Settings::current()
                .default_context
                .clone()
                .map(Relation::one)
                .unwrap_or_default(),
        };

        Self {
            id: None,
            contexts,
            types: kind.default_types().iter().map(|t| t.to_string()).collect(),
            media_type: DEFAULT_MEDIA_TYPE.to_string(),
            names: LanguageMap::new(),
            previews: Relation::new(),
        }
    }

    /// The primary context.
    #[must_use]
    pub fn context(&self) -> Option<&Entity> {
        self.contexts.first()
    }

    pub fn set_context(&mut self, context: Option<Entity>) {
        self.contexts.set_first(context);
    }

    /// Appends contexts after the primary one.
    pub fn add_contexts(&mut self, contexts: impl IntoIterator<Item = Entity>) {
        self.contexts.extend(contexts);
    }

    /// The primary type tag.
    #[must_use]
    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }

    pub fn set_type(&mut self, tag: Option<String>) {
        self.types.set_first(tag);
    }

    /// Appends type tags after the primary one.
    pub fn add_types<S: Into<String>>(&mut self, tags: impl IntoIterator<Item = S>) {
        self.types.extend(tags.into_iter().map(Into::into));
    }

    /// The name in the default language.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.names.get_default().map(String::as_str)
    }

    /// `None` drops every name; `Some` writes the default-language slot only.
    pub fn set_name(&mut self, name: Option<String>) {
        match name {
            None => self.names.clear(),
            Some(name) => {
                self.names.set_default(name);
            }
        }
    }

    #[must_use]
    pub fn preview(&self) -> Option<&Entity> {
        self.previews.first()
    }

    pub fn set_preview(&mut self, preview: Option<Entity>) {
        self.previews.set_first(preview);
    }

    /// Returns true if `media_type` is the default.
    #[must_use]
    pub fn has_default_media_type(&self) -> bool {
        self.media_type == DEFAULT_MEDIA_TYPE
    }

    /// Returns true if `types` is exactly `kind`'s default tag set.
    #[must_use]
    pub fn has_default_types(&self, kind: EntityKind) -> bool {
        self.types.iter().map(String::as_str).eq(kind.default_types().iter().copied())
    }
}

impl FieldSchema for EntityCore {
    const EXPECTING: &'static str = "an entity document";

    fn decode_field<'de, A: MapAccess<'de>>(
        &mut self,
        key: &str,
        map: &mut A,
    ) -> Result<bool, A::Error> {
        match key {
            "@context" => self.contexts = map.next_value()?,
            "type" => {
                // Same rule as dispatch: non-string tags are dropped.
                let tags: Relation<serde_json::Value> = map.next_value()?;
                self.types = tags
                    .into_iter()
                    .filter_map(|tag| match tag {
                        serde_json::Value::String(tag) => Some(tag),
                        _ => None,
                    })
                    .collect();
            }
            "id" => self.id = map.next_value()?,
            "mediaType" => {
                if let Some(media_type) = map.next_value::<Option<String>>()? {
                    self.media_type = media_type;
                }
            }
            "nameMap" => fields::take_language_map(map, &mut self.names)?,
            "name" => fields::take_language_value(map, &mut self.names)?,
            "preview" => self.previews = map.next_value()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn encode_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        fields::put_relation(map, "@context", &self.contexts)?;
        fields::put_relation(map, "type", &self.types)?;
        fields::put_optional(map, "id", &self.id)?;
        if !self.has_default_media_type() {
            map.serialize_entry("mediaType", &self.media_type)?;
        }
        fields::put_language_map(map, "nameMap", "name", &self.names)?;
        fields::put_relation(map, "preview", &self.previews)
    }
}

/// Any node in the document graph.
///
/// Decoding dispatches on the document's `type` tag (see [`codec`]);
/// encoding always uses the runtime variant's full field set.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Object(Box<Object>),
    Link(Box<Link>),
    Activity(Box<Activity>),
    Collection(Box<Collection>),
    Image(Box<Image>),
}

impl Entity {
    /// A context-free [`Link`] to `href`.
    #[must_use]
    pub fn link(href: impl Into<String>) -> Self {
        Link::new(href).into()
    }

    /// Returns the runtime kind.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Object(_) => EntityKind::Object,
            Entity::Link(_) => EntityKind::Link,
            Entity::Activity(_) => EntityKind::Activity,
            Entity::Collection(_) => EntityKind::Collection,
            Entity::Image(_) => EntityKind::Image,
        }
    }

    /// The fixed tags this entity's kind is constructed with.
    #[must_use]
    pub fn default_types(&self) -> &'static [&'static str] {
        self.kind().default_types()
    }

    #[must_use]
    pub fn core(&self) -> &EntityCore {
        match self {
            Entity::Object(e) => e.core(),
            Entity::Link(e) => e.core(),
            Entity::Activity(e) => e.core(),
            Entity::Collection(e) => e.core(),
            Entity::Image(e) => e.core(),
        }
    }

    pub fn core_mut(&mut self) -> &mut EntityCore {
        match self {
            Entity::Object(e) => e.core_mut(),
            Entity::Link(e) => e.core_mut(),
            Entity::Activity(e) => e.core_mut(),
            Entity::Collection(e) => e.core_mut(),
            Entity::Image(e) => e.core_mut(),
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.core().id.as_deref()
    }

    #[must_use]
    pub fn types(&self) -> &[String] {
        &self.core().types
    }

    /// The Object fields of an Object-family entity.
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Entity::Object(e) => Some(&**e),
            Entity::Activity(e) => Some(e.as_object()),
            Entity::Collection(e) => Some(e.as_object()),
            Entity::Image(e) => Some(e.as_object()),
            Entity::Link(_) => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Entity::Object(e) => Some(&mut **e),
            Entity::Activity(e) => Some(e.as_object_mut()),
            Entity::Collection(e) => Some(e.as_object_mut()),
            Entity::Image(e) => Some(e.as_object_mut()),
            Entity::Link(_) => None,
        }
    }

    #[must_use]
    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Entity::Link(link) => Some(&**link),
            _ => None,
        }
    }
}

impl Kinded for Entity {
    type Kind = EntityKind;

    fn kind(&self) -> EntityKind {
        Entity::kind(self)
    }
}

macro_rules! entity_variants {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Entity {
                fn from(value: $variant) -> Self {
                    Entity::$variant(Box::new(value))
                }
            }

            impl TryFrom<Entity> for $variant {
                type Error = Entity;

                fn try_from(entity: Entity) -> Result<Self, Entity> {
                    match entity {
                        Entity::$variant(value) => Ok(*value),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

entity_variants!(Object, Link, Activity, Collection, Image);

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Entity::Object(e) => e.serialize(serializer),
            Entity::Link(e) => e.serialize(serializer),
            Entity::Activity(e) => e.serialize(serializer),
            Entity::Collection(e) => e.serialize(serializer),
            Entity::Image(e) => e.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Entity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        codec::decode_document(raw.get()).map_err(D::Error::custom)
    }
}

use crate::codec::fields::{self, FieldSchema};
use crate::collection::Collection;
use crate::duration;
use crate::entity::{Entity, EntityCore, EntityKind, EntityType};
use crate::language::LanguageMap;
use crate::link::Link;
use crate::macros::relation_accessors;
use activitypub_types::{AllowSet, Relation, RestrictedList, ValidationResult};
use chrono::{DateTime, TimeDelta, Utc};
use serde::de::{Error as _, MapAccess};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Deref, DerefMut};

/// Allow-set for `icon` and `image`: a [`Link`] or an [`Image`](crate::Image).
#[derive(Debug, Clone, Copy)]
pub struct LinkOrImage;

impl AllowSet<Entity> for LinkOrImage {
    const ALLOWED: &'static [EntityKind] = &[EntityKind::Link, EntityKind::Image];
}

/// Describes an object of any kind; the base of every kind except [`Link`].
///
/// Every plural relation is a public [`Relation`] field with a singular
/// accessor pair reading and writing its first element.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    core: EntityCore,
    pub attachments: Relation<Entity>,
    pub attributed_to: Relation<Entity>,
    pub audiences: Relation<Entity>,
    pub to: Relation<Entity>,
    pub bto: Relation<Entity>,
    pub cc: Relation<Entity>,
    pub bcc: Relation<Entity>,
    pub generators: Relation<Entity>,
    pub in_reply_to: Relation<Entity>,
    pub icons: RestrictedList<Entity, LinkOrImage>,
    pub images: RestrictedList<Entity, LinkOrImage>,
    pub summaries: LanguageMap<String>,
    pub contents: LanguageMap<Entity>,
    pub urls: Relation<Link>,
    pub replies: Option<Box<Collection>>,
    pub published: Option<DateTime<Utc>>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub duration: Option<TimeDelta>,
    pub locations: Relation<Entity>,
    pub tags: Relation<Entity>,
}

impl Object {
    pub const DEFAULT_TYPES: &'static [&'static str] = &["Object"];

    /// A new Object carrying the configured default context.
    #[must_use]
    pub fn new() -> Self {
        Self::of_kind(EntityKind::Object)
    }

    /// Object fields for an Object-family kind.
    pub(crate) fn of_kind(kind: EntityKind) -> Self {
        Self {
            core: EntityCore::new(kind),
            attachments: Relation::new(),
            attributed_to: Relation::new(),
            audiences: Relation::new(),
            to: Relation::new(),
            bto: Relation::new(),
            cc: Relation::new(),
            bcc: Relation::new(),
            generators: Relation::new(),
            in_reply_to: Relation::new(),
            icons: RestrictedList::new(),
            images: RestrictedList::new(),
            summaries: LanguageMap::new(),
            contents: LanguageMap::new(),
            urls: Relation::new(),
            replies: None,
            published: None,
            start_time: None,
            end_time: None,
            updated: None,
            duration: None,
            locations: Relation::new(),
            tags: Relation::new(),
        }
    }

    relation_accessors! {
        attachments => attachment / set_attachment: Entity;
        attributed_to => attribution / set_attribution: Entity;
        audiences => audience / set_audience: Entity;
        to => primary_to / set_primary_to: Entity;
        bto => primary_bto / set_primary_bto: Entity;
        cc => primary_cc / set_primary_cc: Entity;
        bcc => primary_bcc / set_primary_bcc: Entity;
        generators => generator / set_generator: Entity;
        in_reply_to => primary_in_reply_to / set_primary_in_reply_to: Entity;
        urls => url / set_url: Link;
        locations => location / set_location: Entity;
        tags => tag / set_tag: Entity;
    }

    #[must_use]
    pub fn icon(&self) -> Option<&Entity> {
        self.icons.first()
    }

    /// Fails, leaving `icons` unchanged, unless `icon` is a Link or an Image.
    pub fn set_icon(&mut self, icon: Option<Entity>) -> ValidationResult<()> {
        self.icons.set_first(icon)
    }

    #[must_use]
    pub fn image(&self) -> Option<&Entity> {
        self.images.first()
    }

    /// Fails, leaving `images` unchanged, unless `image` is a Link or an Image.
    pub fn set_image(&mut self, image: Option<Entity>) -> ValidationResult<()> {
        self.images.set_first(image)
    }

    /// The summary in the default language.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summaries.get_default().map(String::as_str)
    }

    /// `None` drops every summary; `Some` writes the default-language slot.
    pub fn set_summary(&mut self, summary: Option<String>) {
        match summary {
            None => self.summaries.clear(),
            Some(summary) => {
                self.summaries.set_default(summary);
            }
        }
    }

    /// The content in the default language.
    #[must_use]
    pub fn content(&self) -> Option<&Entity> {
        self.contents.get_default()
    }

    /// `None` drops every content entry; `Some` writes the default-language slot.
    pub fn set_content(&mut self, content: Option<Entity>) {
        match content {
            None => self.contents.clear(),
            Some(content) => {
                self.contents.set_default(content);
            }
        }
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Object {
    type Target = EntityCore;

    fn deref(&self) -> &EntityCore {
        &self.core
    }
}

impl DerefMut for Object {
    fn deref_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }
}

impl EntityType for Object {
    const KIND: EntityKind = EntityKind::Object;

    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }
}

impl FieldSchema for Object {
    const EXPECTING: &'static str = "an Object document";

    fn decode_field<'de, A: MapAccess<'de>>(
        &mut self,
        key: &str,
        map: &mut A,
    ) -> Result<bool, A::Error> {
        match key {
            "attachment" => self.attachments = map.next_value()?,
            "attributedTo" => self.attributed_to = map.next_value()?,
            "audience" => self.audiences = map.next_value()?,
            "to" => self.to = map.next_value()?,
            "bto" => self.bto = map.next_value()?,
            "cc" => self.cc = map.next_value()?,
            "bcc" => self.bcc = map.next_value()?,
            "generator" => self.generators = map.next_value()?,
            "inReplyTo" => self.in_reply_to = map.next_value()?,
            "icon" => self.icons = map.next_value()?,
            "image" => self.images = map.next_value()?,
            "summaryMap" => fields::take_language_map(map, &mut self.summaries)?,
            "summary" => fields::take_language_value(map, &mut self.summaries)?,
            "contentMap" => fields::take_language_map(map, &mut self.contents)?,
            "content" => fields::take_language_value(map, &mut self.contents)?,
            "url" => self.urls = map.next_value()?,
            "replies" => self.replies = map.next_value()?,
            "published" => self.published = map.next_value()?,
            "startTime" => self.start_time = map.next_value()?,
            "endTime" => self.end_time = map.next_value()?,
            "updated" => self.updated = map.next_value()?,
            "duration" => {
                self.duration = map
                    .next_value::<Option<String>>()?
                    .map(|text| duration::parse(&text))
                    .transpose()
                    .map_err(A::Error::custom)?;
            }
            "location" => self.locations = map.next_value()?,
            "tag" => self.tags = map.next_value()?,
            _ => return self.core.decode_field(key, map),
        }
        Ok(true)
    }

    fn encode_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        self.core.encode_fields(map)?;
        fields::put_relation(map, "attachment", &self.attachments)?;
        fields::put_relation(map, "attributedTo", &self.attributed_to)?;
        fields::put_relation(map, "audience", &self.audiences)?;
        fields::put_relation(map, "to", &self.to)?;
        fields::put_relation(map, "bto", &self.bto)?;
        fields::put_relation(map, "cc", &self.cc)?;
        fields::put_relation(map, "bcc", &self.bcc)?;
        fields::put_relation(map, "generator", &self.generators)?;
        fields::put_relation(map, "inReplyTo", &self.in_reply_to)?;
        fields::put_restricted(map, "icon", &self.icons)?;
        fields::put_restricted(map, "image", &self.images)?;
        fields::put_language_map(map, "summaryMap", "summary", &self.summaries)?;
        fields::put_language_map(map, "contentMap", "content", &self.contents)?;
        fields::put_relation(map, "url", &self.urls)?;
        fields::put_optional(map, "replies", &self.replies)?;
        fields::put_optional(map, "published", &self.published)?;
        fields::put_optional(map, "startTime", &self.start_time)?;
        fields::put_optional(map, "endTime", &self.end_time)?;
        fields::put_optional(map, "updated", &self.updated)?;
        fields::put_optional(map, "duration", &self.duration.map(duration::format))?;
        fields::put_relation(map, "location", &self.locations)?;
        fields::put_relation(map, "tag", &self.tags)
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        fields::serialize_fields(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Object {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        fields::deserialize_fields(deserializer)
    }
}

//! ActivityStreams entity model.
//!
//! Models the graph of typed, linked documents from the Activity Vocabulary
//! and converts it to and from JSON:
//! - [`Entity`]: any node in the graph, one of [`Object`], [`Link`], [`Activity`],
//!   [`Collection`], [`Image`]
//! - [`TypeRegistry`]: maps each concrete kind to the `type` tags that select it
//! - [`codec`]: the polymorphic reader and writer, which finds the `type` tag wherever
//!   it sits in a document and dispatches to the matching kind
//! - [`LanguageMap`]: language-tagged values projected through the default language
//! - [`Settings`]: process-wide default language and default context
//! - [`ObjectFetcher`]: the seam through which a [`Link`] resolves its target
//!
//! Relations use [`Relation`] and [`RestrictedList`] from `activitypub-types`,
//! re-exported here.

mod activity;
pub mod codec;
mod collection;
pub mod duration;
mod entity;
mod error;
mod image;
mod language;
mod link;
mod macros;
mod object;
mod registry;
mod resolve;
mod settings;

pub use activity::{Activity, ActivityBuilder};
pub use codec::{
    DecodeOptions, EncodeOptions, decode_as, decode_entity, decode_entity_with, encode_entity,
};
pub use collection::Collection;
pub use entity::{DEFAULT_MEDIA_TYPE, Entity, EntityCore, EntityKind, EntityType};
pub use error::{
    CodecError, CodecResult, ConfigError, Error, FetchError, RegistryError, Result,
};
pub use image::Image;
pub use language::LanguageMap;
pub use link::Link;
pub use object::{LinkOrImage, Object};
pub use registry::{KindDescriptor, TypeRegistry};
pub use resolve::{NotImplementedFetcher, ObjectFetcher};
pub use settings::Settings;

pub use activitypub_types::{Relation, RestrictedList, ValidationError, ValidationResult};

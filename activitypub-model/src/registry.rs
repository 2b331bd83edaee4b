//! Kind ↔ type-tag registry used for decode dispatch.

use crate::activity::Activity;
use crate::collection::Collection;
use crate::entity::{Entity, EntityKind, EntityType};
use crate::error::{CodecResult, RegistryError};
use crate::image::Image;
use crate::link::Link;
use crate::object::Object;
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

static GLOBAL: OnceLock<Arc<TypeRegistry>> = OnceLock::new();

/// How to build and decode one concrete kind.
#[derive(Debug, Clone, Copy)]
pub struct KindDescriptor {
    kind: EntityKind,
    construct: fn() -> Entity,
    decode: fn(&str) -> serde_json::Result<Entity>,
}

impl KindDescriptor {
    /// Describes the concrete type `T`.
    #[must_use]
    pub fn of<T: EntityType>() -> Self {
        Self {
            kind: T::KIND,
            construct: construct::<T>,
            decode: decode::<T>,
        }
    }

    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// A fresh zero-argument instance.
    #[must_use]
    pub fn instantiate(&self) -> Entity {
        (self.construct)()
    }

    /// Decodes `text` as this kind, without dispatching on its tag.
    pub fn decode(&self, text: &str) -> CodecResult<Entity> {
        Ok((self.decode)(text)?)
    }
}

fn construct<T: EntityType>() -> Entity {
    T::default().into()
}

fn decode<T: EntityType>(text: &str) -> serde_json::Result<Entity> {
    serde_json::from_str::<T>(text).map(Into::into)
}

#[derive(Debug)]
struct Registered {
    descriptor: KindDescriptor,
    tags: Vec<String>,
}

impl Registered {
    fn matches(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|tag| tags.contains(tag))
    }
}

/// Maps every registered kind to its default type tags.
///
/// Immutable once built. Registration order is kept and decides ties:
/// when a document's tags match several kinds, the last one registered wins.
#[derive(Debug)]
pub struct TypeRegistry {
    kinds: Vec<Registered>,
}

impl TypeRegistry {
    /// Builds a registry, reading each kind's tags from a fresh instance.
    pub fn register_all(
        descriptors: impl IntoIterator<Item = KindDescriptor>,
    ) -> Result<Self, RegistryError> {
        let mut kinds: Vec<Registered> = Vec::new();

        for descriptor in descriptors {
            if kinds.iter().any(|k| k.descriptor.kind == descriptor.kind) {
                return Err(RegistryError::DuplicateKind(descriptor.kind));
            }

            let tags = descriptor.instantiate().types().to_vec();
            if tags.is_empty() {
                return Err(RegistryError::NoDefaultTypes(descriptor.kind));
            }

            kinds.push(Registered { descriptor, tags });
        }

        info!(kinds = kinds.len(), "type registry built");
        Ok(Self { kinds })
    }

    /// The built-in kinds, general to specific.
    #[must_use]
    pub fn builtin_kinds() -> [KindDescriptor; 5] {
        [
            KindDescriptor::of::<Object>(),
            KindDescriptor::of::<Link>(),
            KindDescriptor::of::<Collection>(),
            KindDescriptor::of::<Image>(),
            KindDescriptor::of::<Activity>(),
        ]
    }

    /// The process-wide registry of built-in kinds, built on first use.
    ///
    /// # Panics
    ///
    /// Panics if the built-in kinds fail to register, which means the
    /// process cannot decode anything.
    pub fn global() -> Arc<TypeRegistry> {
        GLOBAL
            .get_or_init(|| {
                Arc::new(
                    TypeRegistry::register_all(Self::builtin_kinds())
                        .expect("built-in entity kinds must register"),
                )
            })
            .clone()
    }

    /// Picks the kind for a document's tags, or `None` to fall back to Object.
    #[must_use]
    pub fn resolve(&self, tags: &[String]) -> Option<&KindDescriptor> {
        let mut resolved = None;
        let mut matched = 0usize;

        for entry in self.kinds.iter().filter(|entry| entry.matches(tags)) {
            resolved = Some(&entry.descriptor);
            matched += 1;
        }

        if matched > 1 {
            if let Some(descriptor) = resolved {
                warn!(
                    matched,
                    kind = %descriptor.kind,
                    ?tags,
                    "type tags match several kinds, using the last registered"
                );
            }
        }
        resolved
    }

    /// The default tags registered for `kind`.
    #[must_use]
    pub fn tags_for(&self, kind: EntityKind) -> Option<&[String]> {
        self.kinds
            .iter()
            .find(|entry| entry.descriptor.kind == kind)
            .map(|entry| entry.tags.as_slice())
    }

    #[must_use]
    pub fn contains(&self, kind: EntityKind) -> bool {
        self.tags_for(kind).is_some()
    }

    /// Registered kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = EntityKind> + '_ {
        self.kinds.iter().map(|entry| entry.descriptor.kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

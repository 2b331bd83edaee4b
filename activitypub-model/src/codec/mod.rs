//! Polymorphic JSON reader and writer.
//!
//! Decoding never trusts a static type: [`decode_entity`] scans the
//! document for its `type` tag, asks the [`TypeRegistry`] which concrete
//! kind owns that tag, and decodes the untouched original text as that kind.
//! The same dispatch runs for every nested `Entity`-typed field.
//!
//! | top-level token        | result                                      |
//! |------------------------|---------------------------------------------|
//! | string                 | context-free [`Link`] with that `href`      |
//! | object with a known tag| the registered kind (last match wins)       |
//! | object, unknown tag    | [`Object`]                                  |
//! | object without a tag   | [`Object`]                                  |
//! | anything else          | [`CodecError::MalformedDocument`]           |
//!
//! Encoding always writes the runtime kind's full field set.

pub(crate) mod fields;
mod scan;

use crate::entity::{Entity, EntityKind, EntityType};
use crate::error::{CodecError, CodecResult};
use crate::link::Link;
use crate::object::Object;
use crate::registry::TypeRegistry;
use scan::Scan;
use std::cell::RefCell;
use std::sync::Arc;
use tracing::debug;

thread_local! {
    static ACTIVE_REGISTRY: RefCell<Option<Arc<TypeRegistry>>> = const { RefCell::new(None) };
}

/// Options for [`encode_entity`].
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Indent the output. Defaults to true.
    pub pretty: bool,
    /// Registry the output must be decodable with. `None` means the global one,
    /// which knows every built-in kind.
    pub type_registry: Option<Arc<TypeRegistry>>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            type_registry: None,
        }
    }
}

impl EncodeOptions {
    /// Single-line output.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_registry(mut self, registry: Arc<TypeRegistry>) -> Self {
        self.type_registry = Some(registry);
        self
    }
}

/// Options for [`decode_entity_with`].
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Registry used for dispatch, including nested entities. `None` means
    /// [`TypeRegistry::global`].
    pub type_registry: Option<Arc<TypeRegistry>>,
}

impl DecodeOptions {
    #[must_use]
    pub fn with_registry(registry: Arc<TypeRegistry>) -> Self {
        Self {
            type_registry: Some(registry),
        }
    }
}

/// Decodes a document with the global registry.
pub fn decode_entity(text: &str) -> CodecResult<Entity> {
    decode_entity_with(text, &DecodeOptions::default())
}

/// Decodes a document with the given options.
///
/// Either the whole graph decodes or an error is returned; no partially
/// populated entity escapes.
pub fn decode_entity_with(text: &str, options: &DecodeOptions) -> CodecResult<Entity> {
    match &options.type_registry {
        Some(registry) => {
            let _scope = RegistryScope::enter(Arc::clone(registry));
            decode_document(text)
        }
        None => decode_document(text),
    }
}

/// Decodes a document that must resolve to `T`.
pub fn decode_as<T: EntityType>(text: &str) -> CodecResult<T> {
    let entity = decode_entity(text)?;
    let actual = entity.kind();
    T::try_from(entity).map_err(|_| CodecError::KindMismatch {
        expected: T::KIND,
        actual,
    })
}

/// Encodes an entity using its runtime kind.
pub fn encode_entity(entity: &Entity, options: &EncodeOptions) -> CodecResult<String> {
    if let Some(registry) = &options.type_registry {
        let kind = entity.kind();
        if kind != EntityKind::Object && !registry.contains(kind) {
            return Err(CodecError::UnregisteredKind(kind));
        }
    }

    let text = if options.pretty {
        serde_json::to_string_pretty(entity)?
    } else {
        serde_json::to_string(entity)?
    };
    Ok(text)
}

/// Scans, resolves and decodes one document against the active registry.
pub(crate) fn decode_document(text: &str) -> CodecResult<Entity> {
    match scan::scan(text)? {
        Scan::Shorthand => Ok(serde_json::from_str::<Link>(text)?.into()),
        Scan::Untyped => {
            debug!("no type tag, decoding as Object");
            decode_fallback(text)
        }
        Scan::Tags(tags) => {
            let registry = active_registry();
            match registry.resolve(&tags) {
                Some(descriptor) => {
                    debug!(kind = %descriptor.kind(), ?tags, "dispatching on type tag");
                    descriptor.decode(text)
                }
                None => {
                    debug!(?tags, "no registered kind matches, decoding as Object");
                    decode_fallback(text)
                }
            }
        }
    }
}

fn decode_fallback(text: &str) -> CodecResult<Entity> {
    Ok(serde_json::from_str::<Object>(text)?.into())
}

fn active_registry() -> Arc<TypeRegistry> {
    ACTIVE_REGISTRY
        .with(|active| active.borrow().clone())
        .unwrap_or_else(TypeRegistry::global)
}

/// Makes a registry the active one on this thread until dropped.
struct RegistryScope {
    previous: Option<Arc<TypeRegistry>>,
}

impl RegistryScope {
    fn enter(registry: Arc<TypeRegistry>) -> Self {
        let previous = ACTIVE_REGISTRY.with(|active| active.replace(Some(registry)));
        Self { previous }
    }
}

impl Drop for RegistryScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        ACTIVE_REGISTRY.with(|active| *active.borrow_mut() = previous);
    }
}

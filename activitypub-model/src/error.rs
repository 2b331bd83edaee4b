//! Error types for the entity model.

use crate::entity::EntityKind;
use activitypub_types::ValidationError;
use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for encode/decode operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors raised while converting documents to or from entities.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The underlying JSON was invalid or did not fit the resolved kind's fields.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level token was neither a string nor an object.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// The `type` value was neither a string nor an array.
    #[error("invalid type tag: expected a string or an array of strings, found {0}")]
    InvalidTypeTag(String),

    /// A typed decode resolved to a different kind than requested.
    #[error("expected a {expected} document, decoded a {actual}")]
    KindMismatch {
        expected: EntityKind,
        actual: EntityKind,
    },

    /// The entity's kind is not in the registry used for encoding.
    #[error("entity kind {0} is not registered")]
    UnregisteredKind(EntityKind),
}

/// Errors raised while building a [`TypeRegistry`](crate::TypeRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The same kind was listed twice.
    #[error("entity kind {0} registered more than once")]
    DuplicateKind(EntityKind),

    /// A kind's zero-argument instance carried no default type tags.
    #[error("entity kind {0} has no default type tags")]
    NoDefaultTypes(EntityKind),
}

/// Errors surfaced by an [`ObjectFetcher`](crate::ObjectFetcher).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No transport is configured.
    #[error("fetching {href} is not implemented")]
    NotImplemented { href: String },

    /// The transport failed.
    #[error("failed to fetch {href}: {reason}")]
    Failed { href: String, reason: String },
}

/// Errors raised while loading or installing [`Settings`](crate::Settings).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings were already installed for this process.
    #[error("settings are already initialized")]
    AlreadyInitialized,

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

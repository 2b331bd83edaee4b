//! Wire-shape and collection primitives for ActivityPub documents.
//!
//! This crate defines the kind-agnostic building blocks the entity model is
//! assembled from:
//! - [`Relation<T>`]: an ordered relation with a "first element" accessor pair
//! - [`shape`]: the single-or-array wire codec shared by every relation
//! - [`RestrictedList<T, A>`]: an ordered list limited to an allow-set of kinds
//!
//! Nothing here knows which concrete entity kinds exist. Those live in
//! `activitypub-model`, which plugs its kinds in through [`Kinded`] and
//! [`AllowSet`].

mod error;
mod relation;
mod restricted;
pub mod shape;

pub use error::{ValidationError, ValidationResult};
pub use relation::Relation;
pub use restricted::{AllowSet, Kinded, RestrictedList};

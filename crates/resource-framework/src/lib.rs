//! # Resource Framework
//!
//! This crate provides the building blocks for **self-describing domain resources**:
//! entities that know their own fields, validate themselves and can be read and
//! written by field name, without any runtime reflection.
//!
//! ## Why Self-Describing Resources?
//!
//! Binding layers (HTTP handlers, form decoders, storage mappers) want to treat every
//! entity the same way: "give me your fields", "set `title` to this", "are you valid,
//! and if not, what is wrong?". Writing that plumbing per entity is repetitive and
//! drifts out of sync with the struct. Here it is written **once**, on top of a
//! per-type field table.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Field Layer** ([`Property`], [`Relationship`]) - Typed values with rules, and links to other resources
//! 2. **Registry Layer** ([`Registry`]) - The immutable name -> field table of one resource type
//! 3. **Resource Layer** ([`Resource`]) - Validation, by-name access and naming built on the registry
//!
//! The [`resource!`] macro ties them together: one struct declaration yields the
//! fields, the registry and the trait implementation.
//!
//! ## Core Abstractions
//!
//! ### [`Resource`] - The Contract
//!
//! ```rust
//! use resource_framework::rule::{Bounds, NonEmpty};
//! use resource_framework::{resource, Property, Resource, ValidationError};
//!
//! resource! {
//!     pub struct Person {
//!         pub property title: String = Property::new(String::new()).rule(NonEmpty),
//!         pub property age: i64 = Property::new(0).rule(Bounds::at_least(18)),
//!     }
//! }
//!
//! fn main() {
//!     let mut person = Person::default();
//!     person.title.set("Dr".into());
//!     person.age.set(12);
//!
//!     // 1. Validate: every property is checked, failures are collected
//!     assert!(!person.is_valid());
//!     let errors = person.errors();
//!     assert_eq!(errors.len(), 1);
//!     assert!(matches!(errors["age"][0], ValidationError::BelowMin { .. }));
//!
//!     // 2. Fix through the by-name accessor and validate again
//!     assert!(person.set("age", 42));
//!     assert!(person.is_valid());
//!     assert!(person.errors().is_empty());
//! }
//! ```
//!
//! ### [`AnyResource`] - Links Between Resources
//!
//! Relationships hold `Arc`-shared resources. The by-name accessor passes them around
//! as [`Link`]s (`Arc<dyn AnyResource>`), and a typed [`Relationship<R>`] only accepts
//! links whose concrete type is `R`.
//!
//! ## Type Safety
//!
//! - **No casts at call sites**: by-name lookups return [`FieldRef`]/[`FieldMut`], an enum
//!   of the two field capabilities
//! - **Strict conversions**: [`Validatable`] never parses text into numbers or truncates
//!   floats; a write that does not convert is ignored and reported as `false`
//! - **Typed errors**: rule failures are [`ValidationError`] values, not strings
//!
//! ## Concurrency Model
//!
//! - Registries are built once per type behind a `OnceLock`, then shared read-only
//! - Each instance owns its error map behind a `Mutex`; a validity pass holds it for
//!   the full pass, so concurrent checks of one instance never interleave
//! - Every resource is `Send + Sync` and can be shared through `Arc`
//!
//! ## Observability
//!
//! The framework logs through `tracing` with a `resource` field on every event.
//! Registry construction and validation verdicts are logged at `debug`, ignored
//! writes at `trace`. Installing a subscriber is left to the application.

pub mod error;
pub mod field;
pub mod macros;
pub mod naming;
pub mod registry;
pub mod resource;
pub mod rule;
pub mod value;

#[doc(hidden)]
pub use paste;

// Re-export core types for convenience
pub use error::{ErrorMap, ResourceError, ValidationError};
pub use field::{
    FieldKind, FieldMut, FieldRef, Property, PropertyField, Relationship, RelationshipField,
};
pub use registry::{FieldDescriptor, Registry, RegistryBuilder};
pub use resource::{same_type, AnyResource, Link, Resource, ResourceState};
pub use value::{FieldValue, Validatable, Value};

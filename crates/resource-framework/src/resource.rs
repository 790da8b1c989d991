//! # Resource Trait
//!
//! The `Resource` trait defines the contract every domain entity (Book, Author, …)
//! implements to get field discovery, validation and by-name access. It is almost
//! never implemented by hand: the [`resource!`](crate::resource!) macro declares the
//! struct and generates the implementation.
//!
//! # Architecture Note
//! Implementors only supply three things:
//! - [`Resource::NAME`]: the declared type name,
//! - [`Resource::registry`]: the type-scoped field table,
//! - [`Resource::state`]: the per-instance bookkeeping (the error map).
//!
//! Everything else is a **Provided Method** built on top of the registry, so the
//! validation and accessor logic is written *once* and reused by every resource.
//!
//! # Concurrency
//! The registry is built once per type inside a `OnceLock`: the first caller builds
//! it, concurrent callers wait and then read the same table. A validity pass holds
//! the instance's error-map lock for its full duration, so two threads validating
//! the same `Arc<R>` never interleave.

use crate::error::{ErrorMap, ResourceError};
use crate::field::{FieldMut, FieldRef};
use crate::naming;
use crate::registry::Registry;
use crate::value::{FieldValue, Value};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

/// A shared, type-erased reference to a resource held by a relationship.
pub type Link = Arc<dyn AnyResource>;

/// Per-instance bookkeeping embedded in every resource.
#[derive(Default)]
pub struct ResourceState {
    errors: Mutex<ErrorMap>,
}

impl ResourceState {
    pub fn new() -> Self {
        Self::default()
    }

    // The map is rebuilt from scratch on every pass, so a poisoned lock
    // holds nothing worth protecting.
    pub(crate) fn lock_errors(&self) -> MutexGuard<'_, ErrorMap> {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the errors recorded by the last validity check.
    pub fn errors(&self) -> ErrorMap {
        self.lock_errors().clone()
    }
}

impl Clone for ResourceState {
    fn clone(&self) -> Self {
        Self {
            errors: Mutex::new(self.errors()),
        }
    }
}

impl Debug for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.lock_errors();
        f.debug_struct("ResourceState")
            .field("invalid_fields", &errors.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Trait that every domain entity implements to be validated and addressed by name.
pub trait Resource: Debug + Send + Sync + Sized + 'static {
    /// The declared type name (e.g. `"Book"`).
    const NAME: &'static str;

    /// The field table shared by every instance of this type.
    fn registry() -> &'static Registry<Self>;

    /// Per-instance bookkeeping.
    fn state(&self) -> &ResourceState;

    // --- Naming ---

    /// Lower-cased, pluralized type name (`Book` -> `books`).
    fn table_name() -> String {
        naming::table_name(Self::NAME)
    }

    /// Like [`Resource::table_name`] with a caller-supplied pluralizer.
    fn table_name_with(pluralize: impl Fn(&str) -> String) -> String {
        pluralize(&Self::NAME.to_lowercase())
    }

    // --- Field Registry ---

    /// Resolves a field by name.
    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        let descriptor = Self::registry().get(name)?;
        Some(descriptor.resolve(self))
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        let descriptor = Self::registry().get(name)?;
        Some(descriptor.resolve_mut(self))
    }

    /// Name -> field mapping of this instance. Entries point at the fields
    /// inside `self`, not at copies.
    fn fields(&self) -> BTreeMap<&'static str, FieldRef<'_>> {
        Self::registry()
            .iter()
            .map(|descriptor| (descriptor.name(), descriptor.resolve(self)))
            .collect()
    }

    // --- Validation ---

    /// Validates every property and replaces the error map with the failures.
    ///
    /// Relationships are not validated. Every property is checked even after a
    /// failure, so the error map lists all invalid fields at once.
    fn is_valid(&self) -> bool {
        let mut errors = self.state().lock_errors();
        errors.clear();

        for descriptor in Self::registry().iter() {
            let FieldRef::Property(property) = descriptor.resolve(self) else {
                continue;
            };
            if let Err(failures) = property.check() {
                debug!(
                    resource = Self::NAME,
                    field = descriptor.name(),
                    errors = failures.len(),
                    "Field invalid"
                );
                errors.insert(descriptor.name().to_string(), failures);
            }
        }

        let valid = errors.is_empty();
        debug!(resource = Self::NAME, valid, invalid = errors.len(), "Validated");
        valid
    }

    /// Errors recorded by the last [`Resource::is_valid`] call.
    fn errors(&self) -> ErrorMap {
        self.state().errors()
    }

    /// Runs a validity check and turns failures into an error.
    fn validate(&self) -> Result<(), ResourceError> {
        if self.is_valid() {
            return Ok(());
        }
        Err(ResourceError::Invalid {
            resource: Self::NAME,
            errors: self.errors(),
        })
    }

    // --- Dynamic Accessor ---

    /// Reads a field by name.
    ///
    /// Relationships yield their links, properties their current value, and
    /// unknown names `None`.
    fn get(&self, name: &str) -> Option<FieldValue> {
        match self.field(name)? {
            FieldRef::Relationship(relationship) => Some(FieldValue::Links(relationship.links())),
            FieldRef::Property(property) => Some(FieldValue::Scalar(property.current())),
        }
    }

    /// Writes a field by name.
    ///
    /// A relationship accepts a single linked resource of its target type, a
    /// property accepts a scalar convertible to its value type. Anything else,
    /// including unknown names, is ignored. Returns whether the write was applied.
    fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> bool {
        let applied = match (self.field_mut(name), value.into()) {
            (Some(FieldMut::Relationship(relationship)), FieldValue::Link(link)) => {
                relationship.link(link)
            }
            (Some(FieldMut::Property(property)), FieldValue::Scalar(value)) => {
                property.assign(&value)
            }
            (Some(_), _) | (None, _) => false,
        };

        if !applied {
            trace!(resource = Self::NAME, field = name, "Ignored write");
        }
        applied
    }

    /// Applies many writes; returns how many were applied.
    fn assign<I, K, V>(&mut self, payload: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FieldValue>,
    {
        let mut applied = 0;
        for (name, value) in payload {
            if self.set(name.as_ref(), value) {
                applied += 1;
            }
        }
        applied
    }

    /// Current value of every property, keyed by field name.
    fn values(&self) -> BTreeMap<&'static str, Value> {
        Self::registry()
            .iter()
            .filter_map(|descriptor| match descriptor.resolve(self) {
                FieldRef::Property(property) => Some((descriptor.name(), property.current())),
                FieldRef::Relationship(_) => None,
            })
            .collect()
    }
}

/// Object-safe face of a [`Resource`], used for links between resources.
pub trait AnyResource: Any + Debug + Send + Sync {
    fn resource_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    /// By-name read, as [`Resource::get`].
    fn read(&self, name: &str) -> Option<FieldValue>;

    /// Validity check, as [`Resource::is_valid`].
    fn check(&self) -> bool;

    /// Errors of the last check, as [`Resource::errors`].
    fn last_errors(&self) -> ErrorMap;
}

impl<R: Resource> AnyResource for R {
    fn resource_name(&self) -> &'static str {
        R::NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn read(&self, name: &str) -> Option<FieldValue> {
        Resource::get(self, name)
    }

    fn check(&self) -> bool {
        Resource::is_valid(self)
    }

    fn last_errors(&self) -> ErrorMap {
        Resource::errors(self)
    }
}

impl dyn AnyResource {
    pub fn downcast_ref<R: Resource>(&self) -> Option<&R> {
        self.as_any().downcast_ref::<R>()
    }
}

/// Two resources are equal when their declared type names match, ignoring case.
/// Field values are not compared.
pub fn same_type(lhs: &dyn AnyResource, rhs: &dyn AnyResource) -> bool {
    lhs.resource_name().to_lowercase() == rhs.resource_name().to_lowercase()
}

impl PartialEq for dyn AnyResource {
    fn eq(&self, other: &Self) -> bool {
        same_type(self, other)
    }
}

impl Eq for dyn AnyResource {}

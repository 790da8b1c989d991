//! # Fields
//!
//! A resource is made of field objects. Each registered field exposes exactly one
//! of two capabilities:
//!
//! - [`PropertyField`]: a single validated value ([`Property<T>`]).
//! - [`RelationshipField`]: an ordered list of linked resources ([`Relationship<R>`]).
//!
//! Code that walks a resource by name never casts; it matches on [`FieldRef`] /
//! [`FieldMut`], whose variants are exactly those two capabilities.

use crate::error::ValidationError;
use crate::resource::{Link, Resource};
use crate::rule::Rule;
use crate::value::{Validatable, Value};
use serde::Serialize;
use std::fmt::{self, Debug, Display};
use std::sync::Arc;

/// The capability kind of a registered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Property,
    Relationship,
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Property => write!(f, "property"),
            FieldKind::Relationship => write!(f, "relationship"),
        }
    }
}

/// Object-safe view of a [`Property`], independent of its value type.
pub trait PropertyField: Send + Sync {
    /// The current value in dynamic form.
    fn current(&self) -> Value;

    /// Replaces the value if `value` converts to the property's type.
    /// Returns whether the value was stored.
    fn assign(&mut self, value: &Value) -> bool;

    /// Runs every rule; `Err` carries all failures.
    fn check(&self) -> Result<(), Vec<ValidationError>>;

    /// Rust type name of the stored value, for diagnostics.
    fn value_type(&self) -> &'static str;
}

/// Object-safe view of a [`Relationship`], independent of its target type.
pub trait RelationshipField: Send + Sync {
    /// Declared name of the target resource type.
    fn target(&self) -> &'static str;

    /// Every linked resource, in insertion order.
    fn links(&self) -> Vec<Link>;

    /// Appends `link` if it is a resource of the target type.
    /// Returns whether the link was added.
    fn link(&mut self, link: Link) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared reference to a registered field.
#[derive(Clone, Copy)]
pub enum FieldRef<'a> {
    Property(&'a dyn PropertyField),
    Relationship(&'a dyn RelationshipField),
}

impl FieldRef<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldRef::Property(_) => FieldKind::Property,
            FieldRef::Relationship(_) => FieldKind::Relationship,
        }
    }
}

impl Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Property(property) => f
                .debug_tuple("Property")
                .field(&property.current())
                .finish(),
            FieldRef::Relationship(relationship) => f
                .debug_struct("Relationship")
                .field("target", &relationship.target())
                .field("len", &relationship.len())
                .finish(),
        }
    }
}

/// Exclusive reference to a registered field.
pub enum FieldMut<'a> {
    Property(&'a mut dyn PropertyField),
    Relationship(&'a mut dyn RelationshipField),
}

impl FieldMut<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldMut::Property(_) => FieldKind::Property,
            FieldMut::Relationship(_) => FieldKind::Relationship,
        }
    }
}

// =============================================================================
// Property
// =============================================================================

/// A field holding one value of a [`Validatable`] type plus the rules it must satisfy.
///
/// ```rust
/// use resource_framework::rule::{MaxLen, NonEmpty};
/// use resource_framework::{Property, ValidationError};
///
/// let mut title = Property::new(String::new()).rule(NonEmpty).rule(MaxLen(8));
/// assert_eq!(title.validate(), Err(vec![ValidationError::Empty]));
///
/// title.set("Dune".to_string());
/// assert!(title.is_valid());
/// ```
pub struct Property<T> {
    value: T,
    rules: Vec<Arc<dyn Rule<T>>>,
}

impl<T: Validatable> Property<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            rules: Vec::new(),
        }
    }

    /// Attaches a rule. Rules run in the order they were attached.
    pub fn rule(mut self, rule: impl Rule<T> + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
    }

    /// Stores `value` and returns the previous one.
    pub fn replace(&mut self, value: T) -> T {
        std::mem::replace(&mut self.value, value)
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Runs every rule against the current value. All failures are reported,
    /// not only the first.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = self
            .rules
            .iter()
            .filter_map(|rule| rule.check(&self.value).err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn is_valid(&self) -> bool {
        self.rules.iter().all(|rule| rule.check(&self.value).is_ok())
    }
}

impl<T: Validatable + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            rules: self.rules.clone(),
        }
    }
}

impl<T: Debug> Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.value)
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl<T: Validatable> PropertyField for Property<T> {
    fn current(&self) -> Value {
        self.value.to_value()
    }

    fn assign(&mut self, value: &Value) -> bool {
        match T::from_value(value) {
            Some(value) => {
                self.value = value;
                true
            }
            None => false,
        }
    }

    fn check(&self) -> Result<(), Vec<ValidationError>> {
        self.validate()
    }

    fn value_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

// =============================================================================
// Relationship
// =============================================================================

/// A field holding an ordered list of linked resources.
///
/// Linked resources are shared (`Arc`), so the same resource may appear in
/// several relationships.
pub struct Relationship<R> {
    items: Vec<Arc<R>>,
}

impl<R: Resource> Relationship<R> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends a resource. Accepts an owned resource or an existing `Arc`.
    pub fn add(&mut self, resource: impl Into<Arc<R>>) {
        self.items.push(resource.into());
    }

    pub fn list(&self) -> &[Arc<R>] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<R>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<R: Resource> Default for Relationship<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for Relationship<R> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

// Only the target and size: linked resources are printed by their owners.
impl<R: Resource> Debug for Relationship<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relationship")
            .field("target", &R::NAME)
            .field("len", &self.items.len())
            .finish()
    }
}

impl<'a, R: Resource> IntoIterator for &'a Relationship<R> {
    type Item = &'a Arc<R>;
    type IntoIter = std::slice::Iter<'a, Arc<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<R: Resource> RelationshipField for Relationship<R> {
    fn target(&self) -> &'static str {
        R::NAME
    }

    fn links(&self) -> Vec<Link> {
        self.items
            .iter()
            .map(|item| Arc::clone(item) as Link)
            .collect()
    }

    fn link(&mut self, link: Link) -> bool {
        match link.into_any_arc().downcast::<R>() {
            Ok(resource) => {
                self.items.push(resource);
                true
            }
            Err(_) => false,
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Bounds, MinLen, NonEmpty};

    #[test]
    fn test_validate_reports_every_failing_rule() {
        let property = Property::new(String::new()).rule(NonEmpty).rule(MinLen(2));
        assert_eq!(
            property.validate(),
            Err(vec![
                ValidationError::Empty,
                ValidationError::TooShort { len: 0, min: 2 }
            ])
        );
        assert!(!property.is_valid());
    }

    #[test]
    fn test_property_without_rules_is_valid() {
        let property = Property::new(0u32);
        assert!(property.validate().is_ok());
        assert_eq!(property.rule_count(), 0);
    }

    #[test]
    fn test_assign_converts_or_ignores() {
        let mut age = Property::new(30u32).rule(Bounds::at_most(150u32));

        assert!(PropertyField::assign(&mut age, &Value::Int(41)));
        assert_eq!(*age.value(), 41);

        assert!(!PropertyField::assign(&mut age, &Value::Text("old".into())));
        assert!(!PropertyField::assign(&mut age, &Value::Int(-3)));
        assert_eq!(*age.value(), 41);
        assert_eq!(age.current(), Value::Int(41));
    }

    #[test]
    fn test_assign_does_not_validate() {
        let mut age = Property::new(30u32).rule(Bounds::at_most(150u32));
        assert!(PropertyField::assign(&mut age, &Value::Int(999)));
        assert!(!age.is_valid());
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut title = Property::new("a".to_string());
        assert_eq!(title.replace("b".to_string()), "a");
        assert_eq!(title.into_inner(), "b");
    }

    #[test]
    fn test_clone_shares_rules() {
        let title = Property::new(String::new()).rule(NonEmpty);
        let copy = title.clone();
        assert_eq!(copy.rule_count(), 1);
        assert!(!copy.is_valid());
    }

    #[test]
    fn test_field_kind_display() {
        assert_eq!(FieldKind::Property.to_string(), "property");
        assert_eq!(
            serde_json::to_value(FieldKind::Relationship).unwrap(),
            "relationship"
        );
    }
}

//! # Field Registry
//!
//! A [`Registry`] is the name -> field table of one resource type. It stores
//! *descriptors*, not field objects: each descriptor carries the field name, its
//! [`FieldKind`] and plain accessor functions that resolve the field inside a given
//! instance. The table is therefore immutable and shared by every instance of the
//! type, while lookups still return the instance's own field objects.
//!
//! Registries are built with [`RegistryBuilder`], normally by the code that
//! [`resource!`](crate::resource!) generates:
//!
//! ```rust
//! use resource_framework::{Property, PropertyField, Registry, Resource, ResourceState};
//!
//! #[derive(Debug, Default)]
//! struct Tag {
//!     label: Property<String>,
//!     state: ResourceState,
//! }
//!
//! fn label(tag: &Tag) -> &dyn PropertyField {
//!     &tag.label
//! }
//!
//! fn label_mut(tag: &mut Tag) -> &mut dyn PropertyField {
//!     &mut tag.label
//! }
//!
//! impl Resource for Tag {
//!     const NAME: &'static str = "Tag";
//!
//!     fn registry() -> &'static Registry<Self> {
//!         static REGISTRY: std::sync::OnceLock<Registry<Tag>> = std::sync::OnceLock::new();
//!         REGISTRY.get_or_init(|| Registry::builder("Tag").property("label", label, label_mut).build())
//!     }
//!
//!     fn state(&self) -> &ResourceState {
//!         &self.state
//!     }
//! }
//!
//! let mut tag = Tag::default();
//! assert!(tag.set("label", "urgent"));
//! assert_eq!(tag.label.value(), "urgent");
//! assert_eq!(Tag::registry().names().collect::<Vec<_>>(), ["label"]);
//! ```

use crate::error::ResourceError;
use crate::field::{FieldKind, FieldMut, FieldRef, PropertyField, RelationshipField};
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug};
use tracing::{debug, warn};

/// Resolves a property inside an instance.
pub type PropertyAccess<R> = fn(&R) -> &dyn PropertyField;
/// Resolves a property inside an instance, mutably.
pub type PropertyAccessMut<R> = fn(&mut R) -> &mut dyn PropertyField;
/// Resolves a relationship inside an instance.
pub type RelationshipAccess<R> = fn(&R) -> &dyn RelationshipField;
/// Resolves a relationship inside an instance, mutably.
pub type RelationshipAccessMut<R> = fn(&mut R) -> &mut dyn RelationshipField;

enum Accessor<R> {
    Property {
        get: PropertyAccess<R>,
        get_mut: PropertyAccessMut<R>,
    },
    Relationship {
        get: RelationshipAccess<R>,
        get_mut: RelationshipAccessMut<R>,
    },
}

/// One registered field of resource type `R`.
pub struct FieldDescriptor<R> {
    name: &'static str,
    accessor: Accessor<R>,
}

impl<R> FieldDescriptor<R> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        match self.accessor {
            Accessor::Property { .. } => FieldKind::Property,
            Accessor::Relationship { .. } => FieldKind::Relationship,
        }
    }

    /// The field object inside `resource`.
    pub fn resolve<'a>(&self, resource: &'a R) -> FieldRef<'a> {
        match self.accessor {
            Accessor::Property { get, .. } => FieldRef::Property(get(resource)),
            Accessor::Relationship { get, .. } => FieldRef::Relationship(get(resource)),
        }
    }

    pub fn resolve_mut<'a>(&self, resource: &'a mut R) -> FieldMut<'a> {
        match self.accessor {
            Accessor::Property { get_mut, .. } => FieldMut::Property(get_mut(resource)),
            Accessor::Relationship { get_mut, .. } => FieldMut::Relationship(get_mut(resource)),
        }
    }
}

impl<R> Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .finish()
    }
}

/// The field table of one resource type.
pub struct Registry<R> {
    resource: &'static str,
    descriptors: Vec<FieldDescriptor<R>>,
    index: HashMap<&'static str, usize>,
}

impl<R> Registry<R> {
    pub fn builder(resource: &'static str) -> RegistryBuilder<R> {
        RegistryBuilder {
            resource,
            descriptors: Vec::new(),
        }
    }

    /// Declared name of the resource type this table describes.
    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor<R>> {
        self.index.get(name).map(|&i| &self.descriptors[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<FieldKind> {
        self.get(name).map(FieldDescriptor::kind)
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.descriptors.iter().map(FieldDescriptor::name)
    }

    /// Descriptors in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor<R>> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl<'a, R> IntoIterator for &'a Registry<R> {
    type Item = &'a FieldDescriptor<R>;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

impl<R> Debug for Registry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("resource", &self.resource)
            .field("fields", &self.descriptors)
            .finish()
    }
}

/// Collects field descriptors for a [`Registry`].
pub struct RegistryBuilder<R> {
    resource: &'static str,
    descriptors: Vec<FieldDescriptor<R>>,
}

impl<R> RegistryBuilder<R> {
    pub fn property(
        mut self,
        name: &'static str,
        get: PropertyAccess<R>,
        get_mut: PropertyAccessMut<R>,
    ) -> Self {
        self.descriptors.push(FieldDescriptor {
            name,
            accessor: Accessor::Property { get, get_mut },
        });
        self
    }

    pub fn relationship(
        mut self,
        name: &'static str,
        get: RelationshipAccess<R>,
        get_mut: RelationshipAccessMut<R>,
    ) -> Self {
        self.descriptors.push(FieldDescriptor {
            name,
            accessor: Accessor::Relationship { get, get_mut },
        });
        self
    }

    /// Builds the table. A name declared twice keeps its first declaration.
    pub fn build(self) -> Registry<R> {
        let resource = self.resource;
        let mut descriptors = Vec::with_capacity(self.descriptors.len());
        let mut index = HashMap::with_capacity(self.descriptors.len());

        for descriptor in self.descriptors {
            if index.contains_key(descriptor.name) {
                warn!(resource, field = descriptor.name, "Duplicate field dropped");
                continue;
            }
            index.insert(descriptor.name, descriptors.len());
            descriptors.push(descriptor);
        }

        debug!(resource, fields = descriptors.len(), "Registry built");
        Registry {
            resource,
            descriptors,
            index,
        }
    }

    /// Builds the table, rejecting duplicated names.
    pub fn try_build(self) -> Result<Registry<R>, ResourceError> {
        let mut seen = HashSet::new();
        for descriptor in &self.descriptors {
            if !seen.insert(descriptor.name) {
                return Err(ResourceError::DuplicateField {
                    resource: self.resource,
                    field: descriptor.name,
                });
            }
        }
        Ok(self.build())
    }
}

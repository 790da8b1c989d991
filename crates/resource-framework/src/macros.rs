//! # Declaring Resources
//!
//! [`resource!`](crate::resource!) turns one struct declaration into a complete
//! [`Resource`](crate::Resource):
//!
//! - the struct itself (plus a hidden per-instance state field and `#[derive(Debug)]`),
//! - a `Default` impl using each field's `= init` expression, or `Default::default()`,
//! - one upper-case name constant per field (`Book::TITLE == "title"`),
//! - the `Resource` impl with a registry built once per type,
//! - `PartialEq`/`Eq` by declared type name.
//!
//! Every field starts with its kind:
//!
//! | Kind | Declared as | Stored as | Registered |
//! |------|-------------|-----------|------------|
//! | `property` | `property title: String` | `Property<String>` | yes |
//! | `relationship` | `relationship authors: Author` | `Relationship<Author>` | yes |
//! | `data` | `data notes: String` | `String` | no |
//!
//! ```rust
//! use resource_framework::rule::{Bounds, NonEmpty};
//! use resource_framework::{resource, FieldValue, Property, Resource, Value};
//!
//! resource! {
//!     /// A library member.
//!     pub struct Member {
//!         pub property nickname: String = Property::new(String::new()).rule(NonEmpty),
//!         pub property age: u32 = Property::new(30).rule(Bounds::at_most(150)),
//!         pub data notes: String,
//!     }
//! }
//!
//! fn main() {
//!     let mut member = Member::default();
//!     assert!(!member.is_valid());
//!     assert_eq!(member.errors().keys().collect::<Vec<_>>(), ["nickname"]);
//!
//!     member.set(Member::NICKNAME, "Ada");
//!     assert!(member.is_valid());
//!     assert_eq!(member.get("age"), Some(FieldValue::Scalar(Value::Int(30))));
//!
//!     // Plain data is not part of the registry.
//!     assert_eq!(member.get("notes"), None);
//!     assert_eq!(Member::table_name(), "members");
//! }
//! ```

/// Declares a resource struct and implements [`Resource`](crate::Resource) for it.
///
/// See the [module documentation](crate::macros) for the field syntax.
///
/// A field called `name` produces an inherent `NAME` constant, which shadows
/// [`Resource::NAME`](crate::Resource::NAME) on the concrete type. Spell the
/// type name as `<T as Resource>::NAME` in that case.
#[macro_export]
macro_rules! resource {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $kind:ident $field:ident : $ty:ty $(= $init:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $crate::__resource_field_type!($kind $ty),
            )*
            resource_state: $crate::ResourceState,
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: $crate::__resource_field_init!($($init)?), )*
                    resource_state: $crate::ResourceState::new(),
                }
            }
        }

        $crate::paste::paste! {
            #[allow(dead_code)]
            impl $name {
                $( pub const [<$field:upper>]: &'static str = ::core::stringify!($field); )*
            }
        }

        impl $crate::Resource for $name {
            const NAME: &'static str = ::core::stringify!($name);

            fn registry() -> &'static $crate::Registry<Self> {
                static REGISTRY: ::std::sync::OnceLock<$crate::Registry<$name>> =
                    ::std::sync::OnceLock::new();

                REGISTRY.get_or_init(|| {
                    let builder = $crate::Registry::<$name>::builder(::core::stringify!($name));
                    $( let builder = $crate::__resource_register!(builder, $name, $kind, $field); )*
                    builder.build()
                })
            }

            fn state(&self) -> &$crate::ResourceState {
                &self.resource_state
            }
        }

        impl ::core::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $crate::same_type(self, other)
            }
        }

        impl ::core::cmp::Eq for $name {}
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __resource_field_type {
    (property $ty:ty) => { $crate::Property<$ty> };
    (relationship $ty:ty) => { $crate::Relationship<$ty> };
    (data $ty:ty) => { $ty };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __resource_field_init {
    () => {
        ::core::default::Default::default()
    };
    ($init:expr) => {
        $init
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __resource_register {
    ($builder:ident, $name:ident, property, $field:ident) => {{
        fn get(resource: &$name) -> &dyn $crate::PropertyField {
            &resource.$field
        }
        fn get_mut(resource: &mut $name) -> &mut dyn $crate::PropertyField {
            &mut resource.$field
        }
        $builder.property(::core::stringify!($field), get, get_mut)
    }};
    ($builder:ident, $name:ident, relationship, $field:ident) => {{
        fn get(resource: &$name) -> &dyn $crate::RelationshipField {
            &resource.$field
        }
        fn get_mut(resource: &mut $name) -> &mut dyn $crate::RelationshipField {
            &mut resource.$field
        }
        $builder.relationship(::core::stringify!($field), get, get_mut)
    }};
    ($builder:ident, $name:ident, data, $field:ident) => {
        $builder
    };
}

#[cfg(test)]
mod tests {
    use crate::rule::{Bounds, NonEmpty};
    use crate::{FieldKind, Property, Resource};

    crate::resource! {
        #[derive(Clone)]
        struct Widget {
            property label: String = Property::new(String::new()).rule(NonEmpty),
            property weight: f64 = Property::new(1.0).rule(Bounds::at_least(0.0)),
            relationship parts: Widget,
            data cache: Vec<u8>,
        }
    }

    #[test]
    fn test_declared_shape() {
        let registry = Widget::registry();
        assert_eq!(registry.resource(), "Widget");
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            ["label", "weight", "parts"]
        );
        assert_eq!(registry.kind_of("parts"), Some(FieldKind::Relationship));
        assert!(!registry.contains("cache"));
        assert!(!registry.contains("resource_state"));
    }

    #[test]
    fn test_initializers_and_defaults() {
        let widget = Widget::default();
        assert_eq!(widget.label.rule_count(), 1);
        assert_eq!(*widget.weight.value(), 1.0);
        assert!(widget.parts.is_empty());
        assert!(widget.cache.is_empty());
    }

    #[test]
    fn test_name_constants() {
        assert_eq!(Widget::LABEL, "label");
        assert_eq!(Widget::WEIGHT, "weight");
        assert_eq!(Widget::PARTS, "parts");
        assert_eq!(Widget::CACHE, "cache");
        assert_eq!(<Widget as Resource>::NAME, "Widget");
    }

    #[test]
    fn test_clone_keeps_values() {
        let mut widget = Widget::default();
        widget.label.set("gear".into());
        let copy = widget.clone();
        assert_eq!(copy.label.value(), "gear");
    }

    #[test]
    fn test_plain_data_stays_usable() {
        let mut widget = Widget::default();
        widget.cache.push(7);
        assert!(!widget.set("cache", 1));
        assert_eq!(widget.cache, [7]);
    }
}

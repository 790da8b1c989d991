//! # Dynamic Values
//!
//! The by-name accessor works without static knowledge of a resource's shape, so
//! values cross it in a dynamic form:
//!
//! - [`Value`]: a scalar (or list of scalars) held by a property. Deserializes from
//!   untyped payloads such as JSON.
//! - [`FieldValue`]: what `get` returns and `set` accepts. Either a scalar, a single
//!   linked resource, or the list of links held by a relationship.
//!
//! [`Validatable`] is the capability a Rust type needs to live inside a
//! [`Property`](crate::Property): a strict, lossless conversion to and from [`Value`].

use crate::resource::{Link, Resource};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::sync::Arc;

/// A dynamically typed property value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`.
    UInt(u64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(int) => Some(*int),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(flag) => write!(f, "{flag}"),
            Value::Int(int) => write!(f, "{int}"),
            Value::UInt(int) => write!(f, "{int}"),
            Value::Float(float) => write!(f, "{float}"),
            Value::Text(text) => write!(f, "{text:?}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Capability of a type that can be stored in a [`Property`](crate::Property).
///
/// Conversions are strict: text is never parsed into numbers, floats are never
/// truncated into integers, out-of-range integers are rejected and numbers that
/// would lose precision (integers past 2^53 into `f64`, most decimals into `f32`)
/// are rejected too. A value that does not convert is simply not assigned.
pub trait Validatable: Clone + Debug + Send + Sync + 'static {
    fn to_value(&self) -> Value;

    fn from_value(value: &Value) -> Option<Self>;
}

impl Validatable for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl Validatable for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl Validatable for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

/// Largest magnitude below which every integer has an exact `f64`.
const MAX_EXACT_FLOAT_INT: i64 = 1 << 53;

// Range-checked against both integer variants.
macro_rules! int_from_value {
    ($ty:ty, $value:expr) => {
        match $value {
            Value::Int(int) => <$ty>::try_from(*int).ok(),
            Value::UInt(int) => <$ty>::try_from(*int).ok(),
            _ => None,
        }
    };
}

macro_rules! impl_validatable_int {
    ($($ty:ty),*) => {
        $(
            impl Validatable for $ty {
                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }

                fn from_value(value: &Value) -> Option<Self> {
                    int_from_value!($ty, value)
                }
            }
        )*
    };
}

impl_validatable_int!(i8, i16, i32, i64, u8, u16, u32);

// Wider than i64: values past i64::MAX are stored as `UInt`.
macro_rules! impl_validatable_wide_int {
    ($($ty:ty),*) => {
        $(
            impl Validatable for $ty {
                fn to_value(&self) -> Value {
                    match i64::try_from(*self) {
                        Ok(int) => Value::Int(int),
                        Err(_) => u64::try_from(*self).map_or(Value::Null, Value::UInt),
                    }
                }

                fn from_value(value: &Value) -> Option<Self> {
                    int_from_value!($ty, value)
                }
            }
        )*
    };
}

impl_validatable_wide_int!(u64, usize);

impl Validatable for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(float) => Some(*float),
            Value::Int(int) if (-MAX_EXACT_FLOAT_INT..=MAX_EXACT_FLOAT_INT).contains(int) => {
                Some(*int as f64)
            }
            _ => None,
        }
    }
}

impl Validatable for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    /// Only values an `f32` holds exactly (NaN included) convert.
    fn from_value(value: &Value) -> Option<Self> {
        let float = f64::from_value(value)?;
        let narrow = float as f32;
        (f64::from(narrow) == float || float.is_nan()).then_some(narrow)
    }
}

impl<T: Validatable> Validatable for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, T::to_value)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: Validatable> Validatable for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(T::to_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

/// A value crossing the by-name accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// The value of a property, or a value to store into one.
    Scalar(Value),
    /// A single resource to append to a relationship.
    Link(Link),
    /// Every resource currently held by a relationship.
    Links(Vec<Link>),
}

impl FieldValue {
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            FieldValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_links(&self) -> Option<&[Link]> {
        match self {
            FieldValue::Links(links) => Some(links),
            _ => None,
        }
    }
}

impl<R: Resource> From<Arc<R>> for FieldValue {
    fn from(resource: Arc<R>) -> Self {
        FieldValue::Link(resource)
    }
}

impl<T: Validatable> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        FieldValue::Scalar(value.to_value())
    }
}

impl<T: Validatable> From<Vec<T>> for FieldValue {
    fn from(value: Vec<T>) -> Self {
        FieldValue::Scalar(value.to_value())
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Scalar(value)
    }
}

macro_rules! impl_scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value.into())
                }
            }

            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::Scalar(Value::from(value))
                }
            }
        )*
    };
}

impl_scalar_from!(
    String => Text,
    &str => Text,
    bool => Bool,
    i32 => Int,
    i64 => Int,
    u32 => Int,
    f64 => Float,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_conversion_is_range_checked() {
        assert_eq!(u8::from_value(&Value::Int(200)), Some(200));
        assert_eq!(u8::from_value(&Value::Int(300)), None);
        assert_eq!(u32::from_value(&Value::Int(-1)), None);
        assert_eq!(i64::from_value(&Value::Float(1.0)), None);
    }

    #[test]
    fn test_text_is_never_parsed() {
        assert_eq!(i32::from_value(&Value::Text("42".into())), None);
        assert_eq!(String::from_value(&Value::Int(42)), None);
    }

    #[test]
    fn test_float_accepts_int() {
        assert_eq!(f64::from_value(&Value::Int(3)), Some(3.0));
    }

    #[test]
    fn test_option_maps_null() {
        assert_eq!(Option::<String>::from_value(&Value::Null), Some(None));
        assert_eq!(
            Option::<String>::from_value(&Value::Text("x".into())),
            Some(Some("x".to_string()))
        );
        assert_eq!(Option::<String>::from_value(&Value::Bool(true)), None);
        assert_eq!(None::<u32>.to_value(), Value::Null);
    }

    #[test]
    fn test_list_requires_every_item_to_convert() {
        let list = Value::List(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(Vec::<u32>::from_value(&list), Some(vec![1, 2]));

        let mixed = Value::List(vec![Value::Int(1), Value::Text("two".into())]);
        assert_eq!(Vec::<u32>::from_value(&mixed), None);
    }

    #[test]
    fn test_wide_int_round_trips_past_i64() {
        assert_eq!(7u64.to_value(), Value::Int(7));
        assert_eq!(u64::MAX.to_value(), Value::UInt(u64::MAX));
        assert_eq!(u64::from_value(&u64::MAX.to_value()), Some(u64::MAX));
        assert_eq!(i64::from_value(&Value::UInt(u64::MAX)), None);
        assert_eq!(u8::from_value(&Value::UInt(200)), Some(200));
    }

    #[test]
    fn test_float_rejects_precision_loss() {
        let exact = 1i64 << 53;
        assert_eq!(f64::from_value(&Value::Int(exact)), Some(exact as f64));
        assert_eq!(f64::from_value(&Value::Int(exact + 1)), None);
        assert_eq!(f64::from_value(&Value::UInt(u64::MAX)), None);

        assert_eq!(f32::from_value(&Value::Float(0.5)), Some(0.5));
        assert_eq!(f32::from_value(&Value::Float(0.1)), None);
        assert!(f32::from_value(&Value::Float(f64::NAN)).is_some_and(f32::is_nan));
    }

    #[test]
    fn test_deserialize_untyped_payload() {
        let payload: std::collections::BTreeMap<String, Value> = serde_json::from_str(
            r#"{ "title": "Dune", "pages": 412, "price": 9.5, "tags": ["sf"], "isbn": null, "signed": true, "serial": 18446744073709551615 }"#,
        )
        .unwrap();

        assert_eq!(payload["title"], Value::Text("Dune".into()));
        assert_eq!(payload["pages"], Value::Int(412));
        assert_eq!(payload["price"], Value::Float(9.5));
        assert_eq!(payload["tags"], Value::List(vec![Value::Text("sf".into())]));
        assert_eq!(payload["isbn"], Value::Null);
        assert_eq!(payload["signed"], Value::Bool(true));
        assert_eq!(payload["serial"], Value::UInt(u64::MAX));
    }

    #[test]
    fn test_display() {
        let value = Value::List(vec![Value::Int(1), Value::Text("a".into()), Value::Null]);
        assert_eq!(value.to_string(), r#"[1, "a", null]"#);
    }
}

//! # Validation Rules
//!
//! A [`Property`](crate::Property) validates itself by running every attached
//! [`Rule`] against its current value. Rules report a single
//! [`ValidationError`] each; the property collects all of them.

use crate::error::ValidationError;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt::Display;

/// A check applied to a property value.
pub trait Rule<T: ?Sized>: Send + Sync {
    fn check(&self, value: &T) -> Result<(), ValidationError>;
}

///
/// HasLen
///

#[allow(clippy::len_without_is_empty)]
pub trait HasLen {
    fn len(&self) -> usize;
}

impl HasLen for str {
    fn len(&self) -> usize {
        self.chars().count()
    }
}

impl HasLen for String {
    fn len(&self) -> usize {
        self.chars().count()
    }
}

impl<T> HasLen for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T> HasLen for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T, S> HasLen for HashSet<T, S> {
    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

impl<K, V, S> HasLen for HashMap<K, V, S> {
    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

impl<T> HasLen for BTreeSet<T> {
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
}

impl<K, V> HasLen for BTreeMap<K, V> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

///
/// NonEmpty
///

#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmpty;

impl<T: HasLen + ?Sized> Rule<T> for NonEmpty {
    fn check(&self, value: &T) -> Result<(), ValidationError> {
        if value.len() == 0 {
            return Err(ValidationError::Empty);
        }
        Ok(())
    }
}

///
/// MinLen
///

#[derive(Debug, Clone, Copy)]
pub struct MinLen(pub usize);

impl<T: HasLen + ?Sized> Rule<T> for MinLen {
    fn check(&self, value: &T) -> Result<(), ValidationError> {
        let len = value.len();
        if len < self.0 {
            return Err(ValidationError::TooShort { len, min: self.0 });
        }
        Ok(())
    }
}

///
/// MaxLen
///

#[derive(Debug, Clone, Copy)]
pub struct MaxLen(pub usize);

impl<T: HasLen + ?Sized> Rule<T> for MaxLen {
    fn check(&self, value: &T) -> Result<(), ValidationError> {
        let len = value.len();
        if len > self.0 {
            return Err(ValidationError::TooLong { len, max: self.0 });
        }
        Ok(())
    }
}

///
/// Bounds
/// Inclusive numeric bounds; either side may be open.
///

#[derive(Debug, Clone, Copy)]
pub struct Bounds<N> {
    min: Option<N>,
    max: Option<N>,
}

impl<N> Bounds<N> {
    pub fn at_least(min: N) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: N) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: N, max: N) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

impl<N> Rule<N> for Bounds<N>
where
    N: PartialOrd + Display + Send + Sync,
{
    fn check(&self, value: &N) -> Result<(), ValidationError> {
        // NaN (or a NaN bound) orders against nothing and fails every bound.
        let unordered = || ValidationError::NotComparable {
            value: value.to_string(),
        };

        if let Some(min) = &self.min {
            match value.partial_cmp(min).ok_or_else(unordered)? {
                Ordering::Less => {
                    return Err(ValidationError::BelowMin {
                        value: value.to_string(),
                        min: min.to_string(),
                    })
                }
                Ordering::Equal | Ordering::Greater => {}
            }
        }
        if let Some(max) = &self.max {
            match value.partial_cmp(max).ok_or_else(unordered)? {
                Ordering::Greater => {
                    return Err(ValidationError::AboveMax {
                        value: value.to_string(),
                        max: max.to_string(),
                    })
                }
                Ordering::Equal | Ordering::Less => {}
            }
        }
        Ok(())
    }
}

///
/// Optional
/// Applies the inner rule to `Some` values only.
///

#[derive(Debug, Clone, Copy)]
pub struct Optional<R>(pub R);

impl<T, R> Rule<Option<T>> for Optional<R>
where
    R: Rule<T>,
{
    fn check(&self, value: &Option<T>) -> Result<(), ValidationError> {
        match value {
            Some(inner) => self.0.check(inner),
            None => Ok(()),
        }
    }
}

///
/// Ensure
///

pub struct Ensure<F> {
    predicate: F,
    message: Cow<'static, str>,
}

/// Builds a rule from a predicate; failing values report `message`.
pub fn ensure<T, F>(predicate: F, message: impl Into<Cow<'static, str>>) -> Ensure<F>
where
    T: ?Sized,
    F: Fn(&T) -> bool + Send + Sync,
{
    Ensure {
        predicate,
        message: message.into(),
    }
}

impl<T, F> Rule<T> for Ensure<F>
where
    T: ?Sized,
    F: Fn(&T) -> bool + Send + Sync,
{
    fn check(&self, value: &T) -> Result<(), ValidationError> {
        if (self.predicate)(value) {
            Ok(())
        } else {
            Err(ValidationError::invalid(self.message.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(NonEmpty.check(""), Err(ValidationError::Empty));
        assert!(NonEmpty.check("x").is_ok());
        assert!(Rule::<Vec<u8>>::check(&NonEmpty, &vec![1]).is_ok());
    }

    #[test]
    fn test_length_counts_chars() {
        let title = String::from("héllo");
        assert!(MaxLen(5).check(&title).is_ok());
        assert_eq!(
            MinLen(6).check(&title),
            Err(ValidationError::TooShort { len: 5, min: 6 })
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let rule = Bounds::between(1u32, 10);
        assert!(rule.check(&1).is_ok());
        assert!(rule.check(&10).is_ok());
        assert_eq!(
            rule.check(&0),
            Err(ValidationError::BelowMin {
                value: "0".into(),
                min: "1".into()
            })
        );
        assert_eq!(
            rule.check(&11),
            Err(ValidationError::AboveMax {
                value: "11".into(),
                max: "10".into()
            })
        );
    }

    #[test]
    fn test_open_bounds() {
        assert!(Bounds::at_least(0.5).check(&100.0).is_ok());
        assert!(Bounds::at_most(-1i64).check(&0).is_err());
    }

    #[test]
    fn test_bounds_reject_nan() {
        let nan = ValidationError::NotComparable {
            value: "NaN".into(),
        };
        assert_eq!(Bounds::at_least(0.0).check(&f64::NAN), Err(nan.clone()));
        assert_eq!(Bounds::at_most(1.0).check(&f64::NAN), Err(nan.clone()));
        assert_eq!(Bounds::between(0.0, 1.0).check(&f64::NAN), Err(nan));
        assert!(Bounds::at_least(f64::NAN).check(&1.0).is_err());
        assert!(Bounds::at_least(0.0).check(&f64::INFINITY).is_ok());
    }

    #[test]
    fn test_optional_skips_none() {
        let rule = Optional(MinLen(3));
        assert!(rule.check(&None::<String>).is_ok());
        assert!(rule.check(&Some("abc".to_string())).is_ok());
        assert!(rule.check(&Some("ab".to_string())).is_err());
    }

    #[test]
    fn test_ensure() {
        let rule = ensure(|email: &String| email.contains('@'), "must be an email address");
        assert!(rule.check(&"a@b.c".to_string()).is_ok());
        assert_eq!(
            rule.check(&"nope".to_string()),
            Err(ValidationError::invalid("must be an email address"))
        );
    }
}

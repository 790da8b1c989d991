//! # Resource Errors
//!
//! This module defines the error types used throughout the resource framework.
//!
//! There are two families:
//! - [`ValidationError`]: a single rule failure reported by a property. These are
//!   *collected* into an [`ErrorMap`], never raised.
//! - [`ResourceError`]: failures of framework operations that return `Result`.

use serde::Serialize;
use std::collections::BTreeMap;

/// Field name -> errors reported by that field on the last validity check.
pub type ErrorMap = BTreeMap<String, Vec<ValidationError>>;

/// A single validation failure produced by a property rule.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("must not be empty")]
    Empty,

    #[error("length ({len}) is lower than minimum of {min}")]
    TooShort { len: usize, min: usize },

    #[error("length ({len}) is greater than maximum of {max}")]
    TooLong { len: usize, max: usize },

    #[error("{value} is lower than minimum of {min}")]
    BelowMin { value: String, min: String },

    #[error("{value} is greater than maximum of {max}")]
    AboveMax { value: String, max: String },

    #[error("{value} cannot be compared against its bounds")]
    NotComparable { value: String },

    #[error("{message}")]
    Invalid { message: String },
}

impl ValidationError {
    /// Builds a free-form validation error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Errors returned by framework operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResourceError {
    #[error("{resource} failed validation on {} field(s)", .errors.len())]
    Invalid {
        resource: &'static str,
        errors: ErrorMap,
    },

    #[error("field `{field}` is declared more than once on {resource}")]
    DuplicateField {
        resource: &'static str,
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValidationError::TooShort { len: 2, min: 3 };
        assert_eq!(err.to_string(), "length (2) is lower than minimum of 3");

        let err = ValidationError::invalid("must be a valid email");
        assert_eq!(err.to_string(), "must be a valid email");
    }

    #[test]
    fn test_invalid_counts_fields() {
        let mut errors = ErrorMap::new();
        errors.insert("title".into(), vec![ValidationError::Empty]);
        errors.insert(
            "pages".into(),
            vec![ValidationError::BelowMin {
                value: "0".into(),
                min: "1".into(),
            }],
        );

        let err = ResourceError::Invalid {
            resource: "Book",
            errors,
        };
        assert_eq!(err.to_string(), "Book failed validation on 2 field(s)");
    }

    #[test]
    fn test_validation_error_serializes_with_code() {
        let json = serde_json::to_value(ValidationError::TooLong { len: 9, max: 4 }).unwrap();
        assert_eq!(json["code"], "too_long");
        assert_eq!(json["len"], 9);
        assert_eq!(json["max"], 4);

        let json = serde_json::to_value(ValidationError::Empty).unwrap();
        assert_eq!(json, serde_json::json!({ "code": "empty" }));

        let json = serde_json::to_value(ValidationError::NotComparable {
            value: "NaN".into(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "code": "not_comparable", "value": "NaN" }));
    }
}

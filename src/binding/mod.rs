//! # JSON Binding
//!
//! Turns untyped JSON payloads into resources and resources back into JSON, using
//! nothing but the by-name accessor. No resource needs a serde implementation of
//! its own.
//!
//! - [`bind`]: builds a new resource from a payload and validates it.
//! - [`apply`]: writes a payload onto an existing resource (partial update, not validated).
//! - [`render`]: serializes the current property values.
//! - [`ValidationReport`]: the serializable outcome of a validity check.
//!
//! Payload keys that do not name a property, or whose values do not convert to the
//! property's type, are ignored. Relationships cannot be bound from JSON; link
//! resources in code instead.

use resource_framework::{ErrorMap, Resource, ResourceError, Value};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

/// Field name -> untyped value, as decoded from a JSON object.
pub type Payload = BTreeMap<String, Value>;

/// Errors that can occur while binding a payload.
#[derive(Debug, Error)]
pub enum BindError {
    /// The payload is not a JSON object of scalars and lists.
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The payload was applied but the resource failed validation.
    #[error(transparent)]
    Invalid(#[from] ResourceError),
}

impl BindError {
    /// Per-field errors, when the failure was a validation failure.
    pub fn errors(&self) -> Option<&ErrorMap> {
        match self {
            BindError::Invalid(ResourceError::Invalid { errors, .. }) => Some(errors),
            _ => None,
        }
    }
}

/// Decodes a JSON object into a [`Payload`].
pub fn parse(json: &str) -> Result<Payload, BindError> {
    Ok(serde_json::from_str(json)?)
}

/// Builds a default `R`, applies `json` to it and validates the result.
pub fn bind<R: Resource + Default>(json: &str) -> Result<R, BindError> {
    let mut resource = R::default();
    apply(&mut resource, json)?;
    resource.validate()?;

    info!(resource = R::NAME, "Bound");
    Ok(resource)
}

/// Writes every applicable key of `json` onto `resource`; returns how many were applied.
pub fn apply<R: Resource>(resource: &mut R, json: &str) -> Result<usize, BindError> {
    let payload = parse(json)?;
    let received = payload.len();
    let applied = resource.assign(payload);

    debug!(
        resource = R::NAME,
        applied,
        ignored = received - applied,
        "Payload applied"
    );
    Ok(applied)
}

/// Serializes the current value of every property as a JSON object.
pub fn render<R: Resource>(resource: &R) -> Result<String, BindError> {
    Ok(serde_json::to_string(&resource.values())?)
}

/// The serializable outcome of a validity check.
///
/// ```text
/// {"resource":"Book","valid":false,"errors":{"title":[{"code":"empty"}]}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub resource: &'static str,
    pub valid: bool,
    pub errors: ErrorMap,
}

impl ValidationReport {
    /// Runs a fresh validity check on `resource`.
    pub fn of<R: Resource>(resource: &R) -> Self {
        let valid = resource.is_valid();
        Self {
            resource: R::NAME,
            valid,
            errors: resource.errors(),
        }
    }

    /// The report carried by a validation failure. Other errors have no
    /// per-field outcome to report and yield `None`.
    pub fn from_error(error: &ResourceError) -> Option<Self> {
        match error {
            ResourceError::Invalid { resource, errors } => Some(Self {
                resource: *resource,
                valid: false,
                errors: errors.clone(),
            }),
            ResourceError::DuplicateField { .. } => None,
        }
    }

    pub fn to_json(&self) -> Result<String, BindError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Author, Book};
    use resource_framework::ValidationError;

    #[test]
    fn test_bind_valid_payload() {
        let book: Book =
            bind(r#"{ "title": "Dune", "isbn": "978-0-441-17271-9", "pages": 412 }"#).unwrap();
        assert_eq!(book.title.value(), "Dune");
        assert_eq!(*book.pages.value(), 412);
    }

    #[test]
    fn test_bind_reports_field_errors() {
        let err = bind::<Book>(r#"{ "title": "", "isbn": "978-0-441-17271-9" }"#).unwrap_err();
        assert_eq!(err.errors().unwrap()["title"], [ValidationError::Empty]);
        assert_eq!(err.to_string(), "Book failed validation on 1 field(s)");
    }

    #[test]
    fn test_bind_rejects_non_object() {
        let err = bind::<Author>("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, BindError::Malformed(_)));
        assert!(err.errors().is_none());
    }

    #[test]
    fn test_apply_counts_and_skips() {
        let mut author = Author::new("Frank Herbert");
        let applied = apply(
            &mut author,
            r#"{ "born": 1920, "email": null, "unknown": true, "full_name": 7 }"#,
        )
        .unwrap();

        assert_eq!(applied, 2);
        assert_eq!(*author.born.value(), Some(1920));
        assert_eq!(author.full_name.value(), "Frank Herbert");
    }

    #[test]
    fn test_render_properties_only() {
        let author = Author::new("Ursula K. Le Guin");
        let json: serde_json::Value = serde_json::from_str(&render(&author).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "born": null, "email": null, "full_name": "Ursula K. Le Guin" })
        );
    }

    #[test]
    fn test_report_serializes_codes() {
        let report = ValidationReport::of(&Book::default());
        assert!(!report.valid);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["resource"], "Book");
        assert_eq!(json["errors"]["title"][0]["code"], "empty");
        assert_eq!(json["errors"]["isbn"][0]["code"], "invalid");
    }

    #[test]
    fn test_report_only_from_validation_failures() {
        let err = bind::<Book>(r#"{ "isbn": "978-0-441-17271-9" }"#).unwrap_err();
        let BindError::Invalid(error) = &err else {
            panic!("expected a validation failure, got {err:?}");
        };
        let report = ValidationReport::from_error(error).unwrap();
        assert_eq!(report.resource, "Book");
        assert_eq!(report.errors.keys().collect::<Vec<_>>(), ["title"]);

        let duplicate = ResourceError::DuplicateField {
            resource: "Book",
            field: "title",
        };
        assert_eq!(ValidationReport::from_error(&duplicate), None);
    }
}

//! Application startup.
//!
//! - [`setup_tracing`] installs the log subscriber.
//! - [`warm_up`] builds every catalog registry before the first request needs one.

pub mod tracing;

pub use self::tracing::*;

use crate::model::{Author, Book, Shelf};
use ::tracing::info;
use resource_framework::Resource;

/// Builds the field table of every catalog resource.
///
/// Returns `(resource, field count)` per type, in declaration order.
pub fn warm_up() -> Vec<(&'static str, usize)> {
    let tables = vec![
        (Author::registry().resource(), Author::registry().len()),
        (Book::registry().resource(), Book::registry().len()),
        (Shelf::registry().resource(), Shelf::registry().len()),
    ];

    for (resource, fields) in &tables {
        info!(resource, fields, "Registry ready");
    }
    tables
}

//! Catalog resources declared with [`resource!`](resource_framework::resource!).
//!
//! - [`Author`]: a person credited on books.
//! - [`Book`]: a catalog entry linked to its authors.
//! - [`Shelf`]: a physical shelf holding books.

pub mod author;
pub mod book;
pub mod shelf;

pub use author::*;
pub use book::*;
pub use shelf::*;

//! # Resource Recipe
//!
//! > **A Recipe for Self-Describing Resources in Rust.**
//!
//! This crate demonstrates a pattern for building domain entities that validate
//! themselves and can be bound by field name, using the `resource-framework` crate.
//! A small library catalog (authors, books, shelves) is declared once and then
//! driven entirely through untyped JSON payloads.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why Self-Describing Resources?
//!
//! - **Declare once**: a single `resource!` block yields the struct, its defaults, its
//!   rules and its field table.
//! - **Generic plumbing**: binding, rendering and reporting are written against the
//!   [`Resource`](resource_framework::Resource) trait, never against a concrete entity.
//! - **Typed where it matters**: inside the domain, fields are ordinary typed values
//!   (`book.pages.value()` is a `u32`); only the binding edge is dynamic.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Collected, Not Raised
//! Validation never stops at the first failure. A pass records every invalid field
//! in the resource's error map, and [`ValidationReport`](binding::ValidationReport)
//! serializes that map with a stable `code` per failure.
//!
//! ### 2. Forgiving Binding
//! Unknown keys and values of the wrong type are ignored by the by-name accessor.
//! [`binding::apply`] reports how many keys were applied; [`binding::bind`] then
//! validates, so a bad payload surfaces as validation errors rather than a panic.
//!
//! ### 3. Relationships Are Links
//! `Book::authors` holds `Arc<Author>`. Linked resources are shared, not copied, and
//! are never validated by their owner.
//!
//! ### 4. Observability
//! The framework logs through `tracing` with a `resource` field on every event.
//! See the [`lifecycle::tracing`] module for details.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Domain ([`model`])
//! - **Role**: The catalog resources.
//! - **Key items**: [`Author`](model::Author), [`Book`](model::Book), [`Shelf`](model::Shelf).
//!
//! ### 2. The Edge ([`binding`])
//! - **Role**: JSON in, JSON out, validation reports.
//! - **Key items**: [`bind`](binding::bind), [`render`](binding::render), [`BindError`](binding::BindError).
//!
//! ### 3. The Orchestrator ([`lifecycle`])
//! - **Role**: Logging setup and eager registry construction at startup.
//! - **Key items**: [`setup_tracing`](lifecycle::setup_tracing), [`warm_up`](lifecycle::warm_up).
//!
//! ## 🚀 Quick Start
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test --workspace
//! ```

pub mod binding;
pub mod lifecycle;
pub mod model;

//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! Log levels come from the `RUST_LOG` environment variable. The compact format hides
//! the crate/module prefix (`with_target(false)`); every framework event carries a
//! `resource` field instead.
//!
//! ## What Gets Traced
//!
//! - **Startup**: one `Registry ready` line per catalog resource (`info`)
//! - **Binding**: bound resources (`info`), applied and ignored payload keys (`debug`)
//! - **Validation**: each invalid field and the verdict of every pass (`debug`)
//! - **Accessor**: writes that were ignored (`trace`)
//! - **Registry**: table construction (`debug`) and dropped duplicate fields (`warn`)
//!
//! ## Usage Examples
//!
//! ```bash
//! # Startup and binding only
//! RUST_LOG=info cargo run
//!
//! # Per-field validation results
//! RUST_LOG=debug cargo run
//!
//! # Ignored writes as well
//! RUST_LOG=trace cargo run
//!
//! # Framework internals only
//! RUST_LOG=resource_framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` the demo binds an invalid book and logs:
//!
//! ```text
//! DEBUG Payload applied resource="Book" applied=2 ignored=1
//! DEBUG Field invalid resource="Book" field="title" errors=1
//! DEBUG Validated resource="Book" valid=false invalid=1
//! ```

/// Initializes the tracing subscriber, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // resource="..." already names the source
        .compact()
        .init();
}

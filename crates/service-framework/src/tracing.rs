//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for a whole process.
//!
//! Services log with structured fields (`service_name`, ids, counts) and clients open a
//! span per call, so with `RUST_LOG=debug` a composed request reads top to bottom:
//!
//! ```text
//! DEBUG call{service="OrderService"}: Sending request
//! DEBUG Request service_name="OrderService" request=PostOrder { .. }
//! DEBUG call{service="AccountService"}: Sending request
//! DEBUG call{service="CatalogService"}: Sending request
//! INFO  Order placed order_id="…" lines=2
//! ```
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full request payloads
//! ```

/// Installs the global subscriber. Call once, from `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // service_name is already a field on every line
        .compact()
        .init();
}

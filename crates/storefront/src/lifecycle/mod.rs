//! # Lifecycle
//!
//! Starting, wiring and stopping the storefront services.
//!
//! ## Startup
//!
//! 1. [`StorefrontConfig`](crate::config::StorefrontConfig) is read from the environment.
//! 2. If a document store is configured, [`connect_with_retry`] waits for it to answer.
//!    This is the only retry in the system; requests are never retried.
//! 3. [`Storefront::start`] creates each actor, then spawns it with its context:
//!    catalog and account take `()`, the order service takes their two clients.
//!
//! ## Shutdown
//!
//! [`Storefront::shutdown`] drops the clients it holds. Each actor's loop ends once
//! every clone of its client is gone and its in-flight requests have finished. The
//! order service's context holds the last catalog and account clients, so those two
//! stop right after it.

pub mod bootstrap;
pub mod storefront;

pub use bootstrap::*;
pub use storefront::*;

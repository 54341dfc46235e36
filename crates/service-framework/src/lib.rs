//! # Service Framework
//!
//! This crate provides the building blocks for splitting an application into independently
//! hosted services that talk to each other through **typed requests and responses**. It is an
//! in-process stand-in for an RPC transport: each service runs behind a channel, callers hold
//! a typed client, and every call either returns the service's answer or a transport error.
//!
//! ## Why Actors for RPC?
//!
//! - **Isolation**: a service only sees the requests it receives and the clients it was given.
//! - **Uniformity**: every service is called the same way (`call`, `call_with_deadline`).
//! - **Testability**: a collaborator is just another `ServiceClient`, so it can be swapped for a
//!   [`mock::MockService`] without touching the code under test.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Service Layer** ([`RpcService`]) - your request handling logic
//! 2. **Runtime Layer** ([`ServiceActor`]) - accept loop, per-request tasks, cancellation
//! 3. **Interface Layer** ([`ServiceClient`], [`RemoteClient`]) - type-safe calls with deadlines
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via the `run()` method, not at construction time.
//! A service that calls two others receives their clients as its `Context`:
//!
//! ```rust
//! use async_trait::async_trait;
//! use service_framework::{RpcService, ServiceActor, ServiceClient};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("lookup failed")]
//! struct LookupError;
//!
//! struct Prices;
//!
//! #[async_trait]
//! impl RpcService for Prices {
//!     type Request = String;
//!     type Response = f64;
//!     type Error = LookupError;
//!     type Context = ();
//!     async fn handle(&self, _sku: String, _: &()) -> Result<f64, LookupError> { Ok(2.5) }
//! }
//!
//! struct Quotes;
//!
//! #[async_trait]
//! impl RpcService for Quotes {
//!     type Request = (String, u32);
//!     type Response = f64;
//!     type Error = LookupError;
//!     type Context = ServiceClient<Prices>;
//!
//!     async fn handle(&self, (sku, qty): (String, u32), prices: &ServiceClient<Prices>) -> Result<f64, LookupError> {
//!         let unit = prices.call(sku).await.map_err(|_| LookupError)?;
//!         Ok(unit * f64::from(qty))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (price_actor, price_client) = ServiceActor::<Prices>::new(10);
//!     let (quote_actor, quote_client) = ServiceActor::<Quotes>::new(10);
//!
//!     tokio::spawn(price_actor.run(Prices, ()));
//!     // Quotes gets the client it needs
//!     tokio::spawn(quote_actor.run(Quotes, price_client));
//!
//!     let total = quote_client.call(("apple".into(), 4)).await.unwrap();
//!     assert_eq!(total, 10.0);
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each service actor runs its accept loop in its own Tokio task
//! - Every request is handled in a task of its own (no head-of-line blocking)
//! - Services get `&self`, so there is no shared mutable state to lock
//! - A caller that stops waiting cancels the handler (see [`ServiceActor`])
//!
//! ## Testing
//!
//! See the [`mock`] module for `MockService` and the hand-driven helpers.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod service;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ServiceActor;
pub use client::ServiceClient;
pub use client_trait::RemoteClient;
pub use error::RpcError;
pub use message::{Envelope, Reply};
pub use service::RpcService;

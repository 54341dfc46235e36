//! # RpcService Trait
//!
//! The `RpcService` trait is the contract every service (Catalog, Account, Order, …) implements
//! to be hosted by a [`ServiceActor`](crate::ServiceActor). It names the request and response
//! types that travel over the channel, the service's own error taxonomy, and the context
//! (dependency clients) injected when the actor starts running.
//!
//! # Architecture Note
//! A service is **stateless between requests**. Whatever state it needs lives behind
//! handles it owns (a repository, a store) or in the injected `Context`. Because `handle`
//! takes `&self`, the actor can run many requests at once without any locking of its own.
//!
//! Each request type is usually an enum with one variant per remote operation, and the
//! response type an enum with one variant per result shape. The typed client wrappers
//! in the application crate hide that pairing from callers.

use async_trait::async_trait;
use std::fmt::Debug;

/// Trait that any service must implement to be hosted by a `ServiceActor`.
///
/// # Async & Context
/// This trait is `#[async_trait]` so handlers can await other services.
/// The `Context` type is handed to every call of [`RpcService::handle`]. It is supplied to
/// `ServiceActor::run()` rather than to the service constructor, which allows "Late Binding"
/// of dependencies: the Order service can be built before the clients it talks to exist.
#[async_trait]
pub trait RpcService: Send + Sync + 'static {
    /// The request message (usually one enum variant per operation).
    type Request: Send + Debug + 'static;

    /// The response message.
    type Response: Send + Debug + 'static;

    /// The classified error type for this service.
    ///
    /// Keep this a closed enum: the transport layer maps it exhaustively to a status.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The runtime context (dependencies) injected into the service.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync + 'static;

    /// Handle one request.
    ///
    /// The returned future may be dropped at any await point if the caller goes away,
    /// so a handler must not leave partial external state behind between awaits.
    async fn handle(
        &self,
        request: Self::Request,
        ctx: &Self::Context,
    ) -> Result<Self::Response, Self::Error>;

    /// Short name used in log lines (e.g. "CatalogService").
    fn name() -> &'static str {
        std::any::type_name::<Self>()
            .split('<')
            .next()
            .and_then(|path| path.rsplit("::").next())
            .unwrap_or("Unknown")
    }
}

//! # RemoteClient Trait
//!
//! Provides a common interface for service‑specific clients, adding a default `call` that
//! applies the client's deadline on top of a generic `ServiceClient`.
use crate::{RpcError, RpcService, ServiceClient};
use async_trait::async_trait;
use std::time::Duration;

/// Trait for service-specific clients to share call plumbing.
///
/// Implementors only say where their [`ServiceClient`] is and what deadline applies;
/// the typed operations (`get_product`, `post_order`, ...) are then one-liners that
/// build a request, `call` it, and unpack the matching response variant.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use service_framework::{RemoteClient, RpcError, RpcService, ServiceClient};
/// use std::time::Duration;
///
/// struct Echo;
/// #[derive(Debug, thiserror::Error)]
/// #[error("echo failed")]
/// struct EchoError;
///
/// #[async_trait]
/// impl RpcService for Echo {
///     type Request = String;
///     type Response = String;
///     type Error = EchoError;
///     type Context = ();
///     async fn handle(&self, r: String, _: &()) -> Result<String, EchoError> { Ok(r) }
/// }
///
/// struct EchoClient {
///     inner: ServiceClient<Echo>,
/// }
///
/// impl RemoteClient<Echo> for EchoClient {
///     fn inner(&self) -> &ServiceClient<Echo> {
///         &self.inner
///     }
///
///     fn deadline(&self) -> Option<Duration> {
///         Some(Duration::from_secs(1))
///     }
/// }
///
/// async fn usage(client: EchoClient) -> Result<String, RpcError<EchoError>> {
///     // call() is provided automatically and honours the deadline.
///     client.call("ping".to_string()).await
/// }
/// ```
#[async_trait]
pub trait RemoteClient<S: RpcService>: Send + Sync {
    /// Access the inner generic ServiceClient.
    fn inner(&self) -> &ServiceClient<S>;

    /// Per-call deadline; `None` waits for as long as the service takes.
    fn deadline(&self) -> Option<Duration> {
        None
    }

    /// Send a request, applying [`deadline`](Self::deadline) when one is set.
    #[tracing::instrument(skip(self), fields(service = S::name()))]
    async fn call(&self, request: S::Request) -> Result<S::Response, RpcError<S::Error>> {
        tracing::debug!("Sending request");
        match self.deadline() {
            Some(deadline) => self.inner().call_with_deadline(request, deadline).await,
            None => self.inner().call(request).await,
        }
    }
}

//! # Generic Service Server
//!
//! This module defines the `ServiceActor`, the server half of a service. It owns the
//! receiving end of the request channel and dispatches every envelope to the hosted
//! [`RpcService`].

use crate::client::ServiceClient;
use crate::message::Envelope;
use crate::service::RpcService;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// The generic actor that hosts one service.
///
/// # Architecture Note
/// This struct is the "Server" side of a typed RPC. It owns the receiver end of the
/// channel; callers hold cheap [`ServiceClient`] clones of the sender end.
///
/// **Concurrency Model**:
/// Unlike an entity actor that owns mutable state, a service is stateless between
/// requests, so each envelope is handled in its own Tokio task. Slow requests never
/// queue behind each other, and since handlers only get `&S` there is nothing to lock.
///
/// **Cancellation**:
/// Every handler races against its reply channel closing. A caller that drops the call
/// future (or whose deadline elapses) closes that channel, and the handler future is
/// dropped at its next await point. A composed operation therefore stops issuing
/// downstream calls as soon as nobody is waiting for its answer.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ServiceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(service, context)`.
/// 3.  **Run**: Spawn the run loop in a background task.
///
/// ```rust
/// use async_trait::async_trait;
/// use service_framework::{RpcService, ServiceActor};
///
/// struct Echo;
///
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
///
///     async fn handle(&self, request: String, _: &()) -> Result<String, EchoError> {
///         Ok(request)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ServiceActor::<Echo>::new(10);
///     tokio::spawn(actor.run(Echo, ()));
///
///     let reply = client.call("hello".to_string()).await.unwrap();
///     assert_eq!(reply, "hello");
/// }
/// ```
pub struct ServiceActor<S: RpcService> {
    receiver: mpsc::Receiver<Envelope<S>>,
}

impl<S: RpcService> ServiceActor<S> {
    /// Creates a new `ServiceActor` and its associated `ServiceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, callers
    /// wait in `call()` until the actor has accepted earlier requests.
    pub fn new(buffer_size: usize) -> (Self, ServiceClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver };
        (actor, ServiceClient::new(sender))
    }

    /// Runs the accept loop until every client has been dropped.
    ///
    /// # Context Injection
    /// `context` is shared by all handlers for the lifetime of the loop. Requests still
    /// in flight when the channel closes are awaited before this returns, after which
    /// the service and its context (and any clients inside it) are dropped.
    pub async fn run(mut self, service: S, context: S::Context) {
        let service_name = S::name();
        info!(service_name, "Service started");

        let shared = Arc::new((service, context));
        let mut in_flight = JoinSet::new();
        let mut handled: u64 = 0;

        loop {
            tokio::select! {
                envelope = self.receiver.recv() => match envelope {
                    Some(envelope) => {
                        handled += 1;
                        in_flight.spawn(dispatch(Arc::clone(&shared), envelope));
                    }
                    None => break,
                },
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        warn!(service_name, error = %e, "Handler task failed");
                    }
                }
            }
        }

        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                warn!(service_name, error = %e, "Handler task failed");
            }
        }

        info!(service_name, handled, "Shutdown");
    }
}

async fn dispatch<S: RpcService>(shared: Arc<(S, S::Context)>, envelope: Envelope<S>) {
    let service_name = S::name();
    let Envelope {
        request,
        mut respond_to,
    } = envelope;
    let (service, context) = &*shared;

    debug!(service_name, ?request, "Request");
    // Polled first so a request abandoned while queued never reaches the handler.
    let outcome = tokio::select! {
        biased;
        () = respond_to.closed() => None,
        result = service.handle(request, context) => Some(result),
    };

    match outcome {
        Some(result) => {
            match &result {
                Ok(_) => debug!(service_name, "Handled"),
                Err(e) => warn!(service_name, error = %e, "Request failed"),
            }
            // The caller may have given up between completion and send.
            let _ = respond_to.send(result);
        }
        None => warn!(service_name, "Caller went away, request aborted"),
    }
}

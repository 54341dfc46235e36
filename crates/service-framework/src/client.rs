//! # Generic Client
//!
//! This module defines the generic client for calling a hosted service.

use crate::error::RpcError;
use crate::message::Envelope;
use crate::service::RpcService;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// ## ServiceClient
///
/// The `ServiceClient<S>` provides a type‑safe, async API for calling a `ServiceActor<S>`. It
/// forwards requests over a Tokio mpsc channel and waits for the result on a oneshot channel.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive.
/// * **Cancellable** – dropping the future returned by `call` cancels the remote handler.
/// * **No retries** – a failed call is reported once; retry policy belongs to the caller.
pub struct ServiceClient<S: RpcService> {
    sender: mpsc::Sender<Envelope<S>>,
}

impl<S: RpcService> Clone for ServiceClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S: RpcService> ServiceClient<S> {
    pub fn new(sender: mpsc::Sender<Envelope<S>>) -> Self {
        Self { sender }
    }

    /// Sends one request and waits for its result.
    pub async fn call(&self, request: S::Request) -> Result<S::Response, RpcError<S::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(Envelope::new(request, respond_to))
            .await
            .map_err(|_| RpcError::Closed)?;
        response
            .await
            .map_err(|_| RpcError::Dropped)?
            .map_err(RpcError::Service)
    }

    /// Like [`call`](Self::call), but gives up after `deadline`.
    ///
    /// Giving up drops the pending reply channel, which aborts the handler on the server side.
    pub async fn call_with_deadline(
        &self,
        request: S::Request,
        deadline: Duration,
    ) -> Result<S::Response, RpcError<S::Error>> {
        tokio::time::timeout(deadline, self.call(request))
            .await
            .map_err(|_| RpcError::DeadlineExceeded)?
    }

    /// True once the actor has stopped accepting requests.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

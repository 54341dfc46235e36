//! # Request Envelopes
//!
//! This module defines the message that travels from a `ServiceClient` to a `ServiceActor`:
//! the typed request plus the one-shot channel the reply goes back on.

use crate::service::RpcService;
use tokio::sync::oneshot;

/// The reply half of a call. Dropping it without sending tells the caller the
/// service gave up on the request.
pub type Reply<S> =
    oneshot::Sender<Result<<S as RpcService>::Response, <S as RpcService>::Error>>;

/// One in-flight call: the request and where to send its result.
///
/// The actor watches `respond_to` while the handler runs. When the caller drops its
/// receiver (cancelled, or its deadline elapsed), the handler future is dropped too.
pub struct Envelope<S: RpcService> {
    pub request: S::Request,
    pub respond_to: Reply<S>,
}

impl<S: RpcService> Envelope<S> {
    pub fn new(request: S::Request, respond_to: Reply<S>) -> Self {
        Self {
            request,
            respond_to,
        }
    }
}

impl<S: RpcService> std::fmt::Debug for Envelope<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("service", &S::name())
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

//! # Framework Errors
//!
//! [`RpcError`] separates what went wrong *on the way* to a service (transport) from
//! what the service itself reported. Callers that only care about the service's answer
//! use [`RpcError::service_error`]; transport failures are passed along unchanged so a
//! deadline or a vanished peer is never disguised as a domain error.

/// Errors returned by a call through a `ServiceClient`.
#[derive(Debug, thiserror::Error)]
pub enum RpcError<E>
where
    E: std::error::Error + 'static,
{
    #[error("Service closed")]
    Closed,
    #[error("Service dropped response channel")]
    Dropped,
    #[error("Deadline exceeded")]
    DeadlineExceeded,
    #[error("Unexpected response for {0}")]
    Protocol(&'static str),
    #[error(transparent)]
    Service(E),
}

impl<E> RpcError<E>
where
    E: std::error::Error + 'static,
{
    /// The service's own error, if the call reached the service.
    pub fn service_error(&self) -> Option<&E> {
        match self {
            Self::Service(e) => Some(e),
            _ => None,
        }
    }

    /// True for every failure that happened outside the service handler.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::Service(_))
    }

    /// Re-type the service error, leaving transport failures untouched.
    pub fn map_service<F>(self, f: impl FnOnce(E) -> F) -> RpcError<F>
    where
        F: std::error::Error + 'static,
    {
        match self {
            Self::Closed => RpcError::Closed,
            Self::Dropped => RpcError::Dropped,
            Self::DeadlineExceeded => RpcError::DeadlineExceeded,
            Self::Protocol(op) => RpcError::Protocol(op),
            Self::Service(e) => RpcError::Service(f(e)),
        }
    }
}

//! Classification of every service error into a transport status.
//!
//! The mappings are exhaustive matches, so adding an error variant without deciding
//! its status does not compile.

use crate::account::AccountError;
use crate::catalog::CatalogError;
use crate::order::{OrderError, StoreError};
use service_framework::RpcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    NotFound,
    InvalidArgument,
    Internal,
    Unavailable,
    DeadlineExceeded,
}

impl From<&CatalogError> for Status {
    fn from(error: &CatalogError) -> Self {
        match error {
            CatalogError::NotFound(_) => Status::NotFound,
            CatalogError::InvalidId(_) | CatalogError::InvalidPrice(_) => Status::InvalidArgument,
            CatalogError::IndexingFailed(_)
            | CatalogError::FetchFailed(_)
            | CatalogError::SearchFailed(_)
            | CatalogError::Decode(_)
            | CatalogError::InvalidUrl(_) => Status::Internal,
            CatalogError::Transport(e) if e.is_timeout() => Status::DeadlineExceeded,
            CatalogError::Transport(_) => Status::Unavailable,
        }
    }
}

impl From<&AccountError> for Status {
    fn from(error: &AccountError) -> Self {
        match error {
            AccountError::NotFound(_) => Status::NotFound,
            AccountError::InvalidName(_) => Status::InvalidArgument,
        }
    }
}

impl From<&StoreError> for Status {
    fn from(error: &StoreError) -> Self {
        match error {
            StoreError::Duplicate(_) => Status::Internal,
            StoreError::Unavailable(_) => Status::Unavailable,
        }
    }
}

impl From<&OrderError> for Status {
    fn from(error: &OrderError) -> Self {
        match error {
            // A lookup that timed out is not the caller's fault.
            OrderError::AccountNotFound {
                cause: RpcError::DeadlineExceeded,
                ..
            } => Status::DeadlineExceeded,
            OrderError::AccountNotFound { .. } => Status::InvalidArgument,
            OrderError::Catalog(e) => Status::from(e),
            OrderError::OrderCreationFailed(_) | OrderError::OrderFetchFailed(_) => {
                Status::Internal
            }
        }
    }
}

/// One impl per service error; a blanket impl over `E` cannot be resolved.
macro_rules! rpc_status {
    ($($error:ty),+ $(,)?) => {$(
        impl From<&RpcError<$error>> for Status {
            fn from(error: &RpcError<$error>) -> Self {
                match error {
                    RpcError::Closed | RpcError::Dropped => Status::Unavailable,
                    RpcError::DeadlineExceeded => Status::DeadlineExceeded,
                    RpcError::Protocol(_) => Status::Internal,
                    RpcError::Service(e) => Status::from(e),
                }
            }
        }
    )+};
}

rpc_status!(CatalogError, AccountError, OrderError);

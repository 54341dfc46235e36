//! Error types for order composition.

use crate::account::AccountError;
use crate::catalog::CatalogError;
use crate::order::StoreError;
use service_framework::RpcError;
use thiserror::Error;

/// Errors that can occur while placing or listing orders.
///
/// Catalog failures keep the [`RpcError`] exactly as the catalog client returned it,
/// so a deadline or a closed service is still recognisable to the caller.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Account validation failed. `cause` says whether the account is missing or the
    /// lookup itself failed.
    #[error("Account not found: {account_id}")]
    AccountNotFound {
        account_id: String,
        #[source]
        cause: RpcError<AccountError>,
    },

    /// Product metadata could not be resolved.
    #[error(transparent)]
    Catalog(#[from] RpcError<CatalogError>),

    /// The order store rejected the new order.
    #[error("Failed to create order: {0}")]
    OrderCreationFailed(#[source] StoreError),

    /// The order store could not list orders.
    #[error("Failed to fetch orders: {0}")]
    OrderFetchFailed(#[source] StoreError),
}

//! What order composition needs from the other services.
//!
//! The typed clients implement these traits; tests substitute plain structs.

use crate::account::AccountError;
use crate::catalog::{CatalogError, ProductQuery};
use crate::model::{Account, Product};
use async_trait::async_trait;
use service_framework::RpcError;

#[async_trait]
pub trait AccountLookup: Send + Sync {
    async fn get_account(&self, id: &str) -> Result<Account, RpcError<AccountError>>;
}

#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn get_products(
        &self,
        query: ProductQuery,
    ) -> Result<Vec<Product>, RpcError<CatalogError>>;
}

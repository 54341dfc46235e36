//! The persistence contract for product documents.

use crate::catalog::CatalogError;
use crate::model::Product;
use async_trait::async_trait;

/// Domain-level access to the product document store.
///
/// Implementations translate [`Product`] values to and from store documents and
/// report failures only through [`CatalogError`], so nothing above this trait ever
/// inspects a store-specific error.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Writes the full document for `product.id`. The write is visible to the next read.
    async fn put(&self, product: &Product) -> Result<(), CatalogError>;

    /// Point lookup; `CatalogError::NotFound` when absent.
    async fn get_by_id(&self, id: &str) -> Result<Product, CatalogError>;

    /// The subset of `ids` that exist, in store order.
    ///
    /// Callers must not rely on an empty `ids` meaning "everything": it yields nothing.
    async fn list_by_ids(&self, ids: &[String]) -> Result<Vec<Product>, CatalogError>;

    /// Unfiltered scan; at most `take` products after skipping `skip`.
    async fn list_page(&self, skip: u64, take: u64) -> Result<Vec<Product>, CatalogError>;

    /// Full-text match of `query` against name and description.
    async fn search(&self, query: &str, skip: u64, take: u64)
        -> Result<Vec<Product>, CatalogError>;
}

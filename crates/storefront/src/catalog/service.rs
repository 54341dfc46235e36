//! `RpcService` implementation for the catalog.
//!
//! The service is a thin dispatcher: it validates what the repository cannot
//! (ids, prices, id assignment) and turns a [`ProductQuery`] into exactly one
//! repository call.

use crate::catalog::{CatalogError, ProductQuery, ProductRepository};
use crate::model::{Product, ProductCreate};
use async_trait::async_trait;
use service_framework::RpcService;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogRequest {
    /// Create a product under a fresh id.
    PostProduct(ProductCreate),
    /// Write the full document for an existing or caller-chosen id.
    PutProduct(Product),
    GetProduct { id: String },
    GetProducts(ProductQuery),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogResponse {
    Product(Product),
    Products(Vec<Product>),
}

pub struct CatalogService {
    repository: Arc<dyn ProductRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    async fn write(&self, product: Product) -> Result<Product, CatalogError> {
        if product.id.trim().is_empty() {
            return Err(CatalogError::InvalidId(product.id));
        }
        if !product.price.is_finite() || product.price < 0.0 {
            return Err(CatalogError::InvalidPrice(product.price));
        }
        self.repository.put(&product).await?;
        info!(product_id = %product.id, "Product stored");
        Ok(product)
    }

    async fn query(&self, query: ProductQuery) -> Result<Vec<Product>, CatalogError> {
        debug!(kind = query.kind(), "Resolving products");
        match query {
            ProductQuery::BySearch { query, skip, take } => {
                self.repository.search(&query, skip, take).await
            }
            ProductQuery::ByIds { ids } => self.repository.list_by_ids(&ids).await,
            ProductQuery::Page { skip, take } => self.repository.list_page(skip, take).await,
        }
    }
}

#[async_trait]
impl RpcService for CatalogService {
    type Request = CatalogRequest;
    type Response = CatalogResponse;
    type Error = CatalogError;
    type Context = ();

    async fn handle(
        &self,
        request: CatalogRequest,
        _ctx: &(),
    ) -> Result<CatalogResponse, CatalogError> {
        match request {
            CatalogRequest::PostProduct(params) => {
                let product = Product::new(
                    Uuid::new_v4().to_string(),
                    params.name,
                    params.description,
                    params.price,
                );
                self.write(product).await.map(CatalogResponse::Product)
            }
            CatalogRequest::PutProduct(product) => {
                self.write(product).await.map(CatalogResponse::Product)
            }
            CatalogRequest::GetProduct { id } => self
                .repository
                .get_by_id(&id)
                .await
                .map(CatalogResponse::Product),
            CatalogRequest::GetProducts(query) => {
                self.query(query).await.map(CatalogResponse::Products)
            }
        }
    }
}

//! # Catalog Client
//!
//! Provides a high‑level API for calling the catalog service.
//! It wraps a `ServiceClient<CatalogService>` and unpacks the response variants.
use crate::catalog::{CatalogError, CatalogRequest, CatalogResponse, CatalogService, ProductQuery};
use crate::model::{Product, ProductCreate};
use crate::order::CatalogLookup;
use async_trait::async_trait;
use service_framework::{RemoteClient, RpcError, ServiceClient};
use std::time::Duration;
use tracing::instrument;

/// Client for the catalog service.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ServiceClient<CatalogService>,
    deadline: Option<Duration>,
}

impl CatalogClient {
    pub fn new(inner: ServiceClient<CatalogService>) -> Self {
        Self {
            inner,
            deadline: None,
        }
    }

    /// Gives up on every call after `deadline`.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[instrument(skip(self))]
    pub async fn post_product(
        &self,
        params: ProductCreate,
    ) -> Result<Product, RpcError<CatalogError>> {
        match self.call(CatalogRequest::PostProduct(params)).await? {
            CatalogResponse::Product(product) => Ok(product),
            CatalogResponse::Products(_) => Err(RpcError::Protocol("PostProduct")),
        }
    }

    /// Replaces the whole document stored under `product.id`.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn put_product(&self, product: Product) -> Result<Product, RpcError<CatalogError>> {
        match self.call(CatalogRequest::PutProduct(product)).await? {
            CatalogResponse::Product(product) => Ok(product),
            CatalogResponse::Products(_) => Err(RpcError::Protocol("PutProduct")),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> Result<Product, RpcError<CatalogError>> {
        let request = CatalogRequest::GetProduct { id: id.to_string() };
        match self.call(request).await? {
            CatalogResponse::Product(product) => Ok(product),
            CatalogResponse::Products(_) => Err(RpcError::Protocol("GetProduct")),
        }
    }

    #[instrument(skip(self), fields(kind = query.kind()))]
    pub async fn get_products(
        &self,
        query: ProductQuery,
    ) -> Result<Vec<Product>, RpcError<CatalogError>> {
        match self.call(CatalogRequest::GetProducts(query)).await? {
            CatalogResponse::Products(products) => Ok(products),
            CatalogResponse::Product(_) => Err(RpcError::Protocol("GetProducts")),
        }
    }
}

impl RemoteClient<CatalogService> for CatalogClient {
    fn inner(&self) -> &ServiceClient<CatalogService> {
        &self.inner
    }

    fn deadline(&self) -> Option<Duration> {
        self.deadline
    }
}

#[async_trait]
impl CatalogLookup for CatalogClient {
    async fn get_products(
        &self,
        query: ProductQuery,
    ) -> Result<Vec<Product>, RpcError<CatalogError>> {
        CatalogClient::get_products(self, query).await
    }
}

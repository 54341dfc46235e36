//! # Catalog Service
//!
//! Owns product documents. Everything above the [`ProductRepository`] trait only sees
//! [`Product`](crate::model::Product) values and the closed [`CatalogError`] taxonomy.
//!
//! ## Structure
//!
//! - [`repository`] - the persistence contract
//! - [`elastic`] - [`ElasticRepository`] over an Elasticsearch-compatible REST API
//! - [`memory`] - [`InMemoryProductRepository`] for tests and local runs
//! - [`query`] - [`ProductQuery`], the three-way `GetProducts` dispatch
//! - [`service`] - [`CatalogService`], hosted by a `ServiceActor`
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use storefront::catalog::{self, InMemoryProductRepository, ProductQuery};
//! use storefront::clients::CatalogClient;
//! use storefront::model::ProductCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = catalog::new(32);
//!     tokio::spawn(actor.run(catalog::CatalogService::new(Arc::new(InMemoryProductRepository::new())), ()));
//!     let client = CatalogClient::new(client);
//!
//!     let mug = client
//!         .post_product(ProductCreate {
//!             name: "Mug".to_string(),
//!             description: "Blue ceramic mug".to_string(),
//!             price: 9.5,
//!         })
//!         .await?;
//!     let found = client.get_products(ProductQuery::from_parts(Vec::new(), "mug", 0, 10)).await?;
//!     assert_eq!(found, vec![mug]);
//!     Ok(())
//! }
//! ```

pub mod elastic;
pub mod error;
pub mod memory;
pub mod query;
pub mod repository;
pub mod service;

pub use elastic::ElasticRepository;
pub use error::*;
pub use memory::InMemoryProductRepository;
pub use query::ProductQuery;
pub use repository::ProductRepository;
pub use service::*;

use service_framework::{ServiceActor, ServiceClient};

/// Creates a new catalog actor and its client.
pub fn new(buffer: usize) -> (ServiceActor<CatalogService>, ServiceClient<CatalogService>) {
    ServiceActor::new(buffer)
}

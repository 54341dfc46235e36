//! # Order Service
//!
//! Places orders and lists them back with live catalog metadata. The service owns
//! its [`OrderStore`]; the account and catalog services are reached through the
//! clients injected as its `Context`.
//!
//! - [`composer`] - [`OrderComposer`], the create and read paths
//! - [`lookup`] - [`AccountLookup`] / [`CatalogLookup`], what the composer needs from other services
//! - [`store`] - [`OrderStore`] and [`InMemoryOrderStore`]
//! - [`service`] - [`OrderService`] and its request/response enums
//! - [`error`] - [`OrderError`]

pub mod composer;
pub mod error;
pub mod lookup;
pub mod service;
pub mod store;

pub use composer::OrderComposer;
pub use error::*;
pub use lookup::{AccountLookup, CatalogLookup};
pub use service::*;
pub use store::{InMemoryOrderStore, OrderStore, StoreError};

use service_framework::{ServiceActor, ServiceClient};

/// Creates a new order actor and its client.
pub fn new(buffer: usize) -> (ServiceActor<OrderService>, ServiceClient<OrderService>) {
    ServiceActor::new(buffer)
}

//! Typed clients for the storefront services.
//!
//! Each wraps a `ServiceClient`, carries an optional per-call deadline, and turns the
//! service's response enum back into the one type the operation returns.

pub mod account_client;
pub mod catalog_client;
pub mod order_client;

pub use account_client::AccountClient;
pub use catalog_client::CatalogClient;
pub use order_client::OrderClient;

//! # Account Service
//!
//! Registers customer accounts. Order composition only asks it whether an account
//! exists, through [`AccountLookup`](crate::order::AccountLookup).
//!
//! - [`registry`] - [`AccountRegistry`], the in-memory account table
//! - [`service`] - [`AccountService`] and its request/response enums
//! - [`error`] - [`AccountError`]

pub mod error;
pub mod registry;
pub mod service;

pub use error::*;
pub use registry::AccountRegistry;
pub use service::*;

use service_framework::{ServiceActor, ServiceClient};

/// Creates a new account actor and its client.
pub fn new(buffer: usize) -> (ServiceActor<AccountService>, ServiceClient<AccountService>) {
    ServiceActor::new(buffer)
}

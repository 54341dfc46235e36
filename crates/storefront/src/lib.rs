//! # Storefront
//!
//! The back end of a small shop, split into three services hosted on
//! [`service_framework`]:
//!
//! - [`catalog`] owns product documents (Elasticsearch or in memory).
//! - [`account`] registers customer accounts.
//! - [`order`] places orders and lists them back, joining stored line items with the
//!   catalog's current product data.
//!
//! The typed [`clients`] are the only way services talk to each other, and
//! [`lifecycle::Storefront`] wires the three together.

pub mod account;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order;
pub mod status;

//! Builds new orders and reconstitutes stored ones against the live catalog.
//!
//! # Create
//! 1. The account must exist; any lookup failure ends the request as `AccountNotFound`.
//! 2. Requested lines are merged per product and zero quantities dropped.
//! 3. One by-id catalog fetch resolves exactly the remaining product ids.
//!    Ids the catalog does not know are left out of the order.
//! 4. The total is computed once and the order persisted.
//!
//! # Read
//! One store read, then one catalog fetch for the union of referenced ids, then an
//! in-memory join. A line whose product is gone keeps its stored metadata.

use crate::catalog::ProductQuery;
use crate::model::{Order, OrderLine, OrderedProduct, Product};
use crate::order::{AccountLookup, CatalogLookup, OrderError, OrderStore};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct OrderComposer {
    store: Arc<dyn OrderStore>,
}

/// Merges duplicate product ids by summing their quantities and drops lines that end
/// up at zero. Ids keep the position of their first request.
///
/// A merged quantity is capped at `u32::MAX`, the largest a single line can carry.
pub fn resolve_lines(lines: &[OrderLine]) -> Vec<(String, u32)> {
    let mut merged: Vec<(String, u32)> = Vec::new();
    for line in lines {
        match merged.iter_mut().find(|(id, _)| *id == line.product_id) {
            Some((_, quantity)) => *quantity = quantity.saturating_add(line.quantity),
            None => merged.push((line.product_id.clone(), line.quantity)),
        }
    }
    merged.retain(|(_, quantity)| *quantity > 0);
    merged
}

fn index_by_id(products: &[Product]) -> HashMap<&str, &Product> {
    products.iter().map(|p| (p.id.as_str(), p)).collect()
}

fn referenced_ids(orders: &[Order]) -> Vec<String> {
    let mut seen = HashSet::new();
    orders
        .iter()
        .flat_map(Order::product_ids)
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

impl OrderComposer {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    pub async fn place<A, C>(
        &self,
        accounts: &A,
        catalog: &C,
        account_id: &str,
        lines: &[OrderLine],
    ) -> Result<Order, OrderError>
    where
        A: AccountLookup + ?Sized,
        C: CatalogLookup + ?Sized,
    {
        let account = accounts.get_account(account_id).await.map_err(|cause| {
            warn!(account_id, error = %cause, "Account validation failed");
            OrderError::AccountNotFound {
                account_id: account_id.to_string(),
                cause,
            }
        })?;

        let wanted = resolve_lines(lines);
        let products = if wanted.is_empty() {
            Vec::new()
        } else {
            catalog
                .get_products(ProductQuery::by_ids(wanted.iter().map(|(id, _)| id.as_str())))
                .await?
        };

        let by_id = index_by_id(&products);
        let items: Vec<OrderedProduct> = wanted
            .into_iter()
            .filter_map(|(id, quantity)| {
                let product = by_id.get(id.as_str());
                if product.is_none() {
                    debug!(product_id = %id, "Product not in catalog, dropping line");
                }
                product.map(|p| OrderedProduct::new((*p).clone(), quantity))
            })
            .collect();

        let order = Order::place(account.id, items);
        self.store
            .put(&order)
            .await
            .map_err(OrderError::OrderCreationFailed)?;

        info!(
            order_id = %order.id,
            lines = order.products.len(),
            total = order.total_price,
            "Order placed"
        );
        Ok(order)
    }

    pub async fn list_for_account<C>(
        &self,
        catalog: &C,
        account_id: &str,
    ) -> Result<Vec<Order>, OrderError>
    where
        C: CatalogLookup + ?Sized,
    {
        let mut orders = self
            .store
            .list_for_account(account_id)
            .await
            .map_err(OrderError::OrderFetchFailed)?;

        let ids = referenced_ids(&orders);
        if ids.is_empty() {
            return Ok(orders);
        }

        let current = catalog.get_products(ProductQuery::ByIds { ids }).await?;
        let by_id = index_by_id(&current);
        for line in orders.iter_mut().flat_map(|o| o.products.iter_mut()) {
            if let Some(product) = by_id.get(line.id.as_str()) {
                line.overlay(product);
            }
        }

        debug!(account_id, orders = orders.len(), "Orders reconstituted");
        Ok(orders)
    }
}

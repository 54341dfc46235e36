//! Persistence for order records.

use crate::model::Order;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Order already exists: {0}")]
    Duplicate(String),

    #[error("Order store unavailable: {0}")]
    Unavailable(String),
}

/// Order records keyed by id and queryable by account.
///
/// Stored line items keep the metadata captured at creation; overlaying the
/// current catalog values is the composer's job, never the store's.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn put(&self, order: &Order) -> Result<(), StoreError>;

    /// Every order of `account_id`, oldest first.
    async fn list_for_account(&self, account_id: &str) -> Result<Vec<Order>, StoreError>;
}

#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    by_account: Arc<RwLock<HashMap<String, Vec<Order>>>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.by_account.read().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn put(&self, order: &Order) -> Result<(), StoreError> {
        let mut by_account = self.by_account.write().await;
        if by_account
            .values()
            .flatten()
            .any(|existing| existing.id == order.id)
        {
            return Err(StoreError::Duplicate(order.id.clone()));
        }
        by_account
            .entry(order.account_id.clone())
            .or_default()
            .push(order.clone());
        Ok(())
    }

    async fn list_for_account(&self, account_id: &str) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .by_account
            .read()
            .await
            .get(account_id)
            .cloned()
            .unwrap_or_default())
    }
}

//! In-memory product repository for tests, demos and local runs without a document store.

use crate::catalog::{CatalogError, ProductRepository};
use crate::model::Product;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Products kept in insertion order; a `put` on an existing id replaces it in place.
///
/// # Search
/// The query is split into lowercase terms on anything that is not alphanumeric.
/// A product matches when at least one term occurs in its name or description
/// (case-insensitive substring). Results are ordered by how many terms matched,
/// most first, then by insertion order.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<IndexMap<String, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

fn terms(query: &str) -> Vec<String> {
    query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn matched_terms(product: &Product, terms: &[String]) -> usize {
    let name = product.name.to_lowercase();
    let description = product.description.to_lowercase();
    terms
        .iter()
        .filter(|term| name.contains(term.as_str()) || description.contains(term.as_str()))
        .count()
}

fn window<T>(items: impl Iterator<Item = T>, skip: u64, take: u64) -> Vec<T> {
    let skip = usize::try_from(skip).unwrap_or(usize::MAX);
    let take = usize::try_from(take).unwrap_or(usize::MAX);
    items.skip(skip).take(take).collect()
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn put(&self, product: &Product) -> Result<(), CatalogError> {
        self.products
            .write()
            .await
            .insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Product, CatalogError> {
        self.products
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    async fn list_by_ids(&self, ids: &[String]) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn list_page(&self, skip: u64, take: u64) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.read().await;
        Ok(window(products.values().cloned(), skip, take))
    }

    async fn search(
        &self,
        query: &str,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Product>, CatalogError> {
        let terms = terms(query);
        let products = self.products.read().await;

        let mut scored: Vec<(usize, &Product)> = products
            .values()
            .map(|p| (matched_terms(p, &terms), p))
            .filter(|(score, _)| *score > 0)
            .collect();
        // Stable sort keeps insertion order among equal scores.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(window(scored.into_iter().map(|(_, p)| p.clone()), skip, take))
    }
}

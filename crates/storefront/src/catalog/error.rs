//! Error types for the catalog.

use thiserror::Error;

/// Errors that can occur during catalog operations.
///
/// The document-store failures (`IndexingFailed`, `FetchFailed`, `SearchFailed`) carry
/// the HTTP status the store answered with. Network failures are kept as the original
/// `reqwest::Error` so timeouts and refused connections stay recognisable.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product document exists for this id.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The store rejected a write.
    #[error("Failed to index product document (status {0})")]
    IndexingFailed(u16),

    /// The store failed a point or multi-id read, or a page scan.
    #[error("Failed to fetch product document(s) (status {0})")]
    FetchFailed(u16),

    /// The store failed a full-text search.
    #[error("Failed to search product documents (status {0})")]
    SearchFailed(u16),

    /// The product id was empty or only whitespace.
    #[error("Invalid product id: {0:?}")]
    InvalidId(String),

    /// The price was negative or not a number.
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    /// The document store URL could not be used.
    #[error("Invalid document store URL: {0}")]
    InvalidUrl(String),

    /// The store answered with a body we could not read.
    #[error("Malformed document store response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The store could not be reached.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

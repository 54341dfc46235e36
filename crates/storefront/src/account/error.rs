//! Error types for the account service.

use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    /// The requested account was not found.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// The account name was empty or whitespace.
    #[error("Invalid account name: {0:?}")]
    InvalidName(String),
}

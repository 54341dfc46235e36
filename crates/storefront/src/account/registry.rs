use crate::account::AccountError;
use crate::model::Account;
use indexmap::IndexMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory account table, kept in creation order.
#[derive(Clone, Default)]
pub struct AccountRegistry {
    accounts: Arc<RwLock<IndexMap<String, Account>>>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new account under a fresh id.
    pub async fn register(&self, name: &str) -> Result<Account, AccountError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AccountError::InvalidName(name.to_string()));
        }
        let account = Account::new(Uuid::new_v4().to_string(), name);
        self.accounts
            .write()
            .await
            .insert(account.id.clone(), account.clone());
        Ok(account)
    }

    pub async fn get(&self, id: &str) -> Result<Account, AccountError> {
        self.accounts
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }

    /// At most `take` accounts after skipping `skip`, oldest first.
    pub async fn list(&self, skip: u64, take: u64) -> Vec<Account> {
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let take = usize::try_from(take).unwrap_or(usize::MAX);
        self.accounts
            .read()
            .await
            .values()
            .skip(skip)
            .take(take)
            .cloned()
            .collect()
    }
}

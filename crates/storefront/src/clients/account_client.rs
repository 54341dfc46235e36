//! # Account Client
//!
//! Provides a high‑level API for calling the account service.
use crate::account::{AccountError, AccountRequest, AccountResponse, AccountService};
use crate::model::Account;
use crate::order::AccountLookup;
use async_trait::async_trait;
use service_framework::{RemoteClient, RpcError, ServiceClient};
use std::time::Duration;
use tracing::instrument;

/// Client for the account service.
#[derive(Clone)]
pub struct AccountClient {
    inner: ServiceClient<AccountService>,
    deadline: Option<Duration>,
}

impl AccountClient {
    pub fn new(inner: ServiceClient<AccountService>) -> Self {
        Self {
            inner,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[instrument(skip(self))]
    pub async fn post_account(&self, name: &str) -> Result<Account, RpcError<AccountError>> {
        let request = AccountRequest::PostAccount {
            name: name.to_string(),
        };
        match self.call(request).await? {
            AccountResponse::Account(account) => Ok(account),
            AccountResponse::Accounts(_) => Err(RpcError::Protocol("PostAccount")),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_account(&self, id: &str) -> Result<Account, RpcError<AccountError>> {
        let request = AccountRequest::GetAccount { id: id.to_string() };
        match self.call(request).await? {
            AccountResponse::Account(account) => Ok(account),
            AccountResponse::Accounts(_) => Err(RpcError::Protocol("GetAccount")),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_accounts(
        &self,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Account>, RpcError<AccountError>> {
        match self.call(AccountRequest::GetAccounts { skip, take }).await? {
            AccountResponse::Accounts(accounts) => Ok(accounts),
            AccountResponse::Account(_) => Err(RpcError::Protocol("GetAccounts")),
        }
    }
}

impl RemoteClient<AccountService> for AccountClient {
    fn inner(&self) -> &ServiceClient<AccountService> {
        &self.inner
    }

    fn deadline(&self) -> Option<Duration> {
        self.deadline
    }
}

#[async_trait]
impl AccountLookup for AccountClient {
    async fn get_account(&self, id: &str) -> Result<Account, RpcError<AccountError>> {
        AccountClient::get_account(self, id).await
    }
}

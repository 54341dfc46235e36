//! `RpcService` implementation for accounts.

use crate::account::{AccountError, AccountRegistry};
use crate::model::Account;
use async_trait::async_trait;
use service_framework::RpcService;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub enum AccountRequest {
    PostAccount { name: String },
    GetAccount { id: String },
    GetAccounts { skip: u64, take: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccountResponse {
    Account(Account),
    Accounts(Vec<Account>),
}

pub struct AccountService {
    registry: AccountRegistry,
}

impl AccountService {
    pub fn new(registry: AccountRegistry) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl RpcService for AccountService {
    type Request = AccountRequest;
    type Response = AccountResponse;
    type Error = AccountError;
    type Context = ();

    async fn handle(
        &self,
        request: AccountRequest,
        _ctx: &(),
    ) -> Result<AccountResponse, AccountError> {
        match request {
            AccountRequest::PostAccount { name } => {
                let account = self.registry.register(&name).await?;
                info!(account_id = %account.id, "Account registered");
                Ok(AccountResponse::Account(account))
            }
            AccountRequest::GetAccount { id } => {
                self.registry.get(&id).await.map(AccountResponse::Account)
            }
            AccountRequest::GetAccounts { skip, take } => Ok(AccountResponse::Accounts(
                self.registry.list(skip, take).await,
            )),
        }
    }
}

//! `RpcService` implementation for orders.

use crate::clients::{AccountClient, CatalogClient};
use crate::model::{Order, OrderLine};
use crate::order::{OrderComposer, OrderError, OrderStore};
use async_trait::async_trait;
use service_framework::RpcService;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum OrderRequest {
    PostOrder {
        account_id: String,
        lines: Vec<OrderLine>,
    },
    GetOrdersForAccount {
        account_id: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderResponse {
    Order(Order),
    Orders(Vec<Order>),
}

pub struct OrderService {
    composer: OrderComposer,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self {
            composer: OrderComposer::new(store),
        }
    }
}

#[async_trait]
impl RpcService for OrderService {
    type Request = OrderRequest;
    type Response = OrderResponse;
    type Error = OrderError;
    /// The account and catalog clients, injected when the actor starts.
    type Context = (AccountClient, CatalogClient);

    async fn handle(
        &self,
        request: OrderRequest,
        ctx: &(AccountClient, CatalogClient),
    ) -> Result<OrderResponse, OrderError> {
        let (accounts, catalog) = ctx;
        match request {
            OrderRequest::PostOrder { account_id, lines } => self
                .composer
                .place(accounts, catalog, &account_id, &lines)
                .await
                .map(OrderResponse::Order),
            OrderRequest::GetOrdersForAccount { account_id } => self
                .composer
                .list_for_account(catalog, &account_id)
                .await
                .map(OrderResponse::Orders),
        }
    }
}

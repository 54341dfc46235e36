//! # Order Client
//!
//! Provides a high‑level API for calling the order service.
use crate::model::{Order, OrderLine};
use crate::order::{OrderError, OrderRequest, OrderResponse, OrderService};
use service_framework::{RemoteClient, RpcError, ServiceClient};
use std::time::Duration;
use tracing::instrument;

/// Client for the order service.
///
/// Account validation and product resolution happen inside the order service;
/// this client only ships the request.
#[derive(Clone)]
pub struct OrderClient {
    inner: ServiceClient<OrderService>,
    deadline: Option<Duration>,
}

impl OrderClient {
    pub fn new(inner: ServiceClient<OrderService>) -> Self {
        Self {
            inner,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn post_order(
        &self,
        account_id: &str,
        lines: Vec<OrderLine>,
    ) -> Result<Order, RpcError<OrderError>> {
        let request = OrderRequest::PostOrder {
            account_id: account_id.to_string(),
            lines,
        };
        match self.call(request).await? {
            OrderResponse::Order(order) => Ok(order),
            OrderResponse::Orders(_) => Err(RpcError::Protocol("PostOrder")),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_orders_for_account(
        &self,
        account_id: &str,
    ) -> Result<Vec<Order>, RpcError<OrderError>> {
        let request = OrderRequest::GetOrdersForAccount {
            account_id: account_id.to_string(),
        };
        match self.call(request).await? {
            OrderResponse::Orders(orders) => Ok(orders),
            OrderResponse::Order(_) => Err(RpcError::Protocol("GetOrdersForAccount")),
        }
    }
}

impl RemoteClient<OrderService> for OrderClient {
    fn inner(&self) -> &ServiceClient<OrderService> {
        &self.inner
    }

    fn deadline(&self) -> Option<Duration> {
        self.deadline
    }
}

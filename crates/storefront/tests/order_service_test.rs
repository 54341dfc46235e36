use service_framework::mock::MockService;
use service_framework::RpcError;
use std::sync::Arc;
use std::time::Duration;
use storefront::account::{AccountError, AccountRequest, AccountResponse, AccountService};
use storefront::catalog::{CatalogRequest, CatalogResponse, CatalogService, ProductQuery};
use storefront::clients::{AccountClient, CatalogClient, OrderClient};
use storefront::model::{Account, Order, OrderLine, OrderedProduct, Product};
use storefront::order::{self, InMemoryOrderStore, OrderError, OrderService, OrderStore};

/// Real order service, mocked account and catalog services.
struct Harness {
    accounts: MockService<AccountService>,
    catalog: MockService<CatalogService>,
    store: Arc<InMemoryOrderStore>,
}

impl Harness {
    fn new() -> Self {
        Self {
            accounts: MockService::new(),
            catalog: MockService::new(),
            store: Arc::new(InMemoryOrderStore::new()),
        }
    }

    fn start(&self) -> (OrderClient, tokio::task::JoinHandle<()>) {
        let (actor, client) = order::new(16);
        let context = (
            AccountClient::new(self.accounts.client()),
            CatalogClient::new(self.catalog.client()),
        );
        let handle = tokio::spawn(actor.run(OrderService::new(self.store.clone()), context));
        (OrderClient::new(client), handle)
    }

    fn account_exists(&mut self, id: &'static str) {
        self.accounts
            .expect_call()
            .with(move |r| matches!(r, AccountRequest::GetAccount { id: got } if got == id))
            .return_ok(AccountResponse::Account(Account::new(id, "Alice")));
    }
}

fn mug(price: f64) -> Product {
    Product::new("p1", "Mug", "Blue mug", price)
}

fn tea() -> Product {
    Product::new("p2", "Tea", "Loose leaf", 5.5)
}

#[tokio::test]
async fn test_post_order_resolves_exactly_the_requested_ids() {
    let mut harness = Harness::new();
    harness.account_exists("a1");
    harness
        .catalog
        .expect_call()
        .with(|r| {
            *r == CatalogRequest::GetProducts(ProductQuery::ByIds {
                ids: vec!["p1".into(), "p2".into()],
            })
        })
        .return_ok(CatalogResponse::Products(vec![tea(), mug(10.0)]));
    let (client, handle) = harness.start();

    let order = client
        .post_order(
            "a1",
            vec![
                OrderLine::new("p1", 2),
                OrderLine::new("p3", 0),
                OrderLine::new("p2", 1),
            ],
        )
        .await
        .unwrap();

    assert_eq!(order.account_id, "a1");
    assert_eq!(
        order.products,
        vec![OrderedProduct::new(mug(10.0), 2), OrderedProduct::new(tea(), 1)]
    );
    assert_eq!(order.total_price, 25.5);
    assert_eq!(harness.store.list_for_account("a1").await.unwrap(), vec![order]);

    harness.accounts.verify();
    harness.catalog.verify();

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_unknown_account_stops_before_the_catalog() {
    let mut harness = Harness::new();
    harness
        .accounts
        .expect_call()
        .return_err(AccountError::NotFound("ghost".into()));
    let (client, handle) = harness.start();

    let err = client
        .post_order("ghost", vec![OrderLine::new("p1", 1)])
        .await
        .unwrap_err();

    match err {
        RpcError::Service(OrderError::AccountNotFound { account_id, cause }) => {
            assert_eq!(account_id, "ghost");
            assert!(matches!(cause, RpcError::Service(AccountError::NotFound(_))));
        }
        other => panic!("expected AccountNotFound, got {other:?}"),
    }
    assert_eq!(harness.catalog.received(), 0);
    assert_eq!(harness.store.count().await, 0);
    harness.accounts.verify();

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_account_lookup_transport_failure_is_account_not_found() {
    let mut harness = Harness::new();
    harness.accounts.expect_call().drop_reply();
    let (client, handle) = harness.start();

    let err = client.post_order("a1", Vec::new()).await.unwrap_err();
    assert!(matches!(
        err,
        RpcError::Service(OrderError::AccountNotFound {
            cause: RpcError::Dropped,
            ..
        })
    ));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_caller_deadline_cancels_downstream_calls() {
    let mut harness = Harness::new();
    harness.account_exists("a1");
    harness.catalog.expect_call().hang();
    let (client, handle) = harness.start();
    let client = client.with_deadline(Duration::from_millis(50));

    let err = client
        .post_order("a1", vec![OrderLine::new("p1", 1)])
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::DeadlineExceeded));

    // The aborted handler drops its pending catalog call.
    for _ in 0..100 {
        if harness.catalog.abandoned() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(harness.catalog.abandoned(), 1);
    assert_eq!(harness.store.count().await, 0);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_order_abandoned_before_the_service_starts_is_never_looked_up() {
    let harness = Harness::new();
    let (actor, client) = order::new(64);
    let client = OrderClient::new(client).with_deadline(Duration::from_millis(5));

    for _ in 0..20 {
        let err = client
            .post_order("a1", vec![OrderLine::new("p1", 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::DeadlineExceeded));
    }

    let context = (
        AccountClient::new(harness.accounts.client()),
        CatalogClient::new(harness.catalog.client()),
    );
    let handle = tokio::spawn(actor.run(OrderService::new(harness.store.clone()), context));
    drop(client);
    handle.await.unwrap();

    assert_eq!(harness.accounts.received(), 0);
    assert_eq!(harness.catalog.received(), 0);
    assert_eq!(harness.store.count().await, 0);
}

#[tokio::test]
async fn test_listing_overlays_catalog_with_one_bulk_fetch() {
    let mut harness = Harness::new();
    let first = Order::place("a1", vec![OrderedProduct::new(mug(10.0), 2)]);
    let second = Order::place(
        "a1",
        vec![
            OrderedProduct::new(tea(), 4),
            OrderedProduct::new(mug(10.0), 1),
        ],
    );
    harness.store.put(&first).await.unwrap();
    harness.store.put(&second).await.unwrap();

    harness
        .catalog
        .expect_call()
        .with(|r| {
            *r == CatalogRequest::GetProducts(ProductQuery::ByIds {
                ids: vec!["p1".into(), "p2".into()],
            })
        })
        .return_ok(CatalogResponse::Products(vec![mug(20.0)]));
    let (client, handle) = harness.start();

    let orders = client.get_orders_for_account("a1").await.unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].products, vec![OrderedProduct::new(mug(20.0), 2)]);
    assert_eq!(orders[0].total_price, 20.0);
    // p2 is gone from the catalog, so its stored metadata stays.
    assert_eq!(orders[1].products[0], OrderedProduct::new(tea(), 4));
    assert_eq!(orders[1].products[1].price, 20.0);
    assert_eq!(orders[1].total_price, 32.0);

    // Account validation is only part of placing an order.
    assert_eq!(harness.accounts.received(), 0);
    harness.catalog.verify();

    drop(client);
    handle.await.unwrap();
}

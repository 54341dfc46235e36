use service_framework::RpcError;
use std::time::Duration;
use storefront::catalog::{CatalogError, ProductQuery};
use storefront::config::{RetryPolicy, StorefrontConfig};
use storefront::lifecycle::{LifecycleError, Storefront};
use storefront::model::{OrderLine, Product, ProductCreate};
use storefront::order::OrderError;

fn create(name: &str, description: &str, price: f64) -> ProductCreate {
    ProductCreate {
        name: name.to_string(),
        description: description.to_string(),
        price,
    }
}

/// Full end-to-end test with all real services.
#[tokio::test]
async fn test_order_shows_live_prices_but_keeps_its_total() {
    let system = Storefront::in_memory();

    let account = system.account_client.post_account("Alice").await.unwrap();
    let mug = system
        .catalog_client
        .post_product(create("Mug", "Blue mug", 10.0))
        .await
        .unwrap();
    let tea = system
        .catalog_client
        .post_product(create("Tea", "Loose leaf", 5.5))
        .await
        .unwrap();

    let order = system
        .order_client
        .post_order(
            &account.id,
            vec![OrderLine::new(mug.id.clone(), 2), OrderLine::new(tea.id.clone(), 1)],
        )
        .await
        .unwrap();
    assert_eq!(order.total_price, 25.5);

    system
        .catalog_client
        .put_product(Product {
            price: 20.0,
            ..mug.clone()
        })
        .await
        .unwrap();

    let orders = system
        .order_client
        .get_orders_for_account(&account.id)
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, order.id);
    assert_eq!(orders[0].created_at, order.created_at);
    assert_eq!(orders[0].products[0].id, mug.id);
    assert_eq!(orders[0].products[0].price, 20.0);
    assert_eq!(orders[0].products[0].quantity, 2);
    assert_eq!(orders[0].total_price, 25.5);

    system.shutdown().await.expect("Failed to shutdown system");
}

#[tokio::test]
async fn test_quantity_filtering_and_empty_resolution() {
    let system = Storefront::in_memory();
    let account = system.account_client.post_account("Bob").await.unwrap();
    let p1 = system
        .catalog_client
        .post_product(create("Lamp", "Desk lamp", 30.0))
        .await
        .unwrap();
    let p2 = system
        .catalog_client
        .post_product(create("Bulb", "Spare bulb", 2.0))
        .await
        .unwrap();

    let order = system
        .order_client
        .post_order(
            &account.id,
            vec![OrderLine::new(p1.id.clone(), 2), OrderLine::new(p2.id, 0)],
        )
        .await
        .unwrap();
    assert_eq!(order.product_ids().collect::<Vec<_>>(), vec![p1.id.as_str()]);
    assert_eq!(order.total_price, 60.0);

    let empty = system
        .order_client
        .post_order(&account.id, vec![OrderLine::new("not-in-catalog", 4)])
        .await
        .unwrap();
    assert!(empty.products.is_empty());
    assert_eq!(empty.total_price, 0.0);

    let orders = system
        .order_client
        .get_orders_for_account(&account.id)
        .await
        .unwrap();
    assert_eq!(orders.len(), 2);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_account_persists_no_order() {
    let system = Storefront::in_memory();
    let mug = system
        .catalog_client
        .post_product(create("Mug", "Blue mug", 10.0))
        .await
        .unwrap();

    let err = system
        .order_client
        .post_order("nobody", vec![OrderLine::new(mug.id, 1)])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RpcError::Service(OrderError::AccountNotFound { .. })
    ));

    let orders = system
        .order_client
        .get_orders_for_account("nobody")
        .await
        .unwrap();
    assert!(orders.is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_catalog_queries_through_the_client() {
    let system = Storefront::in_memory();
    let mug = system
        .catalog_client
        .post_product(create("Mug", "Ceramic, holds tea", 10.0))
        .await
        .unwrap();
    let tea = system
        .catalog_client
        .post_product(create("Green Tea", "Loose leaf", 5.5))
        .await
        .unwrap();
    system
        .catalog_client
        .post_product(create("Notebook", "Dotted pages", 3.0))
        .await
        .unwrap();

    let found = system
        .catalog_client
        .get_products(ProductQuery::from_parts(Vec::new(), "tea", 0, 10))
        .await
        .unwrap();
    let mut ids: Vec<String> = found.into_iter().map(|p| p.id).collect();
    ids.sort();
    let mut expected = vec![mug.id.clone(), tea.id.clone()];
    expected.sort();
    assert_eq!(ids, expected);

    let by_ids = system
        .catalog_client
        .get_products(ProductQuery::from_parts(vec![tea.id.clone()], "", 0, 10))
        .await
        .unwrap();
    assert_eq!(by_ids, vec![tea]);

    let page = system
        .catalog_client
        .get_products(ProductQuery::Page { skip: 0, take: 2 })
        .await
        .unwrap();
    assert_eq!(page.len(), 2);

    let err = system.catalog_client.get_product("missing").await.unwrap_err();
    assert!(err.service_error().is_some_and(CatalogError::is_not_found));

    let err = system
        .catalog_client
        .post_product(create("Free lunch", "", -1.0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RpcError::Service(CatalogError::InvalidPrice(_))
    ));

    system.shutdown().await.unwrap();
}

/// Many orders at once against real services.
#[tokio::test]
async fn test_concurrent_orders() {
    let system = Storefront::in_memory();
    let account = system.account_client.post_account("Carol").await.unwrap();
    let widget = system
        .catalog_client
        .post_product(create("Widget", "", 1.5))
        .await
        .unwrap();

    let mut handles = vec![];
    for quantity in 1..=10 {
        let order_client = system.order_client.clone();
        let account_id = account.id.clone();
        let product_id = widget.id.clone();
        handles.push(tokio::spawn(async move {
            order_client
                .post_order(&account_id, vec![OrderLine::new(product_id, quantity)])
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let orders = system
        .order_client
        .get_orders_for_account(&account.id)
        .await
        .unwrap();
    assert_eq!(orders.len(), 10);
    let total: f64 = orders.iter().map(|o| o.total_price).sum();
    assert_eq!(total, 1.5 * 55.0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_bootstrap_without_store_runs_in_memory() {
    let system = Storefront::bootstrap(&StorefrontConfig::default())
        .await
        .unwrap();
    let account = system.account_client.post_account("Dana").await.unwrap();
    assert_eq!(
        system.account_client.get_account(&account.id).await.unwrap(),
        account
    );
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_bootstrap_gives_up_on_unreachable_store() {
    let config = StorefrontConfig {
        // Nothing listens on the discard port.
        database_url: Some("http://127.0.0.1:9".to_string()),
        retry: RetryPolicy {
            delay: Duration::from_millis(1),
            max_attempts: Some(2),
        },
        ..StorefrontConfig::default()
    };

    match Storefront::bootstrap(&config).await {
        Err(LifecycleError::StoreUnreachable(e)) => {
            assert_eq!(e.attempts, 2);
            assert!(matches!(e.last, CatalogError::Transport(_)));
        }
        Err(other) => panic!("expected StoreUnreachable, got {other}"),
        Ok(_) => panic!("bootstrap should fail"),
    }

    let config = StorefrontConfig {
        database_url: Some("not a url".to_string()),
        ..StorefrontConfig::default()
    };
    assert!(matches!(
        Storefront::bootstrap(&config).await,
        Err(LifecycleError::StoreConfig(CatalogError::InvalidUrl(_)))
    ));
}

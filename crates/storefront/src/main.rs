//! # Storefront demo
//!
//! Starts the services (Elasticsearch-backed when `DATABASE_URL` is set, in memory
//! otherwise), places an order, changes a price and lists the account's orders to show
//! the live overlay.
//!
//! ```bash
//! RUST_LOG=info cargo run -p storefront
//! DATABASE_URL=http://localhost:9200 RUST_LOG=debug cargo run -p storefront
//! ```

use service_framework::tracing::setup_tracing;
use std::error::Error;
use storefront::config::StorefrontConfig;
use storefront::lifecycle::Storefront;
use storefront::model::{OrderLine, Product, ProductCreate};
use storefront::status::Status;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = StorefrontConfig::from_env()?;
    let storefront = Storefront::bootstrap(&config).await?;

    let account = storefront.account_client.post_account("Alice").await?;
    info!(account_id = %account.id, "Account created");

    let span = tracing::info_span!("catalog_setup");
    let (mug, tea) = async {
        let mug = storefront
            .catalog_client
            .post_product(ProductCreate {
                name: "Blue Mug".to_string(),
                description: "Ceramic mug, dishwasher safe".to_string(),
                price: 10.0,
            })
            .await?;
        let tea = storefront
            .catalog_client
            .post_product(ProductCreate {
                name: "Green Tea".to_string(),
                description: "Loose leaf tea".to_string(),
                price: 5.5,
            })
            .await?;
        Ok::<_, Box<dyn Error>>((mug, tea))
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("order_processing");
    let order = async {
        storefront
            .order_client
            .post_order(
                &account.id,
                vec![
                    OrderLine::new(mug.id.clone(), 2),
                    OrderLine::new(tea.id.clone(), 1),
                    OrderLine::new("no-such-product", 3),
                ],
            )
            .await
    }
    .instrument(span)
    .await?;
    info!(order_id = %order.id, total = order.total_price, lines = order.products.len(), "Order placed");

    // The stored total keeps the old price; the listed line shows the new one.
    storefront
        .catalog_client
        .put_product(Product { price: 12.0, ..mug })
        .await?;

    for order in storefront
        .order_client
        .get_orders_for_account(&account.id)
        .await?
    {
        for line in &order.products {
            info!(
                order_id = %order.id,
                product = %line.name,
                price = line.price,
                quantity = line.quantity,
                "Line item"
            );
        }
        info!(order_id = %order.id, total = order.total_price, "Order total");
    }

    match storefront.order_client.post_order("unknown", Vec::new()).await {
        Ok(order) => error!(order_id = %order.id, "Order for an unknown account was accepted"),
        Err(e) => info!(status = ?Status::from(&e), error = %e, "Rejected order for unknown account"),
    }

    storefront.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}

use crate::account::{self, AccountRegistry, AccountService};
use crate::catalog::{self, CatalogError, CatalogService, ElasticRepository, InMemoryProductRepository, ProductRepository};
use crate::clients::{AccountClient, CatalogClient, OrderClient};
use crate::config::StorefrontConfig;
use crate::lifecycle::{connect_with_retry, RetryExhausted};
use crate::order::{self, InMemoryOrderStore, OrderService, OrderStore};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The document store URL cannot be used at all; retrying would not help.
    #[error("Invalid document store configuration: {0}")]
    StoreConfig(#[source] CatalogError),

    #[error("Document store unreachable: {0}")]
    StoreUnreachable(#[from] RetryExhausted<CatalogError>),

    #[error("Service task failed: {0}")]
    TaskFailed(#[from] JoinError),
}

/// The running catalog, account and order services.
///
/// # Wiring
/// The catalog and account services have no dependencies. The order service gets
/// clones of their clients as its context when it starts.
///
/// # Example
///
/// ```ignore
/// let storefront = Storefront::in_memory();
///
/// let account = storefront.account_client.post_account("Alice").await?;
/// let mug = storefront.catalog_client.post_product(mug_params).await?;
/// let order = storefront
///     .order_client
///     .post_order(&account.id, vec![OrderLine::new(mug.id, 2)])
///     .await?;
///
/// storefront.shutdown().await?;
/// ```
pub struct Storefront {
    pub catalog_client: CatalogClient,
    pub account_client: AccountClient,
    pub order_client: OrderClient,
    handles: Vec<JoinHandle<()>>,
}

impl Storefront {
    /// Spawns all three services over the given persistence.
    pub fn start(
        config: &StorefrontConfig,
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderStore>,
    ) -> Self {
        // 1. Create actors (no dependencies)
        let (catalog_actor, catalog_client) = catalog::new(config.rpc_buffer);
        let (account_actor, account_client) = account::new(config.rpc_buffer);
        let (order_actor, order_client) = order::new(config.rpc_buffer);

        let catalog_client = CatalogClient::new(catalog_client).with_deadline(config.rpc_timeout);
        let account_client = AccountClient::new(account_client).with_deadline(config.rpc_timeout);
        let order_client = OrderClient::new(order_client).with_deadline(config.rpc_timeout);

        // 2. Start actors with injected context
        let catalog_handle = tokio::spawn(catalog_actor.run(CatalogService::new(products), ()));
        let account_handle =
            tokio::spawn(account_actor.run(AccountService::new(AccountRegistry::new()), ()));
        let order_handle = tokio::spawn(order_actor.run(
            OrderService::new(orders),
            (account_client.clone(), catalog_client.clone()),
        ));

        info!(buffer = config.rpc_buffer, timeout = ?config.rpc_timeout, "Storefront started");
        Self {
            catalog_client,
            account_client,
            order_client,
            handles: vec![order_handle, catalog_handle, account_handle],
        }
    }

    /// Everything in memory, with default settings.
    pub fn in_memory() -> Self {
        Self::start(
            &StorefrontConfig::default(),
            Arc::new(InMemoryProductRepository::new()),
            Arc::new(InMemoryOrderStore::new()),
        )
    }

    /// Connects the catalog to `config.database_url` when set, retrying per
    /// `config.retry`, then starts the services. Without a URL the catalog is in memory.
    pub async fn bootstrap(config: &StorefrontConfig) -> Result<Self, LifecycleError> {
        let products: Arc<dyn ProductRepository> = match &config.database_url {
            Some(url) => {
                let repository = ElasticRepository::new(url).map_err(LifecycleError::StoreConfig)?;
                let repository = connect_with_retry(config.retry, |_| {
                    let repository = repository.clone();
                    async move { repository.ping().await.map(|()| repository) }
                })
                .await?;
                info!(url = %url, "Connected to document store");
                Arc::new(repository)
            }
            None => {
                info!("No DATABASE_URL set, keeping the catalog in memory");
                Arc::new(InMemoryProductRepository::new())
            }
        };
        Ok(Self::start(config, products, Arc::new(InMemoryOrderStore::new())))
    }

    /// Drops every client and waits for the services to finish their in-flight requests.
    ///
    /// The order service holds the other two clients, so it has to stop before they can.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down storefront...");
        drop(self.order_client);
        drop(self.catalog_client);
        drop(self.account_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Service task failed");
                return Err(LifecycleError::TaskFailed(e));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}

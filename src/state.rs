use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    CatalogService, CredentialHasher, SeaOrmCatalogService, SeaOrmUserService, UserService,
};

/// Process-wide state built once before the server accepts traffic.
/// Nothing in here is mutated afterwards.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub catalog_service: Arc<dyn CatalogService>,

    pub user_service: Arc<dyn UserService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::from_config(&config.database).await?;
        Ok(Self::with_store(config, store))
    }

    /// Wires the services around an already-open store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let credentials = Arc::new(CredentialHasher::initialize(&config.security));

        let catalog_service: Arc<dyn CatalogService> =
            Arc::new(SeaOrmCatalogService::new(store.clone()));

        let user_service: Arc<dyn UserService> = Arc::new(SeaOrmUserService::new(
            store.clone(),
            credentials,
        ));

        Self {
            config: Arc::new(config),
            store,
            catalog_service,
            user_service,
        }
    }
}

//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, Db},
    domain::{
        catalog::{CatalogLookup, HttpCatalogClient, PgCatalogLookup, http::HttpCatalogConfig},
        checkout::{CheckoutService, PricedCheckoutService},
        orders::{OrdersService, PgOrdersService},
        pricing::{CartPricingService, CatalogCartPricingService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrate(#[source] MigrateError),
}

/// Where catalog lookups are served from.
#[derive(Debug, Clone)]
pub enum CatalogBackend {
    /// The `audiobooks` table in the shared database.
    Database,

    /// The remote catalog service.
    Http(HttpCatalogConfig),
}

/// Database settings used to build an [`AppContext`].
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

#[derive(Clone)]
pub struct AppContext {
    pub pricing: Arc<dyn CartPricingService>,
    pub orders: Arc<dyn OrdersService>,
    pub checkout: Arc<dyn CheckoutService>,
}

impl AppContext {
    /// Wire the services over an existing database handle.
    #[must_use]
    pub fn new(db: Db, catalog: CatalogBackend) -> Self {
        let catalog: Arc<dyn CatalogLookup> = match catalog {
            CatalogBackend::Database => Arc::new(PgCatalogLookup::new(db.clone())),
            CatalogBackend::Http(config) => Arc::new(HttpCatalogClient::new(config)),
        };

        let pricing: Arc<dyn CartPricingService> = Arc::new(CatalogCartPricingService::new(catalog));
        let orders: Arc<dyn OrdersService> = Arc::new(PgOrdersService::new(db));
        let checkout = Arc::new(PricedCheckoutService::new(
            Arc::clone(&pricing),
            Arc::clone(&orders),
        ));

        Self {
            pricing,
            orders,
            checkout,
        }
    }

    /// Build application context from database settings.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn from_settings(
        settings: &DatabaseSettings,
        catalog: CatalogBackend,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with_max_connections(&settings.url, settings.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;

            info!("database migrations applied");
        }

        Ok(Self::new(Db::new(pool), catalog))
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

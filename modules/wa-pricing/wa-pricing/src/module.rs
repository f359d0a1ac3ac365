use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};
use utoipa::OpenApi;
use wa_pricing_sdk::WaPricingClient;

use crate::api::rest::auth::AuthState;
use crate::api::rest::openapi::ApiDoc;
use crate::api::rest::routes;
use crate::config::WaPricingConfig;
use crate::domain::service::{Repositories, Service, ServiceConfig};
use crate::infra::static_tokens::StaticTokenResolver;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{
    SeaOrmCalculationRepository, SeaOrmCountryRateRepository, SeaOrmLeadRepository,
    SeaOrmUserRepository,
};
use crate::local_client::LocalClient;

/// Wired pricing module: storage, service, auth and routes.
pub struct WaPricingModule {
    service: Arc<Service>,
    auth: AuthState,
}

impl WaPricingModule {
    /// Validate `config`, migrate the schema, seed country rates and build
    /// the service.
    ///
    /// # Errors
    /// Invalid configuration, failed migrations or a failed seed.
    pub async fn init(db: DatabaseConnection, config: WaPricingConfig) -> anyhow::Result<Self> {
        info!("Initializing wa-pricing module");
        config
            .validate()
            .context("invalid modules.wa_pricing configuration")?;

        Migrator::up(&db, None)
            .await
            .context("wa-pricing database migrations failed")?;
        info!("wa-pricing database migrations completed");

        let repos = Repositories {
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            calculations: Arc::new(SeaOrmCalculationRepository::new(db.clone())),
            leads: Arc::new(SeaOrmLeadRepository::new(db.clone())),
            country_rates: Arc::new(SeaOrmCountryRateRepository::new(db)),
        };
        let service = Arc::new(Service::new(
            repos,
            ServiceConfig {
                pricing: config.pricing.clone(),
            },
        ));

        service
            .seed_country_rates(&config.seed_rates())
            .await
            .context("failed to seed country rates")?;

        let dev_identity = if config.auth.disabled {
            warn!(
                open_id = %config.auth.dev_identity.open_id,
                "Auth is DISABLED: every request runs as the development identity"
            );
            Some(config.auth.dev_identity.clone().into())
        } else {
            None
        };
        let resolver = Arc::new(StaticTokenResolver::from_config(&config.auth));
        let auth = AuthState::new(service.clone(), resolver, dev_identity);

        info!(tokens = config.auth.tokens.len(), "wa-pricing module initialized");
        Ok(Self { service, auth })
    }

    /// Routes of the module, `/health` and `/openapi.json` included.
    #[must_use]
    pub fn router(&self) -> Router {
        routes::router(self.service.clone(), self.auth.clone())
    }

    /// In-process client for other components of the same binary.
    #[must_use]
    pub fn client(&self) -> Arc<dyn WaPricingClient> {
        Arc::new(LocalClient::new(self.service.clone()))
    }

    #[must_use]
    pub fn openapi() -> utoipa::openapi::OpenApi {
        ApiDoc::openapi()
    }
}

//! Module declaration and lifecycle implementation

use crate::api::native::NativeClient;
use crate::config::{Config, DatabaseConfig};
use crate::contract::OrdersApi;
use crate::domain::Service;
use crate::infra::storage::{
    ensure_schema, SeaOrmCompanyRepository, SeaOrmOrderRepository, SeaOrmOrderTypeRepository,
};
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Orders service module: storage, domain service, native client and REST
pub struct OrdersServiceModule {
    config: Config,
    service: Arc<Service>,
    client: Arc<dyn OrdersApi>,
}

impl OrdersServiceModule {
    /// Connect to the configured database and wire the module
    pub async fn init(config: Config) -> Result<Self> {
        let db = connect(&config.database).await?;
        Self::from_connection(db, config).await
    }

    /// Wire the module over an existing connection pool
    pub async fn from_connection(db: DatabaseConnection, config: Config) -> Result<Self> {
        if config.database.bootstrap_schema {
            ensure_schema(&db).await?;
        }

        let conn = Arc::new(db);
        let company_repo = Arc::new(SeaOrmCompanyRepository::new(conn.clone()));
        let order_type_repo = Arc::new(SeaOrmOrderTypeRepository::new(conn.clone()));
        let order_repo = Arc::new(SeaOrmOrderRepository::new(conn));

        let service = Arc::new(Service::new(company_repo, order_type_repo, order_repo));
        let client: Arc<dyn OrdersApi> = Arc::new(NativeClient::new(service.clone()));

        tracing::info!("Orders service initialized with native client");
        Ok(Self {
            config,
            service,
            client,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client for the client-state store
    pub fn client(&self) -> Arc<dyn OrdersApi> {
        self.client.clone()
    }

    pub fn router(&self) -> axum::Router {
        crate::api::rest::register_routes(axum::Router::new(), self.service.clone())
    }

    /// Serve REST until `cancel` fires
    pub async fn serve(self: Arc<Self>, cancel: CancellationToken) -> Result<()> {
        let addr = self.config.server.bind_addr;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;

        tracing::info!(%addr, "Orders service listening");
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { cancel.cancelled().await })
            .await
            .context("orders service HTTP server failed")?;

        tracing::info!("Orders service stopped");
        Ok(())
    }
}

async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout)
        .sqlx_logging(config.sqlx_logging);

    let db = Database::connect(options)
        .await
        .context("failed to connect to orders database")?;
    tracing::info!(max_connections = config.max_connections, "database pool ready");
    Ok(db)
}

use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;
use service::customer::{
    CustomerRepository, InMemoryCustomerRepository, JsonFileCustomerRepository, SeaOrmCustomerRepository,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the persistence backend selected by `storage.backend`.
pub async fn build_repository(cfg: &AppConfig) -> Result<Arc<dyn CustomerRepository>, StartupError> {
    let repo: Arc<dyn CustomerRepository> = match cfg.storage.backend {
        StorageBackend::Memory => {
            info!(backend = "memory", "customer storage ready");
            Arc::new(InMemoryCustomerRepository::new())
        }
        StorageBackend::Json => {
            common::env::ensure_data_dir(&cfg.storage.json_path).await?;
            let repo = JsonFileCustomerRepository::open(&cfg.storage.json_path).await?;
            info!(backend = "json", path = %repo.path().display(), "customer storage ready");
            Arc::new(repo)
        }
        StorageBackend::Database => {
            if cfg.database.url.trim().is_empty() {
                return Err(StartupError::InvalidConfig("database.url is required for the database backend".into()));
            }
            let db = models::db::connect_with_config(&cfg.database).await?;
            if cfg.database.run_migrations {
                models::db::migrate(&db).await?;
            }
            info!(backend = "database", "customer storage ready");
            Arc::new(SeaOrmCustomerRepository::new(db))
        }
    };
    Ok(repo)
}

/// Assemble router and state for a configuration.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let repo = build_repository(cfg).await?;
    let state = ServerState::new(repo);
    Ok(routes::build_router(state, build_cors(), cfg.server.max_body_bytes))
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, backend = ?cfg.storage.backend, "starting customer records server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

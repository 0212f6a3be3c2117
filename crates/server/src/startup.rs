use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::interceptor::{InterceptorChain, LoggingInterceptor};
use crate::routes;
use crate::state::AppState;
use crate::views::Views;
use service::{ProductRepository, ProductService, SeaOrmProductRepository};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file when one exists, otherwise environment variables.
///
/// A config file that exists but does not parse or validate is an error.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let path = configs::config_path();
    if Path::new(&path).exists() {
        info!(%path, "loading configuration file");
        AppConfig::load_and_validate()
    } else {
        info!(%path, "no configuration file, using environment");
        AppConfig::from_env()
    }
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Wire store, service, views and interceptors into a router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    common::env::ensure_template_dir(&cfg.view.prefix).await?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!(event = "migrated", "database schema up to date");
    }

    let repo: Arc<dyn ProductRepository> = Arc::new(SeaOrmProductRepository::new(db));
    let state = AppState::new(
        ProductService::new(repo),
        Views::from_config(&cfg.view),
        InterceptorChain::new().with(LoggingInterceptor),
    );
    Ok(routes::build_router(state, build_cors()))
}

/// Resolves once Ctrl+C is received; in-flight requests are allowed to finish.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl_c listener failed, shutting down");
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Serve the app described by `cfg` until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg.server)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "product server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

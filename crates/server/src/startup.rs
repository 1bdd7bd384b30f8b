use std::{env, net::SocketAddr, path::Path};

use axum::Router;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use configs::{AppConfig, ServerConfig};
use service::auth::AuthConfig;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `config.toml` (or `CONFIG_PATH`) when present, environment variables otherwise.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if Path::new(&path).exists() {
        info!(%path, "loading configuration file");
        AppConfig::load_and_validate()
    } else {
        warn!(%path, "configuration file not found, using environment");
        AppConfig::from_env()
    }
}

/// Multi-threaded runtime sized by `server.worker_threads`.
pub fn build_runtime(cfg: &ServerConfig) -> std::io::Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = cfg.worker_threads {
        builder.worker_threads(threads);
    }
    builder.build()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl_c handler unavailable");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

/// Create the configured bootstrap admin unless it already exists.
async fn bootstrap_admin(state: &ServerState, cfg: &AppConfig) -> anyhow::Result<()> {
    if let (Some(username), Some(password)) = (&cfg.auth.bootstrap_admin, &cfg.auth.bootstrap_password) {
        if state.auth.ensure_user(username, password).await? {
            info!(%username, "bootstrap admin created");
        }
    }
    Ok(())
}

/// Public entry: build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }

    let state = ServerState::from_db(db, AuthConfig::from(&cfg.auth));
    bootstrap_admin(&state, &cfg).await?;

    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting back office server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_uses_configured_worker_threads() {
        let cfg = ServerConfig { worker_threads: Some(2), ..ServerConfig::default() };
        let rt = build_runtime(&cfg).unwrap();
        assert_eq!(rt.metrics().num_workers(), 2);
        assert_eq!(rt.block_on(async { 40 + 2 }), 42);
    }

    #[test]
    fn bind_addr_rejects_bad_host() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));

        cfg.server.host = "127.0.0.1".into();
        cfg.server.port = 9090;
        assert_eq!(bind_addr(&cfg).unwrap(), "127.0.0.1:9090".parse::<SocketAddr>().unwrap());
    }
}

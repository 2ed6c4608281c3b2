use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use gym_api::{build_router, AppState};
use gym_infrastructure::{create_pool, postgres_repositories, run_migrations};
use gym_security::JwtService;
use gym_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration first: telemetry settings live in it, and a missing or
    // weak JWT secret must stop the process before anything is served.
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let _log_guard = gym_shared::telemetry::init_telemetry(&config.logging);
    info!(env = %config.app.env, "{} starting...", config.app.name);

    let pool = create_pool(&config.database)
        .await
        .context("failed to connect to database")?;

    if config.database.run_migrations {
        run_migrations(&pool).await.context("failed to apply migrations")?;
    }

    let jwt = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.expiry_seconds));
    let state = AppState::new(postgres_repositories(pool.clone()), jwt);
    let app = build_router(state);

    let host: std::net::IpAddr = config.app.host.parse().context("invalid app.host")?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

/// Resolves once `signal` fires. A signal that cannot be installed never
/// resolves, so the server keeps running instead of stopping at startup.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

use anyhow::Context;
use clap::Parser;
use lostfound::{backup, config, create_app, db, logging, run_migrations};
use std::{net::SocketAddr, sync::Arc};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment variables from .env feed the clap `env` fallbacks
    if std::fs::metadata(".env").is_ok() {
        dotenv::dotenv().ok();
    }

    let args = config::CliArgs::parse();
    let _log_guard = logging::init_tracing(args.debug, config::get_log_dir_path().as_deref());

    let config = config::get_config(args);

    let pool = db::init_pool(&config.database_url)
        .with_context(|| format!("Failed to open database at {}", config.database_url))?;
    {
        let mut conn = pool.get().context("Failed to get a database connection")?;
        run_migrations(&mut conn)?;
    }
    let pool = Arc::new(pool);

    let backups = tokio::spawn(backup::run_periodic_backups(pool.clone(), config.clone()));

    let app = create_app(pool);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    backups.abort();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

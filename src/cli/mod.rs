use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::app::{self, AppState};
use crate::config::AppConfig;
use crate::database::Database;

#[derive(Parser)]
#[command(name = "restaurant-api")]
#[command(about = "Restaurant management API - menus, inventory, tables and reservations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides RESTAURANT_API_PORT / PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Apply pending database migrations and exit")]
    Migrate,
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => serve(config, port).await,
        Commands::Migrate => migrate(&config).await,
    }
}

async fn serve(config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    info!("Starting Restaurant API in {:?} mode", config.environment);
    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set");
    }

    // Lazy pool: the server starts (and /health reports 503) without a database
    let db = Database::connect_lazy(&config.database).context("invalid database configuration")?;
    if config.database.run_migrations {
        if let Err(e) = db.migrate().await {
            tracing::warn!("Skipping migrations: {}", e);
        }
    }

    let port = port.unwrap_or(config.api.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Restaurant API listening on http://{}", bind_addr);

    let router = app::router(AppState::new(db.clone(), config));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn migrate(config: &AppConfig) -> anyhow::Result<()> {
    let db = Database::connect(&config.database).await.context("cannot connect to database")?;
    db.migrate().await.context("migration failed")?;
    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

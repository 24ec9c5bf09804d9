use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use banner_api::config::{self, AppConfig};
use banner_api::database::{
    BannerRepository, DatabaseManager, InMemoryBannerRepository, PgBannerRepository,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    /// PostgreSQL via DATABASE_URL
    Postgres,
    /// Process-local store; contents are lost on exit
    Memory,
}

#[derive(Parser)]
#[command(name = "banner-api")]
#[command(about = "Banner management API")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Address to bind (overrides API_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides API_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, value_enum, default_value_t = StoreKind::Postgres, help = "Banner storage backend")]
    store: StoreKind,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("banner_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config: &AppConfig = config::config();
    config.validate().context("invalid configuration")?;
    tracing::info!("Starting Banner API in {:?} mode", config.environment);

    let repository: Arc<dyn BannerRepository> = match cli.store {
        StoreKind::Postgres => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            Arc::new(PgBannerRepository::new(pool))
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory banner store; data will not persist");
            Arc::new(InMemoryBannerRepository::new())
        }
    };

    let app = banner_api::app(repository, config);

    let host = cli.host.unwrap_or_else(|| config.api.host.clone());
    let port = cli.port.unwrap_or(config.api.port);
    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Banner API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use carhub_api::{app, AppState};
use carhub_search::{SearchConfig, SearchEngine, Stores};
use carhub_store::app_config::{Config, StoreBackend};
use carhub_store::{
    DbClient, MemoryStore, PgBookingRepository, PgCarRepository, PgDateBasedPriceRepository,
    PgLocationRepository, PgSupplierRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carhub_api=debug,carhub_search=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting CarHub search API on port {}", config.server.port);

    let stores = build_stores(&config).await?;
    let engine = SearchEngine::new(
        stores,
        SearchConfig {
            timeout: Duration::from_millis(config.search.timeout_ms),
            max_page_size: config.search.max_page_size,
        },
    );
    let app_state = AppState::new(engine).context("Failed to register metrics")?;

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

async fn build_stores(config: &Config) -> anyhow::Result<Stores> {
    match config.store.backend {
        StoreBackend::Memory => {
            let store = match &config.store.seed_file {
                Some(path) => MemoryStore::from_json_file(path)
                    .map_err(|e| anyhow::anyhow!("Failed to load seed file {}: {}", path, e))?,
                None => {
                    tracing::warn!("Memory backend started without a seed file");
                    MemoryStore::new(Default::default())
                }
            };
            Ok(Stores::from_backend(Arc::new(store)))
        }
        StoreBackend::Postgres => {
            let db = DbClient::new(&config.database)
                .await
                .context("Failed to connect to Postgres")?;
            if config.database.run_migrations {
                db.migrate().await.context("Failed to run migrations")?;
            }
            Ok(Stores {
                cars: Arc::new(PgCarRepository::new(db.pool.clone())),
                bookings: Arc::new(PgBookingRepository::new(db.pool.clone())),
                locations: Arc::new(PgLocationRepository::new(db.pool.clone())),
                suppliers: Arc::new(PgSupplierRepository::new(db.pool.clone())),
                prices: Arc::new(PgDateBasedPriceRepository::new(db.pool)),
            })
        }
    }
}

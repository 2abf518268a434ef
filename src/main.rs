use dotenvy::dotenv;
use shopfront::{
    config::{catalog, database, settings::Settings},
    core::{Storefront, watcher::PendingOrderWatcher},
    errors::Result,
    store::{KeyValueStore, SqliteBackend},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();
    let settings = Settings::from_env();
    info!(
        poll_secs = settings.pending_poll_interval.as_secs(),
        generator = settings.gemini_api_key.is_some(),
        "Settings loaded"
    );

    // 3. Connect and make sure the key-value table exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    // 4. Seed the catalog on first run
    let seed = catalog::load_default_catalog_seed()
        .inspect_err(|e| error!("Failed to load catalog seed: {}", e))?;
    let store = KeyValueStore::new(SqliteBackend::new(db));
    let shop = Storefront::new(&store, seed);

    if shop.catalog.seed_if_empty().await? {
        info!("Catalog seeded");
    }
    info!(
        products = shop.catalog.list_products().await?.len(),
        categories = shop.catalog.list_categories().await?.len(),
        orders = shop.orders.list_all().await?.len(),
        "Storefront ready"
    );

    // 5. Watch for pending orders until Ctrl-C
    let watcher = PendingOrderWatcher::new(&shop.orders, settings.pending_poll_interval);
    let checks = watcher
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await;

    info!(checks, "Shutting down");
    Ok(())
}

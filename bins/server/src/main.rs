//! Cambio API Server
//!
//! Main entry point for the Cambio currency service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cambio_api::{AppState, create_router};
use cambio_core::currency::{CurrencyService, FormatterRegistry};
use cambio_db::{CurrencyRepository, connect};
use cambio_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cambio=debug,cambio_core=debug,cambio_db=debug,cambio_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Load the currency registry once; rate updates reload it explicitly
    let store = Arc::new(CurrencyRepository::new(db.clone()));
    let currency =
        CurrencyService::load(&config.currency, &FormatterRegistry::default(), store.as_ref()).await?;
    info!(
        base_currency = %currency.base_currency(),
        currencies = currency.registry().len(),
        "Currency service ready"
    );

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        currency: Arc::new(currency),
        store,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

//! HTTP API layer with Axum routes and extractors.
//!
//! This crate provides:
//! - REST API routes for currencies, conversion, formatting and prices
//! - The `X-Currency` active-currency extractor
//! - Mapping of domain errors to JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;

use axum::Router;
use cambio_core::currency::{CurrencyService, CurrencyStore};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Shared conversion engine.
    pub currency: Arc<CurrencyService>,
    /// Record store the currency registry loads from.
    pub store: Arc<dyn CurrencyStore>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

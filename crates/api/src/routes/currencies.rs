//! Currency listing and exchange rate routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use cambio_core::currency::Currency;
use cambio_shared::AppError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{AppState, error::ApiError};

/// Creates the currency routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/currencies", get(list_currencies))
        .route("/currencies/{code}", get(get_currency))
        .route("/currencies/{code}/exchange-rate", put(update_exchange_rate))
}

/// Response for a currency.
#[derive(Debug, Serialize)]
pub struct CurrencyResponse {
    /// Currency id.
    pub id: i64,
    /// Currency code.
    pub code: String,
    /// Currency name.
    pub name: String,
    /// Country the currency belongs to.
    pub country: String,
    /// Currency symbol.
    pub symbol: String,
    /// Whether the symbol follows the number.
    pub symbol_on_right: bool,
    /// Rate against the base currency.
    pub exchange_rate: Decimal,
}

impl From<Currency> for CurrencyResponse {
    fn from(c: Currency) -> Self {
        Self {
            id: c.id.into_inner(),
            code: c.code,
            name: c.name,
            country: c.country,
            symbol: c.symbol,
            symbol_on_right: c.symbol_on_right,
            exchange_rate: c.exchange_rate,
        }
    }
}

/// Request body for setting an exchange rate.
#[derive(Debug, Deserialize)]
pub struct UpdateExchangeRateRequest {
    /// New rate against the base currency.
    pub rate: Decimal,
}

/// GET `/currencies` - List active currencies.
async fn list_currencies(State(state): State<AppState>) -> impl IntoResponse {
    let response: Vec<CurrencyResponse> = state
        .currency
        .active_currencies()
        .into_iter()
        .map(CurrencyResponse::from)
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "base_currency": state.currency.base_currency(),
            "currencies": response,
        })),
    )
}

/// GET `/currencies/{code}` - Get one currency.
async fn get_currency(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CurrencyResponse>, ApiError> {
    let code = code.to_uppercase();
    state
        .currency
        .currency_by_code(&code)
        .map(|c| Json(CurrencyResponse::from(c)))
        .ok_or_else(|| AppError::NotFound(format!("Currency '{code}' not found")).into())
}

/// PUT `/currencies/{code}/exchange-rate` - Store a new rate and reload the registry.
async fn update_exchange_rate(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(payload): Json<UpdateExchangeRateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let code = code.to_uppercase();
    let rows = state
        .currency
        .update_exchange_rate(&*state.store, &code, payload.rate)
        .await?;
    if rows == 0 {
        return Err(AppError::NotFound(format!("Currency '{code}' not found")).into());
    }

    state.currency.reload(&*state.store).await?;
    info!(code = %code, rate = %payload.rate, "Exchange rate applied");

    Ok((
        StatusCode::OK,
        Json(json!({
            "code": code,
            "exchange_rate": payload.rate,
            "rows": rows,
        })),
    ))
}

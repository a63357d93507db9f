//! Price routes for priceable entities.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use cambio_core::currency::{CurrencyService, Price, PriceKind, Priceable};
use cambio_db::{PriceRepository, repositories::CreatePriceInput};
use cambio_shared::{AppError, CurrencyId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError, extractors::ActiveCurrency};

/// Creates the price routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/prices/{priceable_type}/{priceable_id}", get(list_prices))
        .route("/prices/{priceable_type}/{priceable_id}/{kind}", put(upsert_price))
}

/// Request body for storing a price.
#[derive(Debug, Deserialize)]
pub struct UpsertPriceRequest {
    /// Currency the value is expressed in.
    pub currency_id: i64,
    /// The amount.
    pub value: Decimal,
}

/// A price as shown to the caller.
#[derive(Debug, Serialize)]
pub struct PriceResponse {
    /// Stored record id.
    pub id: Option<i64>,
    /// Price kind.
    pub kind: PriceKind,
    /// Display currency code.
    pub currency_code: String,
    /// Value in the display currency.
    pub value: Decimal,
    /// Formatted value in the display currency.
    pub formatted: String,
    /// Stored currency code.
    pub original_currency_code: String,
    /// Stored value.
    pub original_value: Decimal,
}

fn render(stored: &Price, shown: &Price, service: &CurrencyService) -> Result<PriceResponse, ApiError> {
    Ok(PriceResponse {
        id: stored.id.map(Into::into),
        kind: stored.kind,
        currency_code: shown.currency_code(service)?,
        value: shown.value,
        formatted: shown.format(service)?,
        original_currency_code: stored.currency_code(service)?,
        original_value: stored.value,
    })
}

fn parse_kind(kind: &str) -> Result<PriceKind, ApiError> {
    kind.parse::<PriceKind>()
        .map_err(|message| AppError::Validation(message).into())
}

/// GET `/prices/{priceable_type}/{priceable_id}` - Prices of an owner in the active currency.
async fn list_prices(
    State(state): State<AppState>,
    ActiveCurrency(ctx): ActiveCurrency,
    Path((priceable_type, priceable_id)): Path<(String, i64)>,
) -> Result<Json<Vec<PriceResponse>>, ApiError> {
    let repo = PriceRepository::new((*state.db).clone());
    let owner = Priceable::new(priceable_type, priceable_id);

    let mut response = Vec::new();
    for model in repo.find_for_owner(&owner).await? {
        let stored = Price::from(model);
        let shown = ctx.price_in_active_currency(&stored)?;
        response.push(render(&stored, &shown, ctx.service())?);
    }
    Ok(Json(response))
}

/// PUT `/prices/{priceable_type}/{priceable_id}/{kind}` - Create or replace an owner's price.
async fn upsert_price(
    State(state): State<AppState>,
    Path((priceable_type, priceable_id, kind)): Path<(String, i64, String)>,
    Json(payload): Json<UpsertPriceRequest>,
) -> Result<Json<PriceResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    let currency_id = CurrencyId::new(payload.currency_id);
    if state.currency.currency_by_id(currency_id).is_none() {
        return Err(AppError::Validation(format!("Unknown currency id {currency_id}")).into());
    }

    let repo = PriceRepository::new((*state.db).clone());
    let owner = Priceable::new(priceable_type, priceable_id);
    let model = repo
        .upsert(CreatePriceInput {
            priceable: owner.clone(),
            kind,
            currency_id,
            value: payload.value,
        })
        .await?;

    info!(
        priceable_type = %owner.priceable_type,
        priceable_id = owner.priceable_id,
        kind = %kind,
        "Price stored"
    );
    let stored = Price::from(model);
    Ok(Json(render(&stored, &stored, &state.currency)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{send, state};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use rust_decimal_macros::dec;

    fn put_price(uri: &str, body: &str) -> Request<Body> {
        Request::put(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("sale").unwrap(), PriceKind::Sale);
        assert_eq!(parse_kind("RRP").unwrap(), PriceKind::Rrp);
        assert!(parse_kind("discount").is_err());
    }

    #[test]
    fn test_render_converted_price() {
        let (state, _) = state();
        let stored = Price::new(CurrencyId::new(1), dec!(100));
        let shown = Price::new(CurrencyId::new(2), dec!(90.00));
        let response = render(&stored, &shown, &state.currency).unwrap();
        assert_eq!(response.currency_code, "EUR");
        assert_eq!(response.formatted, "90.00€");
        assert_eq!(response.original_currency_code, "USD");
        assert_eq!(response.original_value, dec!(100));
    }

    #[tokio::test]
    async fn test_unknown_kind_is_rejected_before_storage() {
        let (state, _) = state();
        let request = put_price(
            "/api/v1/prices/product/1/discount",
            r#"{"currency_id":1,"value":"9.99"}"#,
        );
        let (status, body) = send(state, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_currency_is_rejected_before_storage() {
        let (state, _) = state();
        let request = put_price("/api/v1/prices/product/1/price", r#"{"currency_id":42,"value":"1"}"#);
        let (status, _) = send(state, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

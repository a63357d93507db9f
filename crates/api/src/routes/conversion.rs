//! Conversion and formatting routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use cambio_core::currency::parse_amount;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, extractors::ActiveCurrency};

/// Creates the conversion routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/convert", get(convert))
        .route("/format", get(format_amount))
}

/// Query parameters for a conversion.
#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    /// Amount; separators and whitespace are tolerated.
    pub amount: String,
    /// Target code (defaults to the active currency).
    pub to: Option<String>,
    /// Source code (defaults to the base currency).
    pub from: Option<String>,
    /// Render with the configured formatter (defaults to true).
    pub format: Option<bool>,
}

/// Query parameters for formatting.
#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    /// Amount; separators and whitespace are tolerated.
    pub amount: String,
    /// Currency code (defaults to the base currency).
    pub code: Option<String>,
    /// Include the currency symbol (defaults to true).
    pub symbol: Option<bool>,
}

/// Result of a conversion or format call.
#[derive(Debug, Serialize)]
pub struct ConversionResponse {
    /// Source currency code.
    pub from: String,
    /// Target currency code.
    pub to: String,
    /// Rendered result.
    pub result: String,
}

fn upper(code: Option<&String>) -> Option<String> {
    code.map(|c| c.trim().to_uppercase()).filter(|c| !c.is_empty())
}

/// GET `/convert` - Convert an amount between currencies.
async fn convert(
    ActiveCurrency(ctx): ActiveCurrency,
    Query(query): Query<ConvertQuery>,
) -> Result<Json<ConversionResponse>, ApiError> {
    let amount = parse_amount(&query.amount)?;
    let from = upper(query.from.as_ref()).unwrap_or_else(|| ctx.service().base_currency().to_string());
    let to = upper(query.to.as_ref()).unwrap_or_else(|| ctx.user_currency().to_string());

    let result = ctx.convert(amount, Some(to.as_str()), Some(from.as_str()), query.format.unwrap_or(true))?;
    Ok(Json(ConversionResponse { from, to, result }))
}

/// GET `/format` - Format an amount in one currency.
async fn format_amount(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
) -> Result<Json<ConversionResponse>, ApiError> {
    let code = upper(query.code.as_ref()).unwrap_or_else(|| state.currency.base_currency().to_string());
    let result = state
        .currency
        .format_str(&query.amount, Some(code.as_str()), query.symbol.unwrap_or(true))?;
    Ok(Json(ConversionResponse {
        from: code.clone(),
        to: code,
        result,
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{get, send, state};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use rstest::rstest;

    #[rstest]
    #[case("/api/v1/convert?amount=100&to=EUR&format=false", "90.00")]
    #[case("/api/v1/convert?amount=100&to=eur", "90.00€")]
    #[case("/api/v1/convert?amount=90&from=EUR&to=USD&format=false", "100.00")]
    #[case("/api/v1/convert?amount=1%2C000&to=EUR&format=false", "900.00")]
    #[case("/api/v1/convert?amount=12.345", "$12.35")]
    #[tokio::test]
    async fn test_convert(#[case] uri: &str, #[case] expected: &str) {
        let (state, _) = state();
        let (status, body) = send(state, get(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], expected);
    }

    #[tokio::test]
    async fn test_convert_uses_active_currency_header() {
        let (state, _) = state();
        let request = Request::get("/api/v1/convert?amount=100&format=false")
            .header("X-Currency", "eur")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(state, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["from"], "USD");
        assert_eq!(body["to"], "EUR");
        assert_eq!(body["result"], "90.00");
    }

    #[rstest]
    #[case("/api/v1/convert?amount=100&to=XYZ", StatusCode::NOT_FOUND)]
    #[case("/api/v1/convert?amount=lots&to=EUR", StatusCode::BAD_REQUEST)]
    #[case("/api/v1/format?amount=1&code=XYZ", StatusCode::NOT_FOUND)]
    #[tokio::test]
    async fn test_errors(#[case] uri: &str, #[case] expected: StatusCode) {
        let (state, _) = state();
        let (status, body) = send(state, get(uri)).await;
        assert_eq!(status, expected);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_format() {
        let (state, _) = state();
        let (status, body) = send(state.clone(), get("/api/v1/format?amount=1234.5&code=EUR")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "1,234.50€");

        let (_, body) = send(state, get("/api/v1/format?amount=1234.5&symbol=false")).await;
        assert_eq!(body["result"], "1,234.50");
    }
}

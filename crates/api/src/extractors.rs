//! Request extractors.

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use cambio_core::currency::CurrencyContext;
use cambio_shared::AppError;

use crate::{AppState, error::ApiError};

/// Header naming the caller's display currency.
pub const CURRENCY_HEADER: &str = "x-currency";

/// Per-request currency context built from the `X-Currency` header.
///
/// Without the header (or with an empty one) the base currency applies. The
/// code is not validated here; an unknown code fails the conversion that
/// uses it.
///
/// ```ignore
/// async fn handler(ActiveCurrency(ctx): ActiveCurrency) -> impl IntoResponse {
///     ctx.convert(amount, None, None, true)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ActiveCurrency(pub CurrencyContext);

impl FromRequestParts<AppState> for ActiveCurrency {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let mut ctx = CurrencyContext::new(Arc::clone(&state.currency));

        if let Some(value) = parts.headers.get(CURRENCY_HEADER) {
            let code = value.to_str().map_err(|_| {
                AppError::Validation("X-Currency header must be ASCII".to_string())
            })?;
            let code = code.trim();
            if !code.is_empty() {
                ctx.set_user_currency(code);
            }
        }

        Ok(Self(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<ActiveCurrency, ApiError> {
        let (state, _) = test_support::state();
        let (mut parts, ()) = request.into_parts();
        ActiveCurrency::from_request_parts(&mut parts, &state).await
    }

    #[tokio::test]
    async fn test_without_header_uses_base_currency() {
        let ActiveCurrency(ctx) = extract(Request::new(())).await.unwrap();
        assert_eq!(ctx.user_currency(), "USD");
    }

    #[tokio::test]
    async fn test_header_is_uppercased() {
        let request = Request::builder().header("X-Currency", " eur ").body(()).unwrap();
        let ActiveCurrency(ctx) = extract(request).await.unwrap();
        assert_eq!(ctx.user_currency(), "EUR");
    }

    #[tokio::test]
    async fn test_blank_header_is_ignored() {
        let request = Request::builder().header("X-Currency", "  ").body(()).unwrap();
        let ActiveCurrency(ctx) = extract(request).await.unwrap();
        assert_eq!(ctx.user_currency(), "USD");
    }
}

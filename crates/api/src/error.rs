//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cambio_core::currency::CurrencyError;
use cambio_db::PriceError;
use cambio_shared::AppError;
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

/// Handler error rendered as `{ "error": CODE, "message": text }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<CurrencyError> for ApiError {
    fn from(err: CurrencyError) -> Self {
        let message = err.to_string();
        Self(match err {
            CurrencyError::CurrencyNotFound(_) | CurrencyError::CurrencyIdNotFound(_) => {
                AppError::NotFound(message)
            }
            CurrencyError::InvalidAmount(_)
            | CurrencyError::NonPositiveRate(_)
            | CurrencyError::Overflow { .. } => AppError::Validation(message),
            CurrencyError::NoFormatterConfigured | CurrencyError::UnknownFormatter(_) => {
                AppError::Configuration(message)
            }
            CurrencyError::RecordStoreUnavailable(_) => AppError::Database(message),
        })
    }
}

impl From<PriceError> for ApiError {
    fn from(err: PriceError) -> Self {
        let message = err.to_string();
        Self(match err {
            PriceError::DuplicatePrice { .. } => AppError::Conflict(message),
            PriceError::Database(_) => AppError::Database(message),
        })
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cambio_core::currency::PriceKind;
    use cambio_shared::CurrencyId;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(CurrencyError::CurrencyNotFound("XYZ".into()), StatusCode::NOT_FOUND)]
    #[case(CurrencyError::CurrencyIdNotFound(CurrencyId::new(4)), StatusCode::NOT_FOUND)]
    #[case(CurrencyError::InvalidAmount("abc".into()), StatusCode::BAD_REQUEST)]
    #[case(CurrencyError::NonPositiveRate(dec!(0)), StatusCode::BAD_REQUEST)]
    #[case(CurrencyError::NoFormatterConfigured, StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(CurrencyError::UnknownFormatter("intl".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(
        CurrencyError::RecordStoreUnavailable("down".into()),
        StatusCode::SERVICE_UNAVAILABLE
    )]
    fn test_currency_error_status(#[case] err: CurrencyError, #[case] status: StatusCode) {
        assert_eq!(ApiError::from(err).into_response().status(), status);
    }

    #[test]
    fn test_duplicate_price_is_conflict() {
        let err = PriceError::DuplicatePrice {
            priceable_type: "product".into(),
            priceable_id: 1,
            kind: PriceKind::Price,
        };
        assert_eq!(ApiError::from(err).into_response().status(), StatusCode::CONFLICT);
    }
}

//! Currency error types.

use cambio_shared::CurrencyId;
use rust_decimal::Decimal;
use thiserror::Error;

use super::store::StoreError;

/// Result type alias using `CurrencyError`.
pub type CurrencyResult<T> = Result<T, CurrencyError>;

/// Currency-related errors.
#[derive(Debug, Error)]
pub enum CurrencyError {
    /// No registered currency has this code.
    #[error("Currency '{0}' not found")]
    CurrencyNotFound(String),

    /// No registered currency has this id.
    #[error("Currency with id {0} not found")]
    CurrencyIdNotFound(CurrencyId),

    /// A format was requested but no formatter is selected.
    #[error("No currency formatter is configured")]
    NoFormatterConfigured,

    /// The selected formatter entry or its driver does not exist.
    #[error("Unknown currency formatter: {0}")]
    UnknownFormatter(String),

    /// A textual amount could not be parsed.
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),

    /// Exchange rates must be strictly positive.
    #[error("Exchange rate must be positive, got {0}")]
    NonPositiveRate(Decimal),

    /// The conversion left the representable decimal range.
    #[error("Converting {amount} from {from} to {to} overflowed")]
    Overflow {
        /// Amount being converted.
        amount: Decimal,
        /// Source currency code.
        from: String,
        /// Target currency code.
        to: String,
    },

    /// The backing record store failed; the source error is kept unchanged.
    #[error("Currency record store unavailable: {0}")]
    RecordStoreUnavailable(#[source] StoreError),
}

impl CurrencyError {
    /// Returns true for the "does not resolve" family of errors.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CurrencyNotFound(_) | Self::CurrencyIdNotFound(_)
        )
    }
}

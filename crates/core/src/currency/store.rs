//! Record store seam for currency data.
//!
//! The core never talks to a database directly. `cambio-db` implements
//! [`CurrencyStore`] on top of SeaORM; [`InMemoryCurrencyStore`] backs tests
//! and embedded use.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::types::Currency;

/// Error type returned by record store implementations, kept opaque so the
/// storage error reaches the caller unchanged.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Persistence operations the currency service depends on.
#[async_trait]
pub trait CurrencyStore: Send + Sync {
    /// Returns every currency without a soft-delete marker, in insertion order.
    async fn all_active(&self) -> Result<Vec<Currency>, StoreError>;

    /// Sets the exchange rate of every row with `code`; returns the number of
    /// rows written.
    async fn update_exchange_rate(&self, code: &str, rate: Decimal) -> Result<u64, StoreError>;
}

/// Vector-backed store keeping insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCurrencyStore {
    currencies: RwLock<Vec<Currency>>,
}

impl InMemoryCurrencyStore {
    /// Creates a store holding `currencies` (soft-deleted rows included).
    #[must_use]
    pub fn new(currencies: Vec<Currency>) -> Self {
        Self {
            currencies: RwLock::new(currencies),
        }
    }

    /// Appends a row.
    pub fn insert(&self, currency: Currency) {
        self.currencies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(currency);
    }

    /// Returns a copy of every row, soft-deleted ones included.
    #[must_use]
    pub fn rows(&self) -> Vec<Currency> {
        self.currencies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CurrencyStore for InMemoryCurrencyStore {
    async fn all_active(&self) -> Result<Vec<Currency>, StoreError> {
        Ok(self
            .currencies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|c| !c.is_deleted())
            .cloned()
            .collect())
    }

    async fn update_exchange_rate(&self, code: &str, rate: Decimal) -> Result<u64, StoreError> {
        let mut rows = self
            .currencies
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut written = 0;
        for currency in rows.iter_mut().filter(|c| c.code == code) {
            currency.exchange_rate = rate;
            written += 1;
        }
        Ok(written)
    }
}

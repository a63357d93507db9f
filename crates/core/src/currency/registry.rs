//! In-memory currency registry.
//!
//! A registry is an immutable snapshot of the store's active currencies,
//! kept in load order. Lookups by code return the LAST match so that a newer
//! seeded row overrides an older one; lookups by id return the FIRST match.
//! Both behaviors are relied upon and must not be unified.

use cambio_shared::CurrencyId;
use tracing::info;

use super::error::{CurrencyError, CurrencyResult};
use super::store::CurrencyStore;
use super::types::Currency;

/// Ordered, read-only collection of active currencies.
#[derive(Debug, Clone, Default)]
pub struct CurrencyRegistry {
    currencies: Vec<Currency>,
}

impl CurrencyRegistry {
    /// Builds a registry from rows in load order. Soft-deleted rows are dropped.
    #[must_use]
    pub fn new(currencies: Vec<Currency>) -> Self {
        Self {
            currencies: currencies.into_iter().filter(|c| !c.is_deleted()).collect(),
        }
    }

    /// Loads every active currency from the record store.
    ///
    /// # Errors
    ///
    /// Returns `RecordStoreUnavailable` if the store call fails.
    pub async fn load<S>(store: &S) -> CurrencyResult<Self>
    where
        S: CurrencyStore + ?Sized,
    {
        let rows = store
            .all_active()
            .await
            .map_err(CurrencyError::RecordStoreUnavailable)?;
        let registry = Self::new(rows);
        info!(count = registry.len(), "Loaded currency registry");
        Ok(registry)
    }

    /// Finds the most recently loaded currency with exactly this code.
    #[must_use]
    pub fn by_code(&self, code: &str) -> Option<&Currency> {
        self.currencies.iter().rev().find(|c| c.code == code)
    }

    /// Finds the first currency with this id.
    #[must_use]
    pub fn by_id(&self, id: CurrencyId) -> Option<&Currency> {
        self.currencies.iter().find(|c| c.id == id)
    }

    /// Returns every cached currency.
    #[must_use]
    pub fn all(&self) -> &[Currency] {
        &self.currencies
    }

    /// Returns the currencies active for the current domain.
    ///
    /// Domain scoping is not implemented; this is the full collection.
    #[must_use]
    pub fn active(&self) -> &[Currency] {
        self.all()
    }

    /// Number of cached currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    /// Returns true if no currency is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}

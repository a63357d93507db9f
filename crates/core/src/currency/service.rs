//! Currency service: conversion engine and formatting entry point.
//!
//! The service owns the current [`CurrencyRegistry`] snapshot and the
//! selected formatter. Conversion and formatting are pure in-memory work;
//! only [`CurrencyService::load`], [`CurrencyService::reload`] and
//! [`CurrencyService::update_exchange_rate`] touch the record store.

use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use cambio_shared::{CurrencyConfig, CurrencyId, FormatterOptions};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::error::{CurrencyError, CurrencyResult};
use super::formatter::{
    CurrencyFormatter, FormatterFactory, FormatterRegistry, parse_amount, round_money,
};
use super::registry::CurrencyRegistry;
use super::store::CurrencyStore;
use super::types::Currency;

/// Decimal places of plain (unformatted) conversion results.
pub const PLAIN_DECIMALS: u32 = 2;

/// Formatter chosen by configuration, built on first use.
struct SelectedFormatter {
    name: String,
    factory: FormatterFactory,
    options: FormatterOptions,
    instance: OnceLock<Box<dyn CurrencyFormatter>>,
}

impl SelectedFormatter {
    fn get(&self) -> &dyn CurrencyFormatter {
        self.instance
            .get_or_init(|| {
                debug!(formatter = %self.name, "Constructing currency formatter");
                (self.factory)(&self.options)
            })
            .as_ref()
    }
}

impl fmt::Debug for SelectedFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFormatter")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("constructed", &self.instance.get().is_some())
            .finish_non_exhaustive()
    }
}

/// Converts and renders currency amounts.
///
/// Share it behind an `Arc`; per-caller state lives in
/// [`CurrencyContext`](super::CurrencyContext).
#[derive(Debug)]
pub struct CurrencyService {
    base_currency: String,
    registry: RwLock<Arc<CurrencyRegistry>>,
    formatter: Option<SelectedFormatter>,
}

impl CurrencyService {
    /// Creates a service over an already loaded registry.
    ///
    /// The formatter selection is resolved here; the formatter itself is
    /// constructed on the first format call.
    ///
    /// # Errors
    ///
    /// Returns `UnknownFormatter` if the selected entry is missing from
    /// `config.formatters` or names an unregistered driver.
    pub fn new(
        config: &CurrencyConfig,
        formatters: &FormatterRegistry,
        registry: CurrencyRegistry,
    ) -> CurrencyResult<Self> {
        let formatter = match config.selected_formatter() {
            None => {
                warn!("No currency formatter selected; formatting will fail");
                None
            }
            Some((name, None)) => return Err(CurrencyError::UnknownFormatter(name.to_string())),
            Some((name, Some(entry))) => {
                let factory = formatters
                    .get(&entry.driver)
                    .ok_or_else(|| CurrencyError::UnknownFormatter(entry.driver.clone()))?;
                Some(SelectedFormatter {
                    name: name.to_string(),
                    factory,
                    options: entry.options.clone(),
                    instance: OnceLock::new(),
                })
            }
        };

        Ok(Self {
            base_currency: config.default.clone(),
            registry: RwLock::new(Arc::new(registry)),
            formatter,
        })
    }

    /// Loads the registry from `store` and creates the service.
    ///
    /// # Errors
    ///
    /// Returns `RecordStoreUnavailable` if loading fails, or any error of
    /// [`CurrencyService::new`].
    pub async fn load<S>(
        config: &CurrencyConfig,
        formatters: &FormatterRegistry,
        store: &S,
    ) -> CurrencyResult<Self>
    where
        S: CurrencyStore + ?Sized,
    {
        let registry = CurrencyRegistry::load(store).await?;
        Self::new(config, formatters, registry)
    }

    /// Configured base currency code.
    #[must_use]
    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    /// Returns the current registry snapshot.
    #[must_use]
    pub fn registry(&self) -> Arc<CurrencyRegistry> {
        Arc::clone(&self.registry.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replaces the registry with a fresh load from `store`.
    ///
    /// The new snapshot is published in one swap; readers holding the old
    /// snapshot keep using it. On failure the current snapshot stays.
    ///
    /// # Errors
    ///
    /// Returns `RecordStoreUnavailable` if loading fails.
    pub async fn reload<S>(&self, store: &S) -> CurrencyResult<()>
    where
        S: CurrencyStore + ?Sized,
    {
        let fresh = Arc::new(CurrencyRegistry::load(store).await?);
        *self.registry.write().unwrap_or_else(PoisonError::into_inner) = fresh;
        info!("Currency registry reloaded");
        Ok(())
    }

    /// Writes a new exchange rate for `code` through the record store.
    ///
    /// The in-memory registry is NOT refreshed; call [`CurrencyService::reload`]
    /// to pick up the new rate.
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveRate` for a rate `<= 0` and
    /// `RecordStoreUnavailable` if the write fails.
    pub async fn update_exchange_rate<S>(
        &self,
        store: &S,
        code: &str,
        rate: Decimal,
    ) -> CurrencyResult<u64>
    where
        S: CurrencyStore + ?Sized,
    {
        if rate <= Decimal::ZERO {
            return Err(CurrencyError::NonPositiveRate(rate));
        }

        let written = store
            .update_exchange_rate(code, rate)
            .await
            .map_err(CurrencyError::RecordStoreUnavailable)?;

        if written == 0 {
            warn!(code = %code, "Exchange rate update matched no currency");
        } else {
            info!(code = %code, rate = %rate, rows = written, "Exchange rate updated");
        }
        Ok(written)
    }

    /// Every cached currency.
    #[must_use]
    pub fn currencies(&self) -> Vec<Currency> {
        self.registry().all().to_vec()
    }

    /// Currencies active for the current domain (currently all of them).
    #[must_use]
    pub fn active_currencies(&self) -> Vec<Currency> {
        self.registry().active().to_vec()
    }

    /// Looks up a currency by exact code; the last match wins.
    #[must_use]
    pub fn currency_by_code(&self, code: &str) -> Option<Currency> {
        self.registry().by_code(code).cloned()
    }

    /// Looks up a currency by id; the first match wins.
    #[must_use]
    pub fn currency_by_id(&self, id: CurrencyId) -> Option<Currency> {
        self.registry().by_id(id).cloned()
    }

    /// Exchange rate of `code` relative to the base currency.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyNotFound` if `code` does not resolve.
    pub fn exchange_rate(&self, code: &str) -> CurrencyResult<Decimal> {
        rate_of(&self.registry(), code)
    }

    /// Converts `amount` from `from` to `to` without rounding.
    ///
    /// Identical codes return `amount` untouched, but both codes must still
    /// resolve.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyNotFound` if either code does not resolve and
    /// `Overflow` if the arithmetic leaves the decimal range.
    pub fn exact_value(&self, amount: Decimal, from: &str, to: &str) -> CurrencyResult<Decimal> {
        let registry = self.registry();
        let from_rate = rate_of(&registry, from)?;
        let to_rate = rate_of(&registry, to)?;

        if from == to {
            return Ok(amount);
        }

        amount
            .checked_mul(to_rate)
            .and_then(|scaled| scaled.checked_div(from_rate))
            .ok_or_else(|| CurrencyError::Overflow {
                amount,
                from: from.to_string(),
                to: to.to_string(),
            })
    }

    /// Converts `amount` and rounds the result to two decimals (half up).
    ///
    /// Identical codes return `amount` unchanged and unrounded.
    ///
    /// # Errors
    ///
    /// See [`CurrencyService::exact_value`].
    pub fn convert_value(&self, amount: Decimal, from: &str, to: &str) -> CurrencyResult<Decimal> {
        let value = self.exact_value(amount, from, to)?;
        if from == to {
            Ok(value)
        } else {
            Ok(round_money(value, PLAIN_DECIMALS))
        }
    }

    /// Converts `amount` from `from` to `to`.
    ///
    /// With `format` the result is rendered by the configured formatter in
    /// the target currency; otherwise it is the plain two-decimal string
    /// (e.g. `"90.00"`), or the untouched amount for identical codes.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyNotFound` if either code does not resolve, and
    /// `NoFormatterConfigured` when formatting without a formatter.
    pub fn convert_between(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
        format: bool,
    ) -> CurrencyResult<String> {
        if format {
            let value = self.exact_value(amount, from, to)?;
            self.format(value, Some(to), true)
        } else {
            self.convert_value(amount, from, to).map(|value| value.to_string())
        }
    }

    /// Formats `value` in `code` (default: the base currency).
    ///
    /// # Errors
    ///
    /// Returns `NoFormatterConfigured` if no formatter is selected and
    /// `CurrencyNotFound` if `code` does not resolve.
    pub fn format(
        &self,
        value: Decimal,
        code: Option<&str>,
        include_symbol: bool,
    ) -> CurrencyResult<String> {
        let formatter = self.formatter()?;
        let code = code.unwrap_or(self.base_currency.as_str());
        let registry = self.registry();
        let currency = registry
            .by_code(code)
            .ok_or_else(|| CurrencyError::CurrencyNotFound(code.to_string()))?;
        Ok(formatter.format(value, currency, include_symbol))
    }

    /// Formats a textual amount after stripping whitespace, apostrophes,
    /// commas and exclamation marks.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if the text does not parse, otherwise as
    /// [`CurrencyService::format`].
    pub fn format_str(
        &self,
        raw: &str,
        code: Option<&str>,
        include_symbol: bool,
    ) -> CurrencyResult<String> {
        self.format(parse_amount(raw)?, code, include_symbol)
    }

    /// Returns the configured formatter, constructing it on first use.
    ///
    /// # Errors
    ///
    /// Returns `NoFormatterConfigured` if none is selected.
    pub fn formatter(&self) -> CurrencyResult<&dyn CurrencyFormatter> {
        self.formatter
            .as_ref()
            .map(SelectedFormatter::get)
            .ok_or(CurrencyError::NoFormatterConfigured)
    }
}

fn rate_of(registry: &CurrencyRegistry, code: &str) -> CurrencyResult<Decimal> {
    registry
        .by_code(code)
        .map(|currency| currency.exchange_rate)
        .ok_or_else(|| CurrencyError::CurrencyNotFound(code.to_string()))
}

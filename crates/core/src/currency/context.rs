//! Per-caller active currency.
//!
//! A [`CurrencyContext`] pairs the shared [`CurrencyService`] with the
//! currency one caller is viewing in. Build one per request or session;
//! never share a context between concurrent callers.

use std::borrow::Cow;
use std::sync::Arc;

use rust_decimal::Decimal;

use super::error::CurrencyResult;
use super::service::CurrencyService;
use super::types::{Currency, Price};

/// Request-scoped view of the currency service.
#[derive(Debug, Clone)]
pub struct CurrencyContext {
    service: Arc<CurrencyService>,
    user_currency: Option<String>,
}

impl CurrencyContext {
    /// Creates a context viewing in the base currency.
    #[must_use]
    pub const fn new(service: Arc<CurrencyService>) -> Self {
        Self {
            service,
            user_currency: None,
        }
    }

    /// The shared service.
    #[must_use]
    pub fn service(&self) -> &CurrencyService {
        &self.service
    }

    /// Stores the upper-cased `code` as the active currency.
    ///
    /// The code is not validated; an unknown code surfaces when a later
    /// conversion or format fails to resolve it.
    pub fn set_user_currency(&mut self, code: &str) {
        self.user_currency = Some(code.to_uppercase());
    }

    /// Drops the stored code so the base currency applies again.
    pub fn clear_user_currency(&mut self) {
        self.user_currency = None;
    }

    /// The active currency code: the stored one, or the base currency when
    /// none (or an empty one) was set.
    #[must_use]
    pub fn user_currency(&self) -> &str {
        self.user_currency
            .as_deref()
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| self.service.base_currency())
    }

    /// Looks up `code`, defaulting to the active currency.
    #[must_use]
    pub fn currency(&self, code: Option<&str>) -> Option<Currency> {
        self.service
            .currency_by_code(code.unwrap_or_else(|| self.user_currency()))
    }

    /// Returns true if `code` resolves in the registry.
    #[must_use]
    pub fn has_currency(&self, code: &str) -> bool {
        self.service.currency_by_code(code).is_some()
    }

    /// Returns true if `code` is non-empty and resolves in the registry.
    #[must_use]
    pub fn is_active(&self, code: Option<&str>) -> bool {
        code.is_some_and(|code| !code.is_empty() && self.has_currency(code))
    }

    /// Converts `amount` from `from` (default: base currency) to `to`
    /// (default: active currency).
    ///
    /// # Errors
    ///
    /// See [`CurrencyService::convert_between`].
    pub fn convert(
        &self,
        amount: Decimal,
        to: Option<&str>,
        from: Option<&str>,
        format: bool,
    ) -> CurrencyResult<String> {
        let from = from.unwrap_or_else(|| self.service.base_currency());
        let to = to.unwrap_or_else(|| self.user_currency());
        self.service.convert_between(amount, from, to, format)
    }

    /// Formats `amount` in `code` (default: base currency).
    ///
    /// # Errors
    ///
    /// See [`CurrencyService::format`].
    pub fn format(
        &self,
        amount: Decimal,
        code: Option<&str>,
        include_symbol: bool,
    ) -> CurrencyResult<String> {
        self.service.format(amount, code, include_symbol)
    }

    /// Returns `price` expressed in the active currency.
    ///
    /// # Errors
    ///
    /// See [`Price::to_display_currency`].
    pub fn price_in_active_currency<'a>(&self, price: &'a Price) -> CurrencyResult<Cow<'a, Price>> {
        price.to_display_currency(self)
    }
}

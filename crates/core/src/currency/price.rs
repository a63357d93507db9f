//! Registry-backed accessors on [`Price`].

use std::borrow::Cow;

use rust_decimal::Decimal;

use super::context::CurrencyContext;
use super::error::{CurrencyError, CurrencyResult};
use super::formatter::round_money;
use super::service::{CurrencyService, PLAIN_DECIMALS};
use super::types::{Currency, Price, PriceSummary};

impl Price {
    /// Resolves the price's own currency.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyIdNotFound` if the id is not in the registry.
    pub fn currency(&self, service: &CurrencyService) -> CurrencyResult<Currency> {
        service
            .currency_by_id(self.currency_id)
            .ok_or(CurrencyError::CurrencyIdNotFound(self.currency_id))
    }

    /// Code of the price's own currency.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyIdNotFound` if the id is not in the registry.
    pub fn currency_code(&self, service: &CurrencyService) -> CurrencyResult<String> {
        self.currency(service).map(|currency| currency.code)
    }

    /// Converts the value from its own currency to `to`.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyIdNotFound` if the own currency does not resolve,
    /// otherwise as [`CurrencyService::convert_between`].
    pub fn convert(&self, service: &CurrencyService, to: &str, format: bool) -> CurrencyResult<String> {
        let from = self.currency_code(service)?;
        service.convert_between(self.value, &from, to, format)
    }

    /// Formats the value in its own currency.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyIdNotFound` if the own currency does not resolve,
    /// otherwise as [`CurrencyService::format`].
    pub fn format(&self, service: &CurrencyService) -> CurrencyResult<String> {
        let code = self.currency_code(service)?;
        service.format(self.value, Some(code.as_str()), true)
    }

    /// Returns the price in the context's active currency.
    ///
    /// When the active currency is the price's own currency the price is
    /// borrowed unchanged. Otherwise a transient price carrying the converted,
    /// two-decimal value and the active currency's id is returned.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyIdNotFound` if the own currency does not resolve and
    /// `CurrencyNotFound` if the active currency does not.
    pub fn to_display_currency<'a>(&'a self, ctx: &CurrencyContext) -> CurrencyResult<Cow<'a, Self>> {
        let service = ctx.service();
        let from = self.currency(service)?;
        let target = ctx.user_currency();
        if from.code == target {
            return Ok(Cow::Borrowed(self));
        }

        let to = service
            .currency_by_code(target)
            .ok_or_else(|| CurrencyError::CurrencyNotFound(target.to_string()))?;
        let value = service.convert_value(self.value, &from.code, &to.code)?;
        Ok(Cow::Owned(Self::new(to.id, value).with_kind(self.kind)))
    }

    /// A zero price in the base currency.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyNotFound` if the base currency is not in the registry.
    pub fn make_empty(service: &CurrencyService) -> CurrencyResult<Self> {
        let base = service.base_currency();
        let currency = service
            .currency_by_code(base)
            .ok_or_else(|| CurrencyError::CurrencyNotFound(base.to_string()))?;
        Ok(Self::new(currency.id, Decimal::ZERO))
    }

    /// Resolves every derived field for display or debugging.
    ///
    /// # Errors
    ///
    /// As [`Price::format`].
    pub fn summary(&self, service: &CurrencyService) -> CurrencyResult<PriceSummary> {
        let currency_code = self.currency_code(service)?;
        let formatted = service.format(self.value, Some(currency_code.as_str()), true)?;
        Ok(PriceSummary {
            currency_id: self.currency_id,
            currency_code,
            value: round_money(self.value, PLAIN_DECIMALS),
            formatted,
        })
    }
}

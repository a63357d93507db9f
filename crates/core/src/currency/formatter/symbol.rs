//! Formatter using the symbol and side stored with each currency.

use cambio_shared::FormatterOptions;
use rust_decimal::Decimal;

use super::{CurrencyFormatter, group_digits, round_money};
use crate::currency::types::Currency;

/// Places the registry symbol left or right of a grouped number.
///
/// Defaults: `.` decimal separator, `,` thousands separator, two decimals,
/// no space between number and symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolFormatter {
    decimal_separator: String,
    thousands_separator: String,
    decimals: u32,
    symbol_spacing: bool,
}

impl Default for SymbolFormatter {
    fn default() -> Self {
        Self {
            decimal_separator: ".".to_string(),
            thousands_separator: ",".to_string(),
            decimals: 2,
            symbol_spacing: false,
        }
    }
}

impl SymbolFormatter {
    /// Maximum number of decimals a `Decimal` can carry.
    const MAX_DECIMALS: u32 = 28;

    /// Builds a formatter, taking unset options from [`Default`].
    #[must_use]
    pub fn from_options(options: &FormatterOptions) -> Self {
        let defaults = Self::default();
        Self {
            decimal_separator: options
                .decimal_separator
                .clone()
                .unwrap_or(defaults.decimal_separator),
            thousands_separator: options
                .thousands_separator
                .clone()
                .unwrap_or(defaults.thousands_separator),
            decimals: options
                .decimals
                .unwrap_or(defaults.decimals)
                .min(Self::MAX_DECIMALS),
            symbol_spacing: options.symbol_spacing.unwrap_or(defaults.symbol_spacing),
        }
    }

    /// Renders the number part only, with a leading `-` when negative.
    #[must_use]
    pub fn number(&self, value: Decimal) -> String {
        self.number_with_decimals(value, self.decimals)
    }

    fn number_with_decimals(&self, value: Decimal, decimals: u32) -> String {
        let (negative, digits) = self.split_sign(value, decimals);
        if negative { format!("-{digits}") } else { digits }
    }

    /// Renders like [`CurrencyFormatter::format`] but rounds to `decimals`
    /// instead of the configured count.
    pub(crate) fn render(
        &self,
        value: Decimal,
        currency: &Currency,
        include_symbol: bool,
        decimals: u32,
    ) -> String {
        let decimals = decimals.min(Self::MAX_DECIMALS);
        if !include_symbol || currency.symbol.is_empty() {
            return self.number_with_decimals(value, decimals);
        }

        let (negative, digits) = self.split_sign(value, decimals);
        let sign = if negative { "-" } else { "" };
        let space = if self.symbol_spacing { " " } else { "" };
        if currency.symbol_on_right {
            format!("{sign}{digits}{space}{}", currency.symbol)
        } else {
            format!("{sign}{}{space}{digits}", currency.symbol)
        }
    }

    /// Rounds `value` and returns its sign with the grouped absolute digits.
    /// Values rounding to zero are never negative.
    fn split_sign(&self, value: Decimal, decimals: u32) -> (bool, String) {
        let rounded = round_money(value, decimals);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = group_digits(rounded, &self.thousands_separator, &self.decimal_separator);
        (negative, digits)
    }
}

impl CurrencyFormatter for SymbolFormatter {
    fn format(&self, value: Decimal, currency: &Currency, include_symbol: bool) -> String {
        self.render(value, currency, include_symbol, self.decimals)
    }
}

//! Pluggable currency formatters.
//!
//! A formatter turns a value and a resolved [`Currency`] into a display
//! string. Formatters are selected by configuration: the `formatter` key
//! names an entry of the `formatters` map and the entry's `driver` names a
//! factory registered in a [`FormatterRegistry`].
//!
//! Every formatter is expected to round to the configured number of decimals
//! (half away from zero) and to honor `Currency::symbol_on_right`.

pub mod iso;
pub mod symbol;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use cambio_shared::FormatterOptions;
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::{CurrencyError, CurrencyResult};
use super::types::Currency;

pub use iso::IsoFormatter;
pub use symbol::SymbolFormatter;

/// Renders monetary values for display.
pub trait CurrencyFormatter: Send + Sync + fmt::Debug {
    /// Formats `value` in `currency`. With `include_symbol == false` only the
    /// grouped number is rendered.
    fn format(&self, value: Decimal, currency: &Currency, include_symbol: bool) -> String;
}

/// Builds a formatter from its configured options.
pub type FormatterFactory =
    Arc<dyn Fn(&FormatterOptions) -> Box<dyn CurrencyFormatter> + Send + Sync>;

/// Maps driver names to formatter factories.
#[derive(Clone)]
pub struct FormatterRegistry {
    factories: HashMap<String, FormatterFactory>,
}

impl FormatterRegistry {
    /// Driver name of [`SymbolFormatter`].
    pub const SYMBOL: &'static str = "symbol";
    /// Driver name of [`IsoFormatter`].
    pub const ISO: &'static str = "iso";

    /// Creates a registry without any driver.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in `symbol` and `iso` drivers.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Self::SYMBOL, |options| {
            Box::new(SymbolFormatter::from_options(options))
        });
        registry.register(Self::ISO, |options| {
            Box::new(IsoFormatter::from_options(options))
        });
        registry
    }

    /// Registers (or replaces) a driver.
    pub fn register<F>(&mut self, driver: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&FormatterOptions) -> Box<dyn CurrencyFormatter> + Send + Sync + 'static,
    {
        self.factories.insert(driver.into(), Arc::new(factory));
        self
    }

    /// Returns the factory registered for `driver`.
    #[must_use]
    pub fn get(&self, driver: &str) -> Option<FormatterFactory> {
        self.factories.get(driver).cloned()
    }

    /// Returns the registered driver names, sorted.
    #[must_use]
    pub fn drivers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterRegistry")
            .field("drivers", &self.drivers())
            .finish()
    }
}

/// Strips whitespace, apostrophes, commas and exclamation marks from a
/// textual amount, so output of an earlier format pass parses again.
#[must_use]
pub fn sanitize_amount(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '\'' | ',' | '!'))
        .collect()
}

/// Parses a textual amount after [`sanitize_amount`].
///
/// # Errors
///
/// Returns `InvalidAmount` if the sanitized text is not a decimal number.
pub fn parse_amount(raw: &str) -> CurrencyResult<Decimal> {
    let cleaned = sanitize_amount(raw);
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| CurrencyError::InvalidAmount(raw.to_string()))
}

/// Rounds half away from zero and pads to exactly `decimals` places.
#[must_use]
pub fn round_money(value: Decimal, decimals: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);
    rounded
}

/// Groups the integer digits of an already rounded, non-negative value.
pub(crate) fn group_digits(
    value: Decimal,
    thousands_separator: &str,
    decimal_separator: &str,
) -> String {
    let plain = value.abs().to_string();
    let (integer, fraction) = match plain.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (plain.as_str(), None),
    };

    let digits: Vec<char> = integer.chars().collect();
    let mut grouped = String::with_capacity(plain.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(thousands_separator);
        }
        grouped.push(*digit);
    }

    if let Some(fraction) = fraction {
        grouped.push_str(decimal_separator);
        grouped.push_str(fraction);
    }
    grouped
}

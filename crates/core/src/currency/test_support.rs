//! Shared fixtures for currency tests.

use std::sync::Arc;

use cambio_shared::{CurrencyConfig, CurrencyId, FormatterConfig, FormatterOptions};
use rust_decimal_macros::dec;

use super::formatter::FormatterRegistry;
use super::registry::CurrencyRegistry;
use super::service::CurrencyService;
use super::types::Currency;

pub fn usd() -> Currency {
    Currency::new(CurrencyId::new(1), "USD", "$", dec!(1)).with_names("United States", "US Dollar")
}

pub fn eur() -> Currency {
    Currency::new(CurrencyId::new(2), "EUR", "€", dec!(0.9))
        .with_symbol_on_right(true)
        .with_names("Eurozone", "Euro")
}

/// Base currency USD, formatter `default` using the `symbol` driver.
pub fn symbol_config() -> CurrencyConfig {
    let mut config = CurrencyConfig::default();
    config.formatter = Some("default".to_string());
    config.formatters.insert(
        "default".to_string(),
        FormatterConfig {
            driver: FormatterRegistry::SYMBOL.to_string(),
            options: FormatterOptions::default(),
        },
    );
    config
}

pub fn usd_eur_service() -> Arc<CurrencyService> {
    let registry = CurrencyRegistry::new(vec![usd(), eur()]);
    Arc::new(CurrencyService::new(&symbol_config(), &FormatterRegistry::default(), registry).unwrap())
}

//! Application configuration management.

use std::collections::HashMap;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Currency service configuration.
    #[serde(default)]
    pub currency: CurrencyConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
}

/// Currency service configuration.
///
/// ```toml
/// [currency]
/// default = "USD"
/// formatter = "default"
/// currencies = [["United States", "US Dollar", "USD", "$"]]
///
/// [currency.formatters.default]
/// driver = "symbol"
///
/// [currency.formatters.default.options]
/// thousands_separator = ","
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyConfig {
    /// Base currency code; every exchange rate is expressed against it.
    #[serde(default = "default_currency")]
    pub default: String,
    /// Name of the entry in `formatters` to render amounts with.
    #[serde(default)]
    pub formatter: Option<String>,
    /// Named formatter entries.
    #[serde(default)]
    pub formatters: HashMap<String, FormatterConfig>,
    /// Static seed list used by the seeder binary.
    #[serde(default)]
    pub currencies: Vec<SeedCurrency>,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            default: default_currency(),
            formatter: None,
            formatters: HashMap::new(),
            currencies: Vec::new(),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

impl CurrencyConfig {
    /// Returns the selected formatter name together with its entry, if the
    /// entry exists.
    ///
    /// `None` on the outer level means no formatter is selected at all.
    #[must_use]
    pub fn selected_formatter(&self) -> Option<(&str, Option<&FormatterConfig>)> {
        self.formatter
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| (name, self.formatters.get(name)))
    }
}

/// One entry of the `formatters` map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormatterConfig {
    /// Registered driver the entry instantiates (e.g. `symbol`, `iso`).
    pub driver: String,
    /// Construction options handed to the driver.
    #[serde(default)]
    pub options: FormatterOptions,
}

/// Options understood by the built-in formatter drivers.
///
/// Every field is optional; drivers fall back to their own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormatterOptions {
    /// Separator between the integer and fractional part.
    #[serde(default)]
    pub decimal_separator: Option<String>,
    /// Separator inserted between groups of three integer digits.
    #[serde(default)]
    pub thousands_separator: Option<String>,
    /// Number of fractional digits to render.
    #[serde(default)]
    pub decimals: Option<u32>,
    /// Insert a space between the number and the symbol.
    #[serde(default)]
    pub symbol_spacing: Option<bool>,
}

/// A seed row: `[country, currency name, code, symbol]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, String, String, String)")]
pub struct SeedCurrency {
    /// Country the currency belongs to.
    pub country: String,
    /// Human-readable currency name.
    pub currency: String,
    /// Currency code as stored.
    pub code: String,
    /// Display symbol.
    pub symbol: String,
}

impl From<(String, String, String, String)> for SeedCurrency {
    fn from((country, currency, code, symbol): (String, String, String, String)) -> Self {
        Self {
            country,
            currency,
            code,
            symbol,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CAMBIO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

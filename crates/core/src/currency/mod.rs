//! Multi-currency support.
//!
//! This module implements:
//! - The in-memory currency registry and its record store seam
//! - The conversion engine (`CurrencyService`)
//! - Pluggable formatters selected by configuration
//! - The per-caller active currency (`CurrencyContext`)
//! - Registry-backed price accessors

pub mod context;
pub mod error;
pub mod formatter;
pub mod price;
pub mod registry;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod props;
#[cfg(test)]
pub(crate) mod test_support;

pub use context::CurrencyContext;
pub use error::{CurrencyError, CurrencyResult};
pub use formatter::{
    CurrencyFormatter, FormatterRegistry, IsoFormatter, SymbolFormatter, parse_amount,
    round_money, sanitize_amount,
};
pub use registry::CurrencyRegistry;
pub use service::{CurrencyService, PLAIN_DECIMALS};
pub use store::{CurrencyStore, InMemoryCurrencyStore, StoreError};
pub use types::{Currency, Price, PriceKind, PriceSummary, Priceable};

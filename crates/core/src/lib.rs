//! Core business logic for Cambio.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached only through the [`currency::CurrencyStore`] trait.
//!
//! # Modules
//!
//! - `currency` - Currency registry, conversion engine, formatters, active-currency
//!   context and the price value type
//!
//! ```
//! use std::sync::Arc;
//!
//! use cambio_core::currency::{
//!     Currency, CurrencyContext, CurrencyRegistry, CurrencyService, FormatterRegistry,
//! };
//! use cambio_shared::{CurrencyConfig, CurrencyId, FormatterConfig};
//! use rust_decimal_macros::dec;
//!
//! let mut config = CurrencyConfig::default();
//! config.formatter = Some("default".into());
//! config.formatters.insert(
//!     "default".into(),
//!     FormatterConfig { driver: "symbol".into(), options: Default::default() },
//! );
//!
//! let registry = CurrencyRegistry::new(vec![
//!     Currency::new(CurrencyId::new(1), "USD", "$", dec!(1)),
//!     Currency::new(CurrencyId::new(2), "EUR", "€", dec!(0.9)).with_symbol_on_right(true),
//! ]);
//! let service = CurrencyService::new(&config, &FormatterRegistry::default(), registry).unwrap();
//!
//! let mut ctx = CurrencyContext::new(Arc::new(service));
//! ctx.set_user_currency("eur");
//! assert_eq!(ctx.convert(dec!(100), None, None, false).unwrap(), "90.00");
//! assert_eq!(ctx.convert(dec!(100), None, None, true).unwrap(), "90.00€");
//! ```

pub mod currency;

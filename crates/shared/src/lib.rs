//! Shared configuration, typed IDs, and errors for Cambio.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for currency and price records
//! - Application-wide error types
//! - Configuration management (server, database, currency service)

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, CurrencyConfig, FormatterConfig, FormatterOptions, SeedCurrency};
pub use error::{AppError, AppResult};
pub use types::{CurrencyId, PriceId};

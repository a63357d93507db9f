//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod currency;
pub mod price;

pub use currency::{CurrencyRepository, SeedReport};
pub use price::{CreatePriceInput, PriceError, PriceRepository};

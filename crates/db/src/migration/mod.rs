//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration.

pub use sea_orm_migration::prelude::*;

mod m20261017_000001_currencies;
mod m20261017_000002_prices;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261017_000001_currencies::Migration),
            Box::new(m20261017_000002_prices::Migration),
        ]
    }
}

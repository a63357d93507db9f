//! Currencies migration.
//!
//! Creates the currencies table holding symbols and rates against the base
//! currency.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(CURRENCIES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS currencies CASCADE;")
            .await?;
        Ok(())
    }
}

const CURRENCIES_SQL: &str = r"
CREATE TABLE currencies (
    id BIGSERIAL PRIMARY KEY,
    country VARCHAR(255) NOT NULL,
    currency VARCHAR(255) NOT NULL,
    code VARCHAR(10) NOT NULL,
    symbol VARCHAR(10) NOT NULL,
    symbol_on_right BOOLEAN NOT NULL DEFAULT FALSE,
    exchange_rate NUMERIC(19, 10) NOT NULL DEFAULT 1.0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at TIMESTAMPTZ,
    CONSTRAINT chk_currencies_rate_positive CHECK (exchange_rate > 0)
);

-- Lookup by code among live rows
CREATE INDEX idx_currencies_code ON currencies(code, id) WHERE deleted_at IS NULL;

-- Seeder upsert key
CREATE INDEX idx_currencies_seed_key ON currencies(country, currency, code, symbol);
";

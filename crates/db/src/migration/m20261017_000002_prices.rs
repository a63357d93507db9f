//! Prices migration.
//!
//! Creates the polymorphic prices table. An owner holds at most one price
//! per kind.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(PRICES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS prices CASCADE;")
            .await?;
        Ok(())
    }
}

const PRICES_SQL: &str = r"
CREATE TABLE prices (
    id BIGSERIAL PRIMARY KEY,
    currency_id BIGINT NOT NULL REFERENCES currencies(id),
    priceable_type VARCHAR(255) NOT NULL,
    priceable_id BIGINT NOT NULL,
    kind VARCHAR(16) NOT NULL DEFAULT 'price',
    value NUMERIC(15, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_prices_kind CHECK (kind IN ('price', 'sale', 'rrp', 'tax')),
    CONSTRAINT uq_prices_owner_kind UNIQUE (priceable_type, priceable_id, kind)
);

CREATE INDEX idx_prices_currency ON prices(currency_id);
";

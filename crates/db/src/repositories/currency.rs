//! Currency repository for database operations.
//!
//! Rows are never hard-deleted: `deleted_at` hides a currency from every
//! read except the seeder's key lookup.

use async_trait::async_trait;
use cambio_core::currency::{Currency, CurrencyStore, StoreError};
use cambio_shared::{CurrencyId, SeedCurrency};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{debug, info};

use crate::entities::currencies;

impl From<currencies::Model> for Currency {
    fn from(model: currencies::Model) -> Self {
        Self {
            id: CurrencyId::new(model.id),
            country: model.country,
            name: model.currency,
            code: model.code,
            symbol: model.symbol,
            symbol_on_right: model.symbol_on_right,
            exchange_rate: model.exchange_rate,
            deleted_at: model.deleted_at.map(|at| at.with_timezone(&Utc)),
        }
    }
}

/// Outcome of a seeding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Rows inserted.
    pub inserted: usize,
    /// Entries that already had a live row.
    pub existing: usize,
}

/// Currency repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CurrencyRepository {
    db: DatabaseConnection,
}

impl CurrencyRepository {
    /// Creates a new currency repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists every live currency in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_active(&self) -> Result<Vec<currencies::Model>, DbErr> {
        currencies::Entity::find()
            .filter(currencies::Column::DeletedAt.is_null())
            .order_by_asc(currencies::Column::Id)
            .all(&self.db)
            .await
    }

    /// Finds the newest live currency with this exact code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<currencies::Model>, DbErr> {
        currencies::Entity::find()
            .filter(currencies::Column::Code.eq(code))
            .filter(currencies::Column::DeletedAt.is_null())
            .order_by_desc(currencies::Column::Id)
            .one(&self.db)
            .await
    }

    /// Finds a live currency by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: CurrencyId) -> Result<Option<currencies::Model>, DbErr> {
        currencies::Entity::find_by_id(id.into_inner())
            .filter(currencies::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
    }

    /// Inserts each seed entry that has no live row with the same country,
    /// name, code and symbol. Existing rows, and their rates, are left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if a query or insert fails; entries processed before
    /// the failure stay written.
    pub async fn upsert_seed(&self, seeds: &[SeedCurrency]) -> Result<SeedReport, DbErr> {
        let mut report = SeedReport::default();

        for seed in seeds {
            let existing = currencies::Entity::find()
                .filter(currencies::Column::Country.eq(&seed.country))
                .filter(currencies::Column::Currency.eq(&seed.currency))
                .filter(currencies::Column::Code.eq(&seed.code))
                .filter(currencies::Column::Symbol.eq(&seed.symbol))
                .filter(currencies::Column::DeletedAt.is_null())
                .one(&self.db)
                .await?;

            if existing.is_some() {
                debug!(code = %seed.code, country = %seed.country, "Currency already seeded");
                report.existing += 1;
                continue;
            }

            let now = Utc::now().into();
            let row = currencies::ActiveModel {
                country: Set(seed.country.clone()),
                currency: Set(seed.currency.clone()),
                code: Set(seed.code.clone()),
                symbol: Set(seed.symbol.clone()),
                symbol_on_right: Set(false),
                exchange_rate: Set(Decimal::ONE),
                created_at: Set(now),
                updated_at: Set(now),
                deleted_at: Set(None),
                ..Default::default()
            };
            row.insert(&self.db).await?;
            report.inserted += 1;
        }

        info!(
            inserted = report.inserted,
            existing = report.existing,
            "Currency seed applied"
        );
        Ok(report)
    }

    /// Sets the exchange rate on every row with `code`, soft-deleted rows
    /// included. Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails (including the positive-rate
    /// check constraint).
    pub async fn set_exchange_rate(&self, code: &str, rate: Decimal) -> Result<u64, DbErr> {
        let result = currencies::Entity::update_many()
            .col_expr(currencies::Column::ExchangeRate, Expr::value(rate))
            .col_expr(currencies::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(currencies::Column::Code.eq(code))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Soft-deletes every live row with `code`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn soft_delete(&self, code: &str) -> Result<u64, DbErr> {
        let result = currencies::Entity::update_many()
            .col_expr(currencies::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(currencies::Column::Code.eq(code))
            .filter(currencies::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;
        info!(code = %code, rows = result.rows_affected, "Currency soft-deleted");
        Ok(result.rows_affected)
    }

    /// Clears the soft-delete marker on every row with `code`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn restore(&self, code: &str) -> Result<u64, DbErr> {
        let result = currencies::Entity::update_many()
            .col_expr(
                currencies::Column::DeletedAt,
                Expr::value(Option::<chrono::DateTime<Utc>>::None),
            )
            .filter(currencies::Column::Code.eq(code))
            .filter(currencies::Column::DeletedAt.is_not_null())
            .exec(&self.db)
            .await?;
        info!(code = %code, rows = result.rows_affected, "Currency restored");
        Ok(result.rows_affected)
    }
}

#[async_trait]
impl CurrencyStore for CurrencyRepository {
    async fn all_active(&self) -> Result<Vec<Currency>, StoreError> {
        let rows = self.find_active().await?;
        Ok(rows.into_iter().map(Currency::from).collect())
    }

    async fn update_exchange_rate(&self, code: &str, rate: Decimal) -> Result<u64, StoreError> {
        Ok(self.set_exchange_rate(code, rate).await?)
    }
}

//! Price repository for database operations.

use cambio_core::currency::{Price, PriceKind, Priceable};
use cambio_shared::{CurrencyId, PriceId};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use tracing::info;

use crate::entities::{prices, sea_orm_active_enums::PriceKind as DbPriceKind};

/// Error types for price operations.
#[derive(Debug, thiserror::Error)]
pub enum PriceError {
    /// The owner already has a price of this kind.
    #[error("{priceable_type} #{priceable_id} already has a '{kind}' price")]
    DuplicatePrice {
        /// Owner type tag.
        priceable_type: String,
        /// Owner identifier.
        priceable_id: i64,
        /// Conflicting kind.
        kind: PriceKind,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<prices::Model> for Price {
    fn from(model: prices::Model) -> Self {
        Self {
            id: Some(PriceId::new(model.id)),
            currency_id: CurrencyId::new(model.currency_id),
            value: model.value,
            kind: model.kind.into(),
            priceable: Some(Priceable::new(model.priceable_type, model.priceable_id)),
        }
    }
}

/// Input for creating or replacing an owner's price.
#[derive(Debug, Clone)]
pub struct CreatePriceInput {
    /// Owning entity.
    pub priceable: Priceable,
    /// Price kind.
    pub kind: PriceKind,
    /// Currency of the value.
    pub currency_id: CurrencyId,
    /// The amount.
    pub value: Decimal,
}

/// Price repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PriceRepository {
    db: DatabaseConnection,
}

impl PriceRepository {
    /// Creates a new price repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a price.
    ///
    /// # Errors
    ///
    /// Returns `DuplicatePrice` if the owner already has a price of this
    /// kind, or a database error.
    pub async fn create(&self, input: CreatePriceInput) -> Result<prices::Model, PriceError> {
        if self.find(&input.priceable, input.kind).await?.is_some() {
            return Err(duplicate(&input));
        }

        let now = Utc::now().into();
        let row = prices::ActiveModel {
            currency_id: Set(input.currency_id.into_inner()),
            priceable_type: Set(input.priceable.priceable_type.clone()),
            priceable_id: Set(input.priceable.priceable_id),
            kind: Set(DbPriceKind::from(input.kind)),
            value: Set(input.value),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        // a concurrent insert can still win the race; the unique key decides
        match row.insert(&self.db).await {
            Ok(model) => Ok(model),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(duplicate(&input))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Creates the owner's price of this kind, or replaces its currency and
    /// value if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn upsert(&self, input: CreatePriceInput) -> Result<prices::Model, PriceError> {
        let Some(existing) = self.find(&input.priceable, input.kind).await? else {
            return self.create(input).await;
        };

        let mut active: prices::ActiveModel = existing.into();
        active.currency_id = Set(input.currency_id.into_inner());
        active.value = Set(input.value);
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&self.db).await?;

        info!(
            priceable_type = %input.priceable.priceable_type,
            priceable_id = input.priceable.priceable_id,
            kind = %input.kind,
            "Price replaced"
        );
        Ok(updated)
    }

    /// Finds the owner's price of one kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(
        &self,
        priceable: &Priceable,
        kind: PriceKind,
    ) -> Result<Option<prices::Model>, DbErr> {
        prices::Entity::find()
            .filter(prices::Column::PriceableType.eq(&priceable.priceable_type))
            .filter(prices::Column::PriceableId.eq(priceable.priceable_id))
            .filter(prices::Column::Kind.eq(DbPriceKind::from(kind)))
            .one(&self.db)
            .await
    }

    /// Lists every price of an owner in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_for_owner(&self, priceable: &Priceable) -> Result<Vec<prices::Model>, DbErr> {
        prices::Entity::find()
            .filter(prices::Column::PriceableType.eq(&priceable.priceable_type))
            .filter(prices::Column::PriceableId.eq(priceable.priceable_id))
            .order_by_asc(prices::Column::Id)
            .all(&self.db)
            .await
    }

    /// Deletes the owner's price of one kind. Returns true if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete(&self, priceable: &Priceable, kind: PriceKind) -> Result<bool, DbErr> {
        let result = prices::Entity::delete_many()
            .filter(prices::Column::PriceableType.eq(&priceable.priceable_type))
            .filter(prices::Column::PriceableId.eq(priceable.priceable_id))
            .filter(prices::Column::Kind.eq(DbPriceKind::from(kind)))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

fn duplicate(input: &CreatePriceInput) -> PriceError {
    PriceError::DuplicatePrice {
        priceable_type: input.priceable.priceable_type.clone(),
        priceable_id: input.priceable.priceable_id,
        kind: input.kind,
    }
}

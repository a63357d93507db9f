//! `SeaORM` active enums.

use cambio_core::currency::PriceKind as CorePriceKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored price kind; the column is a checked `VARCHAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum PriceKind {
    #[sea_orm(string_value = "price")]
    Price,
    #[sea_orm(string_value = "sale")]
    Sale,
    #[sea_orm(string_value = "rrp")]
    Rrp,
    #[sea_orm(string_value = "tax")]
    Tax,
}

impl From<CorePriceKind> for PriceKind {
    fn from(kind: CorePriceKind) -> Self {
        match kind {
            CorePriceKind::Price => Self::Price,
            CorePriceKind::Sale => Self::Sale,
            CorePriceKind::Rrp => Self::Rrp,
            CorePriceKind::Tax => Self::Tax,
        }
    }
}

impl From<PriceKind> for CorePriceKind {
    fn from(kind: PriceKind) -> Self {
        match kind {
            PriceKind::Price => Self::Price,
            PriceKind::Sale => Self::Sale,
            PriceKind::Rrp => Self::Rrp,
            PriceKind::Tax => Self::Tax,
        }
    }
}

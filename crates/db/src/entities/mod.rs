//! `SeaORM` entity definitions.

pub mod currencies;
pub mod prices;
pub mod sea_orm_active_enums;

//! Currency and price value types.

use cambio_shared::{CurrencyId, PriceId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A supported currency as loaded from the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Database-assigned identifier.
    pub id: CurrencyId,
    /// Country the currency belongs to.
    pub country: String,
    /// Human-readable currency name.
    pub name: String,
    /// Currency code, stored as seeded (normally upper case).
    pub code: String,
    /// Display symbol.
    pub symbol: String,
    /// Render the symbol after the number instead of before it.
    pub symbol_on_right: bool,
    /// Rate relative to the base currency (base = 1).
    pub exchange_rate: Decimal,
    /// Soft-delete marker; a set value hides the currency from lookups.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Currency {
    /// Creates a currency with empty country/name and the symbol on the left.
    #[must_use]
    pub fn new(
        id: CurrencyId,
        code: impl Into<String>,
        symbol: impl Into<String>,
        exchange_rate: Decimal,
    ) -> Self {
        Self {
            id,
            country: String::new(),
            name: String::new(),
            code: code.into(),
            symbol: symbol.into(),
            symbol_on_right: false,
            exchange_rate,
            deleted_at: None,
        }
    }

    /// Sets the symbol side.
    #[must_use]
    pub fn with_symbol_on_right(mut self, on_right: bool) -> Self {
        self.symbol_on_right = on_right;
        self
    }

    /// Sets the country and currency name.
    #[must_use]
    pub fn with_names(mut self, country: impl Into<String>, name: impl Into<String>) -> Self {
        self.country = country.into();
        self.name = name.into();
        self
    }

    /// Marks the currency as soft-deleted.
    #[must_use]
    pub fn soft_deleted(mut self, at: DateTime<Utc>) -> Self {
        self.deleted_at = Some(at);
        self
    }

    /// Returns true if the currency carries a soft-delete marker.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// The kind of a stored price. An owner holds at most one price per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceKind {
    /// Base selling price.
    #[default]
    Price,
    /// Sale price.
    Sale,
    /// Recommended retail price.
    Rrp,
    /// Item level tax amount.
    Tax,
}

impl PriceKind {
    /// All kinds, in storage order.
    pub const ALL: [Self; 4] = [Self::Price, Self::Sale, Self::Rrp, Self::Tax];

    /// Returns the storage name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Sale => "sale",
            Self::Rrp => "rrp",
            Self::Tax => "tax",
        }
    }
}

impl std::fmt::Display for PriceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PriceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "price" => Ok(Self::Price),
            "sale" => Ok(Self::Sale),
            "rrp" => Ok(Self::Rrp),
            "tax" => Ok(Self::Tax),
            _ => Err(format!("Unknown price kind: {s}")),
        }
    }
}

/// Polymorphic reference to the entity owning a price.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Priceable {
    /// Owner type tag (e.g. `product`).
    pub priceable_type: String,
    /// Owner identifier.
    pub priceable_id: i64,
}

impl Priceable {
    /// Creates an owner reference.
    #[must_use]
    pub fn new(priceable_type: impl Into<String>, priceable_id: i64) -> Self {
        Self {
            priceable_type: priceable_type.into(),
            priceable_id,
        }
    }
}

/// A monetary value in one currency.
///
/// Stored prices carry an `id` and an owner. Prices produced by conversion
/// are transient: no `id`, no owner. The currency is referenced by id only
/// and resolved through the registry on demand (see the accessors in
/// `price.rs`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Record id; `None` for transient prices.
    pub id: Option<PriceId>,
    /// Currency the value is expressed in.
    pub currency_id: CurrencyId,
    /// The amount.
    pub value: Decimal,
    /// Price kind.
    pub kind: PriceKind,
    /// Owning entity, if stored.
    pub priceable: Option<Priceable>,
}

impl Price {
    /// Creates a transient price of kind `price`.
    #[must_use]
    pub fn new(currency_id: CurrencyId, value: Decimal) -> Self {
        Self {
            id: None,
            currency_id,
            value,
            kind: PriceKind::default(),
            priceable: None,
        }
    }

    /// Sets the price kind.
    #[must_use]
    pub fn with_kind(mut self, kind: PriceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Attaches the price to an owner.
    #[must_use]
    pub fn attached_to(mut self, priceable: Priceable) -> Self {
        self.priceable = Some(priceable);
        self
    }

    /// Returns true if the price has not been persisted.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        self.id.is_none()
    }
}

/// Debug/serialization view of a price with all derived fields resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceSummary {
    /// Currency id.
    pub currency_id: CurrencyId,
    /// Currency code.
    pub currency_code: String,
    /// Value rounded to two decimal places.
    pub value: Decimal,
    /// Fully formatted display string.
    pub formatted: String,
}

//! Typed IDs for type-safe record references.
//!
//! Currency and price rows both use `BIGSERIAL` keys, so a bare `i64` is easy
//! to pass in the wrong place. The wrappers keep them apart.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers around database-assigned integers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Creates an ID from a raw database key.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw database key.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

typed_id!(CurrencyId, "Unique identifier for a currency record.");
typed_id!(PriceId, "Unique identifier for a stored price record.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_roundtrip_raw() {
        let id = CurrencyId::new(42);
        assert_eq!(id.into_inner(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(CurrencyId::from(42), id);
    }

    #[test]
    fn test_typed_id_display() {
        assert_eq!(PriceId::new(7).to_string(), "7");
    }

    #[test]
    fn test_typed_id_from_str() {
        assert_eq!(CurrencyId::from_str(" 12 ").unwrap(), CurrencyId::new(12));
        assert!(CurrencyId::from_str("twelve").is_err());
    }
}

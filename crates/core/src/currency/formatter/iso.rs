//! Formatter rounding to each currency's ISO 4217 minor units.

use cambio_shared::FormatterOptions;
use rust_decimal::Decimal;
use rusty_money::iso;

use super::{CurrencyFormatter, SymbolFormatter};
use crate::currency::types::Currency;

/// Looks the code up in the ISO 4217 table shipped with `rusty-money` and
/// rounds to that currency's exponent (`JPY` has none, `BHD` has three).
///
/// Symbol, symbol side and separators still come from the registry record
/// and the formatter options. Codes missing from the ISO table use the
/// configured `decimals`, exactly like a [`SymbolFormatter`].
#[derive(Debug, Clone, Default)]
pub struct IsoFormatter {
    placement: SymbolFormatter,
}

impl IsoFormatter {
    /// Builds the formatter; `decimals` only applies to non-ISO codes.
    #[must_use]
    pub fn from_options(options: &FormatterOptions) -> Self {
        Self {
            placement: SymbolFormatter::from_options(options),
        }
    }
}

impl CurrencyFormatter for IsoFormatter {
    fn format(&self, value: Decimal, currency: &Currency, include_symbol: bool) -> String {
        match iso::find(&currency.code) {
            Some(iso_currency) => {
                self.placement
                    .render(value, currency, include_symbol, iso_currency.exponent)
            }
            None => self.placement.format(value, currency, include_symbol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cambio_shared::CurrencyId;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn eur() -> Currency {
        Currency::new(CurrencyId::new(2), "EUR", "€", dec!(0.9)).with_symbol_on_right(true)
    }

    #[test]
    fn test_symbol_follows_registry_side() {
        let formatted = IsoFormatter::default().format(dec!(90), &eur(), true);
        assert_eq!(formatted, "90.00€");
        assert!(formatted.contains("90.00"));
        assert!(formatted.ends_with('€'));
    }

    #[test]
    fn test_registry_symbol_is_kept() {
        let usd = Currency::new(CurrencyId::new(1), "USD", "US$", dec!(1));
        let formatted = IsoFormatter::default().format(dec!(1234.5), &usd, true);
        assert_eq!(formatted, "US$1,234.50");
    }

    #[rstest]
    #[case("JPY", dec!(1234.5), "¥1,235")]
    #[case("BHD", dec!(1.2345), "¥1.235")]
    #[case("USD", dec!(-0.004), "¥0.00")]
    fn test_rounds_to_iso_minor_units(
        #[case] code: &str,
        #[case] value: Decimal,
        #[case] expected: &str,
    ) {
        let currency = Currency::new(CurrencyId::new(3), code, "¥", dec!(1));
        assert_eq!(IsoFormatter::default().format(value, &currency, true), expected);
    }

    #[test]
    fn test_options_apply_to_separators_not_decimals() {
        let formatter = IsoFormatter::from_options(&FormatterOptions {
            decimal_separator: Some(",".into()),
            thousands_separator: Some(".".into()),
            decimals: Some(4),
            symbol_spacing: Some(true),
        });
        assert_eq!(formatter.format(dec!(1234.5), &eur(), true), "1.234,50 €");
        assert_eq!(formatter.format(dec!(-1234.5), &eur(), false), "-1.234,50");
    }

    #[test]
    fn test_unknown_code_uses_configured_decimals() {
        let points = Currency::new(CurrencyId::new(9), "PTS", "pts", dec!(100))
            .with_symbol_on_right(true);
        let formatter = IsoFormatter::from_options(&FormatterOptions {
            decimals: Some(1),
            symbol_spacing: Some(true),
            ..FormatterOptions::default()
        });
        assert_eq!(formatter.format(dec!(12.25), &points, true), "12.3 pts");
    }
}

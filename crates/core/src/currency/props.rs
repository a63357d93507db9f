//! Property-based tests for currency conversion and lookup.

use std::sync::Arc;

use cambio_shared::CurrencyId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::context::CurrencyContext;
use super::formatter::{FormatterRegistry, round_money};
use super::registry::CurrencyRegistry;
use super::service::CurrencyService;
use super::test_support::symbol_config;
use super::types::{Currency, Price};

/// Strategy to generate amounts (-1,000,000.00 to 1,000,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate exchange rates (0.0001 to 1000.0000).
fn rate() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn two_currency_service(rate_a: Decimal, rate_b: Decimal) -> CurrencyService {
    let registry = CurrencyRegistry::new(vec![
        Currency::new(CurrencyId::new(1), "USD", "$", Decimal::ONE),
        Currency::new(CurrencyId::new(2), "AAA", "a", rate_a),
        Currency::new(CurrencyId::new(3), "BBB", "b", rate_b).with_symbol_on_right(true),
    ]);
    CurrencyService::new(&symbol_config(), &FormatterRegistry::default(), registry).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // =========================================================================
    // Conversion formula
    // =========================================================================

    /// Plain conversion equals `round(x * rB / rA, 2)`.
    #[test]
    fn prop_conversion_formula(x in amount(), ra in rate(), rb in rate()) {
        let service = two_currency_service(ra, rb);
        let ctx = CurrencyContext::new(Arc::new(service));
        let expected = round_money(x * rb / ra, 2);
        let converted = ctx.convert(x, Some("BBB"), Some("AAA"), false).unwrap();
        prop_assert_eq!(converted, expected.to_string());
    }

    /// Converting to the same code returns the amount unchanged.
    #[test]
    fn prop_identity_is_exact(cents in any::<i64>(), scale in 0u32..8, ra in rate()) {
        let x = Decimal::new(cents, scale);
        let service = two_currency_service(ra, Decimal::ONE);
        prop_assert_eq!(service.convert_value(x, "AAA", "AAA").unwrap(), x);
    }

    /// A->B->A stays within the rounding error of both legs.
    #[test]
    fn prop_round_trip_within_tolerance(
        x in amount(),
        ra in (1i64..100_000i64).prop_map(|v| Decimal::new(v, 3)),
        rb in (1i64..100_000i64).prop_map(|v| Decimal::new(v, 3)),
    ) {
        let service = two_currency_service(ra, rb);
        let there = service.convert_value(x, "AAA", "BBB").unwrap();
        let back = service.convert_value(there, "BBB", "AAA").unwrap();
        let half_cent = Decimal::new(5, 3);
        let tolerance = half_cent * ra / rb + half_cent;
        prop_assert!((back - x).abs() <= tolerance, "{x} -> {there} -> {back}");
    }

    /// Formatting always places the symbol on the configured side.
    #[test]
    fn prop_symbol_side(x in amount(), rb in rate()) {
        let service = two_currency_service(Decimal::ONE, rb);
        let right = service.format(x, Some("BBB"), true).unwrap();
        let left = service.format(x, Some("USD"), true).unwrap();
        prop_assert!(right.ends_with('b'));
        prop_assert!(left.trim_start_matches('-').starts_with('$'));
    }

    // =========================================================================
    // Registry lookups
    // =========================================================================

    /// Duplicated codes resolve to the last row; duplicated ids to the first.
    #[test]
    fn prop_lookup_order(rates in prop::collection::vec(rate(), 1..8)) {
        let rows: Vec<Currency> = rates
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let id = i64::try_from(i / 2).unwrap();
                Currency::new(CurrencyId::new(id), "DUP", format!("s{i}"), *r)
            })
            .collect();
        let registry = CurrencyRegistry::new(rows.clone());

        prop_assert_eq!(registry.by_code("DUP"), rows.last());
        prop_assert_eq!(registry.by_id(CurrencyId::new(0)), rows.first());
    }

    /// Soft-deleted rows never reach the registry.
    #[test]
    fn prop_soft_deleted_never_listed(flags in prop::collection::vec(any::<bool>(), 0..12)) {
        let rows: Vec<Currency> = flags
            .iter()
            .enumerate()
            .map(|(i, deleted)| {
                let id = i64::try_from(i).unwrap();
                let currency = Currency::new(CurrencyId::new(id), format!("C{i:02}"), "c", Decimal::ONE);
                if *deleted { currency.soft_deleted(chrono::Utc::now()) } else { currency }
            })
            .collect();
        let registry = CurrencyRegistry::new(rows);

        prop_assert_eq!(registry.len(), flags.iter().filter(|d| !**d).count());
        prop_assert!(registry.all().iter().all(|c| !c.is_deleted()));
        prop_assert!(registry.active().iter().all(|c| !c.is_deleted()));
    }

    // =========================================================================
    // Display currency
    // =========================================================================

    /// A price already in the active currency is returned as-is.
    #[test]
    fn prop_display_currency_identity(cents in any::<i32>(), rb in rate()) {
        let mut ctx = CurrencyContext::new(Arc::new(two_currency_service(Decimal::ONE, rb)));
        ctx.set_user_currency("bbb");
        let price = Price::new(CurrencyId::new(3), Decimal::new(i64::from(cents), 3));
        let shown = ctx.price_in_active_currency(&price).unwrap();
        prop_assert!(std::ptr::eq(shown.as_ref(), &price));
    }
}

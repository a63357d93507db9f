//! Integration tests for CurrencyRepository.
//!
//! Run with `cargo test -p cambio-db -- --ignored` against a Postgres
//! database named by `DATABASE_URL`.

mod common;

use cambio_core::currency::{CurrencyService, CurrencyStore, FormatterRegistry};
use cambio_db::CurrencyRepository;
use cambio_shared::{CurrencyConfig, SeedCurrency};
use common::{setup, unique_code};
use rust_decimal_macros::dec;

fn seed(country: &str, code: &str, symbol: &str) -> SeedCurrency {
    SeedCurrency {
        country: country.to_string(),
        currency: format!("{code} money"),
        code: code.to_string(),
        symbol: symbol.to_string(),
    }
}

// ============================================================================
// Seeding
// ============================================================================
#[tokio::test]
#[ignore = "requires a Postgres database (set DATABASE_URL)"]
async fn test_upsert_seed_is_idempotent() {
    let repo = CurrencyRepository::new(setup().await);
    let code = unique_code("S");
    let seeds = vec![seed("Testland", &code, "t$")];

    let first = repo.upsert_seed(&seeds).await.unwrap();
    assert_eq!(first.inserted, 1);

    let second = repo.upsert_seed(&seeds).await.unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.existing, 1);

    let row = repo.find_by_code(&code).await.unwrap().unwrap();
    assert_eq!(row.exchange_rate, dec!(1));
    assert!(!row.symbol_on_right);
}

// ============================================================================
// Lookups
// ============================================================================
#[tokio::test]
#[ignore = "requires a Postgres database (set DATABASE_URL)"]
async fn test_find_by_code_returns_newest_row() {
    let repo = CurrencyRepository::new(setup().await);
    let code = unique_code("D");
    repo.upsert_seed(&[seed("Oldland", &code, "o"), seed("Newland", &code, "n")])
        .await
        .unwrap();

    let found = repo.find_by_code(&code).await.unwrap().unwrap();
    assert_eq!(found.country, "Newland");
    assert!(repo.find_by_code("NOPE_CODE").await.unwrap().is_none());
}

// ============================================================================
// Soft delete / restore
// ============================================================================
#[tokio::test]
#[ignore = "requires a Postgres database (set DATABASE_URL)"]
async fn test_soft_delete_hides_and_restore_returns() {
    let repo = CurrencyRepository::new(setup().await);
    let code = unique_code("X");
    repo.upsert_seed(&[seed("Hideland", &code, "h")]).await.unwrap();
    let id = repo.find_by_code(&code).await.unwrap().unwrap().id;

    assert_eq!(repo.soft_delete(&code).await.unwrap(), 1);
    assert!(repo.find_by_code(&code).await.unwrap().is_none());
    assert!(repo.find_by_id(id.into()).await.unwrap().is_none());
    let active = repo.all_active().await.unwrap();
    assert!(active.iter().all(|c| c.code != code));

    assert_eq!(repo.restore(&code).await.unwrap(), 1);
    assert!(repo.find_by_code(&code).await.unwrap().is_some());
}

// ============================================================================
// Exchange rates through the service
// ============================================================================
#[tokio::test]
#[ignore = "requires a Postgres database (set DATABASE_URL)"]
async fn test_rate_update_visible_after_reload() {
    let repo = CurrencyRepository::new(setup().await);
    let code = unique_code("R");
    repo.upsert_seed(&[seed("Rateland", &code, "r")]).await.unwrap();

    let service = CurrencyService::load(&CurrencyConfig::default(), &FormatterRegistry::default(), &repo)
        .await
        .unwrap();
    assert_eq!(service.exchange_rate(&code).unwrap(), dec!(1));

    let written = service.update_exchange_rate(&repo, &code, dec!(2.5)).await.unwrap();
    assert_eq!(written, 1);
    assert_eq!(service.exchange_rate(&code).unwrap(), dec!(1));

    service.reload(&repo).await.unwrap();
    assert_eq!(service.exchange_rate(&code).unwrap(), dec!(2.5));
}

#[tokio::test]
#[ignore = "requires a Postgres database (set DATABASE_URL)"]
async fn test_check_constraint_rejects_non_positive_rate() {
    let repo = CurrencyRepository::new(setup().await);
    let code = unique_code("C");
    repo.upsert_seed(&[seed("Checkland", &code, "c")]).await.unwrap();

    assert!(repo.set_exchange_rate(&code, dec!(0)).await.is_err());
    assert!(repo.update_exchange_rate(&code, dec!(-1)).await.is_err());
}

//! Currency seeder for Cambio.
//!
//! Inserts every `[country, currency, code, symbol]` entry of
//! `currency.currencies` that has no live row yet. Existing rows and their
//! exchange rates are left untouched, so the seeder is safe to re-run.
//!
//! Usage: cargo run --bin seeder

use cambio_db::CurrencyRepository;
use cambio_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = cambio_db::connect(&config.database.url).await?;

    let seeds = &config.currency.currencies;
    if seeds.is_empty() {
        println!("No currencies configured under currency.currencies, nothing to seed.");
        return Ok(());
    }

    println!("Seeding {} currencies...", seeds.len());
    let report = CurrencyRepository::new(db).upsert_seed(seeds).await?;
    println!(
        "  {} inserted, {} already present",
        report.inserted, report.existing
    );

    println!("Seeding complete!");
    Ok(())
}

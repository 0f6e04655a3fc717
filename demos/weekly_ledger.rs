//! Walk the reconciliation ledger and print one material's weekly lines

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use scrapyard_core::utils::MemoryStore;
use scrapyard_core::{Material, ReconciliationEngine, SaleChannel};

fn dec(s: &str) -> BigDecimal {
    s.parse().unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryStore::new();
    let company = store.add_company("Recicladora del Norte");

    store.add_prior_balance(company.id, 2023, Material::Fierro, dec("100.000"), dec("500.00"));
    store.add_purchase(company.id, Material::Fierro, date(2024, 1, 16), dec("20.000"), dec("5.00"))?;
    store.add_sale(
        company.id,
        SaleChannel::Patio,
        Material::Fierro,
        date(2024, 1, 17),
        dec("10.000"),
        dec("6.00"),
    )?;
    store.add_sale(
        company.id,
        SaleChannel::General,
        Material::Fierro,
        date(2024, 1, 18),
        dec("5.000"),
        dec("6.00"),
    )?;

    let engine = ReconciliationEngine::new(store);
    let weeks = engine.run(company.id, 2024).await?;

    println!("FIERRO, January 2024:");
    for week in weeks.iter().filter(|w| w.month == 1) {
        let lines = week.material(Material::Fierro);
        println!(
            "  semana {} ({} - {})",
            week.index, week.range.start, week.range.end
        );
        println!("    semana anterior {:>12} kg {:>12}", lines.previous_week.kgs, lines.previous_week.amount);
        println!("    compras semana  {:>12} kg {:>12}", lines.purchases.kgs, lines.purchases.amount);
        println!("    ventas patio    {:>12} kg {:>12}", lines.patio_sales.kgs, lines.patio_sales.amount);
        println!("    ventas general  {:>12} kg {:>12}", lines.general_sales.kgs, lines.general_sales.amount);
        println!("    TOTAL           {:>12} kg {:>12}", lines.closing.kgs, lines.closing.amount);
    }

    Ok(())
}

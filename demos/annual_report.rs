//! Generate a full-year inventory workbook from sample data

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use scrapyard_core::utils::MemoryStore;
use scrapyard_core::{InventoryReporter, Material, SaleChannel};

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

    // Inventory carried in from last year.
    store.add_prior_balance(company.id, 2023, Material::Fierro, dec("350.000"), dec("1750.00"));
    store.add_prior_balance(company.id, 2023, Material::Cobre, dec("22.500"), dec("1800.00"));

    // A quiet but plausible year of yard activity.
    store.add_purchase(company.id, Material::Fierro, date(2024, 1, 9), dec("480.000"), dec("5.20"))?;
    store.add_purchase(company.id, Material::Lamina, date(2024, 2, 14), dec("210.000"), dec("4.10"))?;
    store.add_purchase(company.id, Material::Cobre, date(2024, 3, 5), dec("18.000"), dec("82.00"))?;

    store.add_sale(
        company.id,
        SaleChannel::General,
        Material::Fierro,
        date(2024, 2, 20),
        dec("600.000"),
        dec("6.40"),
    )?;
    let patio_sale = store.add_sale(
        company.id,
        SaleChannel::Patio,
        Material::Cobre,
        date(2024, 3, 8),
        dec("12.000"),
        dec("0"),
    )?;
    // The patio price was settled two days later.
    store.reprice_patio_sale(patio_sale.id, dec("95.00"))?;

    store.add_expense(company.id, date(2024, 3, 1), "renta del patio", dec("900.00"));

    let reporter = InventoryReporter::new(store);
    let report = reporter.inventory_report(company.id, 2024).await?;

    std::fs::write(&report.filename, &report.bytes)?;
    println!(
        "wrote {} ({} bytes, one sheet per month)",
        report.filename,
        report.bytes.len()
    );

    Ok(())
}

//! Transaction aggregation: per-material totals over a date range
//!
//! Aggregates are the only view of transactions the reconciliation ledger
//! ever sees. A material with no activity reports exact zeros, so the ledger
//! treats "no rows" and "zero activity" identically.

use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use log::debug;
use uuid::Uuid;

use crate::traits::InventoryStore;
use crate::types::*;

/// Per-material totals for one aggregation window.
///
/// `get` never fails and never returns an absent value: materials without
/// matching transactions yield zero totals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeekTotals {
    totals: HashMap<Material, MaterialTotals>,
}

impl WeekTotals {
    /// Totals for one material; zero when the material saw no activity.
    pub fn get(&self, material: Material) -> MaterialTotals {
        self.totals.get(&material).cloned().unwrap_or_default()
    }

    /// True when any catalog material has a non-zero total.
    pub fn has_activity(&self) -> bool {
        self.totals.values().any(|t| !t.is_zero())
    }

    fn accumulate(&mut self, material: Material, kgs: &BigDecimal, amount: &BigDecimal) {
        let entry = self.totals.entry(material).or_default();
        entry.kgs = &entry.kgs + kgs;
        entry.amount = &entry.amount + amount;
    }
}

impl FromIterator<(Material, MaterialTotals)> for WeekTotals {
    fn from_iter<I: IntoIterator<Item = (Material, MaterialTotals)>>(iter: I) -> Self {
        let mut totals = WeekTotals::default();
        for (material, t) in iter {
            totals.accumulate(material, &t.kgs, &t.amount);
        }
        totals
    }
}

/// Sum purchase lines per material for `[range.start, range.end]` inclusive.
pub async fn purchase_totals<S: InventoryStore>(
    store: &S,
    company_id: Uuid,
    range: &WeekRange,
) -> InventoryResult<WeekTotals> {
    let lines = store
        .list_purchases(company_id, None, range.start, range.end)
        .await?;
    debug!(
        "aggregated {} purchase lines for {}..{}",
        lines.len(),
        range.start,
        range.end
    );

    let mut totals = WeekTotals::default();
    for line in &lines {
        totals.accumulate(line.material, &line.kgs, &line.amount);
    }
    Ok(totals)
}

/// Sum sales on one channel per material for `[range.start, range.end]`.
pub async fn sale_totals<S: InventoryStore>(
    store: &S,
    company_id: Uuid,
    channel: SaleChannel,
    range: &WeekRange,
) -> InventoryResult<WeekTotals> {
    let sales = store
        .list_sales(company_id, channel, None, range.start, range.end)
        .await?;
    debug!(
        "aggregated {} '{}' sales for {}..{}",
        sales.len(),
        channel.label(),
        range.start,
        range.end
    );

    let mut totals = WeekTotals::default();
    for sale in &sales {
        totals.accumulate(sale.material, &sale.kgs, &sale.amount);
    }
    Ok(totals)
}

/// Sum expenses for `[start, end]`; used by the reporting pipeline to decide
/// whether a period has anything to export.
pub async fn expense_total<S: InventoryStore>(
    store: &S,
    company_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> InventoryResult<BigDecimal> {
    let expenses = store.list_expenses(company_id, start, end).await?;
    Ok(expenses
        .iter()
        .fold(BigDecimal::from(0), |acc, e| acc + &e.amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStore;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn week(y: i32, m: u32, d1: u32, d2: u32) -> WeekRange {
        WeekRange {
            start: date(y, m, d1),
            end: date(y, m, d2),
        }
    }

    #[tokio::test]
    async fn materials_without_activity_report_zero() {
        let store = MemoryStore::new();
        let company = store.add_company("Acme");

        let totals = purchase_totals(&store, company.id, &week(2024, 1, 1, 7))
            .await
            .unwrap();
        for material in Material::ALL {
            assert!(totals.get(material).is_zero());
        }
        assert!(!totals.has_activity());
    }

    #[tokio::test]
    async fn purchases_sum_across_lines_of_one_material() {
        let store = MemoryStore::new();
        let company = store.add_company("Acme");
        store
            .add_purchase(company.id, Material::Fierro, date(2024, 1, 2), dec("60.000"), dec("5.00"))
            .unwrap();
        store
            .add_purchase(company.id, Material::Fierro, date(2024, 1, 5), dec("40.000"), dec("5.00"))
            .unwrap();
        store
            .add_purchase(company.id, Material::Cobre, date(2024, 1, 3), dec("10.000"), dec("80.00"))
            .unwrap();

        let totals = purchase_totals(&store, company.id, &week(2024, 1, 1, 7))
            .await
            .unwrap();
        assert_eq!(totals.get(Material::Fierro).kgs, dec("100.000"));
        assert_eq!(totals.get(Material::Fierro).amount, dec("500.00"));
        assert_eq!(totals.get(Material::Cobre).amount, dec("800.00"));
        assert!(totals.has_activity());
    }

    #[tokio::test]
    async fn date_bounds_are_inclusive() {
        let store = MemoryStore::new();
        let company = store.add_company("Acme");
        store
            .add_purchase(company.id, Material::Fierro, date(2024, 1, 1), dec("1.000"), dec("5.00"))
            .unwrap();
        store
            .add_purchase(company.id, Material::Fierro, date(2024, 1, 7), dec("2.000"), dec("5.00"))
            .unwrap();
        store
            .add_purchase(company.id, Material::Fierro, date(2024, 1, 8), dec("4.000"), dec("5.00"))
            .unwrap();

        let totals = purchase_totals(&store, company.id, &week(2024, 1, 1, 7))
            .await
            .unwrap();
        assert_eq!(totals.get(Material::Fierro).kgs, dec("3.000"));
    }

    #[tokio::test]
    async fn sale_channels_aggregate_independently() {
        let store = MemoryStore::new();
        let company = store.add_company("Acme");
        store
            .add_sale(
                company.id,
                SaleChannel::Patio,
                Material::Lamina,
                date(2024, 2, 6),
                dec("10.000"),
                dec("6.00"),
            )
            .unwrap();
        store
            .add_sale(
                company.id,
                SaleChannel::General,
                Material::Lamina,
                date(2024, 2, 6),
                dec("5.000"),
                dec("6.00"),
            )
            .unwrap();

        let range = week(2024, 2, 5, 11);
        let patio = sale_totals(&store, company.id, SaleChannel::Patio, &range)
            .await
            .unwrap();
        let general = sale_totals(&store, company.id, SaleChannel::General, &range)
            .await
            .unwrap();
        assert_eq!(patio.get(Material::Lamina).kgs, dec("10.000"));
        assert_eq!(general.get(Material::Lamina).kgs, dec("5.000"));
    }

    #[tokio::test]
    async fn expense_total_sums_the_window() {
        let store = MemoryStore::new();
        let company = store.add_company("Acme");
        store.add_expense(company.id, date(2024, 3, 5), "diesel", dec("150.00"));
        store.add_expense(company.id, date(2024, 3, 6), "gloves", dec("50.00"));
        store.add_expense(company.id, date(2024, 4, 1), "rent", dec("900.00"));

        let total = expense_total(&store, company.id, date(2024, 3, 1), date(2024, 3, 31))
            .await
            .unwrap();
        assert_eq!(total, dec("200.00"));
    }
}

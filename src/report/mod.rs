//! Report orchestration: validate, reconcile, check for data, render

pub mod workbook;

pub use workbook::render_inventory_workbook;

use bigdecimal::BigDecimal;
use log::info;
use uuid::Uuid;

use crate::aggregate;
use crate::calendar::year_span;
use crate::ledger::{ReconciliationEngine, WeekLedger};
use crate::traits::InventoryStore;
use crate::types::*;
use crate::utils::validation::validate_year;

/// A finished report: suggested filename plus the document bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Suggested download name for a year's inventory report.
pub fn report_filename(year: i32) -> String {
    format!("inventario_{year}.xlsx")
}

/// Drives the full reporting pipeline for one storage backend.
///
/// Generation is atomic: any failure along the pipeline surfaces as an
/// error and no partial document is ever produced.
pub struct InventoryReporter<S: InventoryStore + Clone> {
    store: S,
    engine: ReconciliationEngine<S>,
}

impl<S: InventoryStore + Clone> InventoryReporter<S> {
    /// Create a new reporter over the given storage backend
    pub fn new(store: S) -> Self {
        Self {
            engine: ReconciliationEngine::new(store.clone()),
            store,
        }
    }

    /// Generate the weekly inventory workbook for a (company, year).
    ///
    /// Fails with `EmptyResult` when the year has no purchases, no sales,
    /// no expenses, and no prior balances: callers present that as
    /// "no data to export" rather than shipping a hollow workbook.
    pub async fn inventory_report(
        &self,
        company_id: Uuid,
        year: i32,
    ) -> InventoryResult<RenderedReport> {
        validate_year(year)?;
        let company = self
            .store
            .get_company(company_id)
            .await?
            .ok_or(InventoryError::CompanyNotFound(company_id))?;

        let weeks = self.engine.run(company_id, year).await?;
        self.ensure_exportable(company_id, year, &weeks).await?;

        let bytes = render_inventory_workbook(&company.name, year, &weeks)?;
        info!(
            "rendered inventory report for '{}' {year}: {} weeks, {} bytes",
            company.name,
            weeks.len(),
            bytes.len()
        );
        Ok(RenderedReport {
            filename: report_filename(year),
            bytes,
        })
    }

    /// Run the reconciliation only, without rendering.
    pub async fn reconcile(&self, company_id: Uuid, year: i32) -> InventoryResult<Vec<WeekLedger>> {
        self.engine.run(company_id, year).await
    }

    async fn ensure_exportable(
        &self,
        company_id: Uuid,
        year: i32,
        weeks: &[WeekLedger],
    ) -> InventoryResult<()> {
        if weeks.iter().any(WeekLedger::has_activity) {
            return Ok(());
        }

        let span = year_span(year)?;
        let expenses =
            aggregate::expense_total(&self.store, company_id, span.start, span.end).await?;
        if expenses != BigDecimal::from(0) {
            return Ok(());
        }

        if !self.store.prior_balances(company_id, year - 1).await?.is_empty() {
            return Ok(());
        }

        Err(InventoryError::EmptyResult)
    }
}

//! The reconciliation engine: orchestrates the year-long weekly carry walk

use log::debug;
use uuid::Uuid;

use crate::aggregate;
use crate::calendar::weeks_of_month;
use crate::ledger::week::{seed_carry_from_snapshots, settle_week, WeekLedger};
use crate::traits::InventoryStore;
use crate::types::*;
use crate::utils::validation::validate_year;

/// Walks a company's year week by week, threading the per-material carry
/// balance through every settlement.
///
/// Weeks are processed strictly in chronological order, January week 1
/// through December's last week: each week's closing state is the next
/// week's opening state, and the opening state of January week 1 is seeded
/// from the previous year's balance snapshots.
pub struct ReconciliationEngine<S: InventoryStore> {
    store: S,
}

impl<S: InventoryStore> ReconciliationEngine<S> {
    /// Create a new engine over the given storage backend
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the full-year reconciliation for a company.
    ///
    /// Fails fast with `CompanyNotFound` for an unknown company and
    /// `Validation` for an unsupported year; storage errors from the
    /// aggregation queries propagate unchanged, with no retries.
    pub async fn run(&self, company_id: Uuid, year: i32) -> InventoryResult<Vec<WeekLedger>> {
        validate_year(year)?;

        if self.store.get_company(company_id).await?.is_none() {
            return Err(InventoryError::CompanyNotFound(company_id));
        }

        let snapshots = self.store.prior_balances(company_id, year - 1).await?;
        let mut carry = seed_carry_from_snapshots(&snapshots);
        debug!(
            "seeded carry for {year} from {} snapshot rows of {}",
            snapshots.len(),
            year - 1
        );

        let mut weeks = Vec::new();
        for month in 1..=12u32 {
            for (i, range) in weeks_of_month(year, month)?.into_iter().enumerate() {
                let purchases = aggregate::purchase_totals(&self.store, company_id, &range).await?;
                let patio =
                    aggregate::sale_totals(&self.store, company_id, SaleChannel::Patio, &range)
                        .await?;
                let general =
                    aggregate::sale_totals(&self.store, company_id, SaleChannel::General, &range)
                        .await?;

                let (week, next_carry) = settle_week(
                    month,
                    (i + 1) as u32,
                    range,
                    &carry,
                    &purchases,
                    &patio,
                    &general,
                );
                carry = next_carry;
                weeks.push(week);
            }
        }

        Ok(weeks)
    }
}

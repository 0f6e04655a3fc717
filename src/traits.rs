//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::types::*;

/// Storage abstraction for the reconciliation core
///
/// The engine only ever reads; all writes happen in the surrounding CRUD
/// application. Implementing these methods over any backend (PostgreSQL,
/// SQLite, in-memory, ...) is enough to run reconciliations and reports.
///
/// A query that matches no rows is a successful empty result; implementations
/// return `InventoryError::Storage` only when the backend itself is
/// unreachable or misbehaving.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Look up a company by id
    async fn get_company(&self, company_id: Uuid) -> InventoryResult<Option<Company>>;

    /// List all companies
    async fn list_companies(&self) -> InventoryResult<Vec<Company>>;

    /// Purchase lines for a company whose date falls in `[start, end]`,
    /// optionally restricted to one material
    async fn list_purchases(
        &self,
        company_id: Uuid,
        material: Option<Material>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> InventoryResult<Vec<PurchaseLine>>;

    /// Sales on one channel for a company whose date falls in `[start, end]`,
    /// optionally restricted to one material
    async fn list_sales(
        &self,
        company_id: Uuid,
        channel: SaleChannel,
        material: Option<Material>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> InventoryResult<Vec<SaleRecord>>;

    /// Expenses for a company whose date falls in `[start, end]`
    async fn list_expenses(
        &self,
        company_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> InventoryResult<Vec<ExpenseRecord>>;

    /// All manually entered balance snapshots for a (company, year)
    async fn prior_balances(
        &self,
        company_id: Uuid,
        year: i32,
    ) -> InventoryResult<Vec<PriorBalanceSnapshot>>;
}

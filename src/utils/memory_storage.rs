//! In-memory storage implementation for testing and demos

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::traits::*;
use crate::types::*;
use crate::utils::validation::{validate_quantity, validate_unit_price};

/// In-memory `InventoryStore` backend.
///
/// Cloning is cheap and clones share the same underlying data, mirroring how
/// a pooled database handle behaves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    companies: Arc<RwLock<HashMap<Uuid, Company>>>,
    purchases: Arc<RwLock<HashMap<Uuid, PurchaseLine>>>,
    sales: Arc<RwLock<HashMap<Uuid, SaleRecord>>>,
    expenses: Arc<RwLock<HashMap<Uuid, ExpenseRecord>>>,
    balances: Arc<RwLock<Vec<PriorBalanceSnapshot>>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.companies.write().unwrap().clear();
        self.purchases.write().unwrap().clear();
        self.sales.write().unwrap().clear();
        self.expenses.write().unwrap().clear();
        self.balances.write().unwrap().clear();
    }

    /// Register a company and return it
    pub fn add_company(&self, name: &str) -> Company {
        let company = Company {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        self.companies
            .write()
            .unwrap()
            .insert(company.id, company.clone());
        company
    }

    /// Record a single-line purchase batch
    pub fn add_purchase(
        &self,
        company_id: Uuid,
        material: Material,
        date: NaiveDate,
        kgs: BigDecimal,
        unit_price: BigDecimal,
    ) -> InventoryResult<PurchaseLine> {
        validate_quantity(&kgs)?;
        validate_unit_price(&unit_price)?;
        let line = PurchaseLine::new(Uuid::new_v4(), company_id, material, date, kgs, unit_price);
        self.purchases
            .write()
            .unwrap()
            .insert(line.id, line.clone());
        Ok(line)
    }

    /// Record a sale on the given channel
    pub fn add_sale(
        &self,
        company_id: Uuid,
        channel: SaleChannel,
        material: Material,
        date: NaiveDate,
        kgs: BigDecimal,
        unit_price: BigDecimal,
    ) -> InventoryResult<SaleRecord> {
        validate_quantity(&kgs)?;
        validate_unit_price(&unit_price)?;
        let sale = SaleRecord::new(company_id, channel, material, date, kgs, unit_price);
        self.sales.write().unwrap().insert(sale.id, sale.clone());
        Ok(sale)
    }

    /// Correct the unit price of a patio sale after the fact
    pub fn reprice_patio_sale(
        &self,
        sale_id: Uuid,
        unit_price: BigDecimal,
    ) -> InventoryResult<SaleRecord> {
        validate_unit_price(&unit_price)?;
        let mut sales = self.sales.write().unwrap();
        let sale = sales.get_mut(&sale_id).ok_or_else(|| {
            InventoryError::Validation(format!("sale not found: {sale_id}"))
        })?;
        sale.reprice(unit_price)?;
        Ok(sale.clone())
    }

    /// Record an expense
    pub fn add_expense(
        &self,
        company_id: Uuid,
        date: NaiveDate,
        description: &str,
        amount: BigDecimal,
    ) -> ExpenseRecord {
        let expense = ExpenseRecord {
            id: Uuid::new_v4(),
            company_id,
            description: description.to_string(),
            amount,
            date,
        };
        self.expenses
            .write()
            .unwrap()
            .insert(expense.id, expense.clone());
        expense
    }

    /// Record a manually entered balance snapshot
    pub fn add_prior_balance(
        &self,
        company_id: Uuid,
        year: i32,
        material: Material,
        kgs: BigDecimal,
        amount: BigDecimal,
    ) {
        self.balances.write().unwrap().push(PriorBalanceSnapshot {
            company_id,
            year,
            material,
            kgs,
            amount,
            note: None,
        });
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn get_company(&self, company_id: Uuid) -> InventoryResult<Option<Company>> {
        Ok(self.companies.read().unwrap().get(&company_id).cloned())
    }

    async fn list_companies(&self) -> InventoryResult<Vec<Company>> {
        let mut companies: Vec<Company> =
            self.companies.read().unwrap().values().cloned().collect();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies)
    }

    async fn list_purchases(
        &self,
        company_id: Uuid,
        material: Option<Material>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> InventoryResult<Vec<PurchaseLine>> {
        let purchases = self.purchases.read().unwrap();
        let filtered: Vec<PurchaseLine> = purchases
            .values()
            .filter(|line| {
                line.company_id == company_id
                    && material.is_none_or(|m| line.material == m)
                    && line.date >= start
                    && line.date <= end
            })
            .cloned()
            .collect();
        Ok(filtered)
    }

    async fn list_sales(
        &self,
        company_id: Uuid,
        channel: SaleChannel,
        material: Option<Material>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> InventoryResult<Vec<SaleRecord>> {
        let sales = self.sales.read().unwrap();
        let filtered: Vec<SaleRecord> = sales
            .values()
            .filter(|sale| {
                sale.company_id == company_id
                    && sale.channel == channel
                    && material.is_none_or(|m| sale.material == m)
                    && sale.date >= start
                    && sale.date <= end
            })
            .cloned()
            .collect();
        Ok(filtered)
    }

    async fn list_expenses(
        &self,
        company_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> InventoryResult<Vec<ExpenseRecord>> {
        let expenses = self.expenses.read().unwrap();
        let filtered: Vec<ExpenseRecord> = expenses
            .values()
            .filter(|e| e.company_id == company_id && e.date >= start && e.date <= end)
            .cloned()
            .collect();
        Ok(filtered)
    }

    async fn prior_balances(
        &self,
        company_id: Uuid,
        year: i32,
    ) -> InventoryResult<Vec<PriorBalanceSnapshot>> {
        let balances = self.balances.read().unwrap();
        Ok(balances
            .iter()
            .filter(|b| b.company_id == company_id && b.year == year)
            .cloned()
            .collect())
    }
}

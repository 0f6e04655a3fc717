//! Core types and data structures for the inventory reconciliation engine

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed material catalog shared by purchases, sales, and balance snapshots.
///
/// The catalog is closed and ordered: reports lay out two columns per
/// material in exactly this order, so the variants must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Material {
    Fierro,
    Lamina,
    Cobre,
    Bronce,
    Aluminio,
    Bote,
    Archivo,
    Carton,
    Plastico,
    Pet,
    Baterias,
    Vidrio,
}

impl Material {
    /// Canonical catalog order; drives report column layout.
    pub const ALL: [Material; 12] = [
        Material::Fierro,
        Material::Lamina,
        Material::Cobre,
        Material::Bronce,
        Material::Aluminio,
        Material::Bote,
        Material::Archivo,
        Material::Carton,
        Material::Plastico,
        Material::Pet,
        Material::Baterias,
        Material::Vidrio,
    ];

    /// Display label as recorded on purchase and sale tickets.
    pub fn label(&self) -> &'static str {
        match self {
            Material::Fierro => "FIERRO",
            Material::Lamina => "LAMINA",
            Material::Cobre => "COBRE",
            Material::Bronce => "BRONCE",
            Material::Aluminio => "ALUMINIO",
            Material::Bote => "BOTE",
            Material::Archivo => "ARCHIVO",
            Material::Carton => "CARTON",
            Material::Plastico => "PLASTICO",
            Material::Pet => "PET",
            Material::Baterias => "BATERIAS",
            Material::Vidrio => "VIDRIO",
        }
    }

    /// Stable position within the catalog.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Sale channel: wholesale ("general") or on-site cash ("patio").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleChannel {
    /// Standard wholesale sale.
    General,
    /// On-site, cash-settled sale; unit price may be corrected after creation.
    Patio,
}

impl SaleChannel {
    pub fn label(&self) -> &'static str {
        match self {
            SaleChannel::General => "general",
            SaleChannel::Patio => "patio",
        }
    }
}

/// A trading company whose books are reconciled independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
}

/// One material line within a purchase batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseLine {
    pub id: Uuid,
    /// Batch the line was recorded under; lines die with their batch.
    pub batch_id: Uuid,
    pub company_id: Uuid,
    pub material: Material,
    /// Weight in kg, 3-decimal precision.
    pub kgs: BigDecimal,
    /// Price per kg, 2-decimal precision.
    pub unit_price: BigDecimal,
    /// Line total; fixed at creation as `kgs * unit_price`.
    pub amount: BigDecimal,
    pub date: NaiveDate,
}

impl PurchaseLine {
    pub fn new(
        batch_id: Uuid,
        company_id: Uuid,
        material: Material,
        date: NaiveDate,
        kgs: BigDecimal,
        unit_price: BigDecimal,
    ) -> Self {
        let amount = (&kgs * &unit_price).round(2);
        Self {
            id: Uuid::new_v4(),
            batch_id,
            company_id,
            material,
            kgs,
            unit_price,
            amount,
            date,
        }
    }
}

/// A recorded sale on either channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: Uuid,
    pub company_id: Uuid,
    pub material: Material,
    pub channel: SaleChannel,
    pub kgs: BigDecimal,
    pub unit_price: BigDecimal,
    pub amount: BigDecimal,
    pub date: NaiveDate,
}

impl SaleRecord {
    pub fn new(
        company_id: Uuid,
        channel: SaleChannel,
        material: Material,
        date: NaiveDate,
        kgs: BigDecimal,
        unit_price: BigDecimal,
    ) -> Self {
        let amount = (&kgs * &unit_price).round(2);
        Self {
            id: Uuid::new_v4(),
            company_id,
            material,
            channel,
            kgs,
            unit_price,
            amount,
            date,
        }
    }

    /// Re-price the sale, keeping quantity and date fixed.
    ///
    /// Only patio sales are created with a provisional (possibly zero) price
    /// and settled later; general sales are priced at creation.
    pub fn reprice(&mut self, unit_price: BigDecimal) -> InventoryResult<()> {
        if self.channel != SaleChannel::Patio {
            return Err(InventoryError::Validation(format!(
                "only patio sales can be re-priced, sale {} is '{}'",
                self.id,
                self.channel.label()
            )));
        }
        self.amount = (&self.kgs * &unit_price).round(2);
        self.unit_price = unit_price;
        Ok(())
    }
}

/// A miscellaneous expense; read by the reporting pipeline only to decide
/// whether a period has anything to export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub company_id: Uuid,
    pub description: String,
    pub amount: BigDecimal,
    pub date: NaiveDate,
}

/// Manually entered inventory baseline for a material at a year boundary.
///
/// Read-only input to the reconciliation ledger; the engine sums all rows of
/// a (company, year) per material to seed the first week of the next year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorBalanceSnapshot {
    pub company_id: Uuid,
    pub year: i32,
    pub material: Material,
    pub kgs: BigDecimal,
    pub amount: BigDecimal,
    pub note: Option<String>,
}

/// An inclusive Monday-to-Sunday date range, clipped to its month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Per-material running ledger state: the figure carried into the next week.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CarryBalance {
    pub kgs: BigDecimal,
    pub amount: BigDecimal,
}

impl CarryBalance {
    pub fn new(kgs: BigDecimal, amount: BigDecimal) -> Self {
        Self { kgs, amount }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.kgs == BigDecimal::from(0) && self.amount == BigDecimal::from(0)
    }

    /// The "Semana anterior" ledger line is the carry with both fields negated.
    pub fn negated(&self) -> Self {
        Self {
            kgs: -&self.kgs,
            amount: -&self.amount,
        }
    }
}

/// Summed quantity and amount for one material over one aggregation window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialTotals {
    pub kgs: BigDecimal,
    pub amount: BigDecimal,
}

impl MaterialTotals {
    pub fn new(kgs: BigDecimal, amount: BigDecimal) -> Self {
        Self { kgs, amount }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.kgs == BigDecimal::from(0) && self.amount == BigDecimal::from(0)
    }
}

/// Errors that can occur while reconciling or rendering reports
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("company not found: {0}")]
    CompanyNotFound(Uuid),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("no data to export for the requested period")]
    EmptyResult,
    #[error("render error: {0}")]
    Render(String),
}

impl From<rust_xlsxwriter::XlsxError> for InventoryError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        InventoryError::Render(err.to_string())
    }
}

/// Result type for reconciliation and reporting operations
pub type InventoryResult<T> = Result<T, InventoryError>;

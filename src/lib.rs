//! # Scrapyard Core
//!
//! Weekly inventory reconciliation and report generation for a scrap-metal
//! trading back office.
//!
//! ## Features
//!
//! - **Week partitioning**: deterministic Monday-start weeks clipped to
//!   month boundaries, 4-6 per month
//! - **Transaction aggregation**: per-material purchase and sale totals over
//!   any date range, with zero-filled inactive materials
//! - **Reconciliation ledger**: an ordered weekly fold carrying per-material
//!   balances across months and years, seeded from prior-year snapshots
//! - **Report rendering**: styled xlsx workbooks, one sheet per month, with
//!   live TOTAL formulas mirroring the ledger arithmetic
//! - **Storage abstraction**: database-agnostic design with a trait-based
//!   store and an in-memory implementation for tests
//!
//! ## Quick Start
//!
//! ```rust
//! use scrapyard_core::utils::MemoryStore;
//! use scrapyard_core::InventoryReporter;
//!
//! # async fn run() -> scrapyard_core::InventoryResult<()> {
//! let store = MemoryStore::new();
//! let company = store.add_company("Recicladora del Norte");
//! let reporter = InventoryReporter::new(store);
//! let report = reporter.inventory_report(company.id, 2024).await?;
//! assert_eq!(report.filename, "inventario_2024.xlsx");
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod calendar;
pub mod ledger;
pub mod report;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use aggregate::*;
pub use calendar::*;
pub use ledger::*;
pub use report::*;
pub use traits::*;
pub use types::*;

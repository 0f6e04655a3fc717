//! Inventory reconciliation ledger: the ordered weekly carry walk

pub mod engine;
pub mod week;

pub use engine::ReconciliationEngine;
pub use week::{
    seed_carry_from_snapshots, settle_week, zero_carry, CarryMap, MaterialWeek, WeekLedger,
};

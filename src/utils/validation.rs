//! Validation utilities

use bigdecimal::BigDecimal;

use crate::types::{InventoryError, InventoryResult};

/// Earliest year a report can be generated for
pub const MIN_REPORT_YEAR: i32 = 2000;

/// Latest year a report can be generated for
pub const MAX_REPORT_YEAR: i32 = 2100;

/// Validate that a report year is within the supported range
pub fn validate_year(year: i32) -> InventoryResult<()> {
    if !(MIN_REPORT_YEAR..=MAX_REPORT_YEAR).contains(&year) {
        return Err(InventoryError::Validation(format!(
            "year {year} outside supported range {MIN_REPORT_YEAR}-{MAX_REPORT_YEAR}"
        )));
    }
    Ok(())
}

/// Validate that a month index is 1-12
pub fn validate_month(month: u32) -> InventoryResult<()> {
    if !(1..=12).contains(&month) {
        return Err(InventoryError::Validation(format!(
            "month {month} outside 1-12"
        )));
    }
    Ok(())
}

/// Validate that a recorded weight is strictly positive
pub fn validate_quantity(kgs: &BigDecimal) -> InventoryResult<()> {
    if *kgs <= BigDecimal::from(0) {
        return Err(InventoryError::Validation(
            "quantity must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Validate that a unit price is not negative
///
/// Zero is allowed: patio sales are recorded with a provisional zero price
/// and settled later.
pub fn validate_unit_price(price: &BigDecimal) -> InventoryResult<()> {
    if *price < BigDecimal::from(0) {
        return Err(InventoryError::Validation(
            "unit price cannot be negative".to_string(),
        ));
    }
    Ok(())
}

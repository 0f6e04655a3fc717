//! Calendar partitioning: Monday-start weeks clipped to month boundaries
//!
//! The partition is a pure function of (year, month). Every day of the month
//! belongs to exactly one week of that month, so the reconciliation walk
//! never counts a transaction twice at a month boundary.

use chrono::{Datelike, Duration, NaiveDate};

use crate::types::{InventoryError, InventoryResult, WeekRange};
use crate::utils::validation::{validate_month, validate_year};

/// Split a month into ordered Monday-to-Sunday week ranges.
///
/// The first range starts at the later of the month's first day and the
/// Monday of the week containing it; the last range ends at the month's last
/// day. Depending on alignment a month yields 4 to 6 ranges, and the first
/// or last one may span a single day.
pub fn weeks_of_month(year: i32, month: u32) -> InventoryResult<Vec<WeekRange>> {
    validate_year(year)?;
    validate_month(month)?;

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        InventoryError::Validation(format!("invalid calendar month {year}-{month:02}"))
    })?;
    let last = month_end(year, month)?;

    let mut monday = first - Duration::days(i64::from(first.weekday().num_days_from_monday()));
    let mut weeks = Vec::new();
    while monday <= last {
        let sunday = monday + Duration::days(6);
        weeks.push(WeekRange {
            start: monday.max(first),
            end: sunday.min(last),
        });
        monday += Duration::days(7);
    }

    Ok(weeks)
}

/// Inclusive January 1 to December 31 range for full-year queries.
pub fn year_span(year: i32) -> InventoryResult<WeekRange> {
    validate_year(year)?;
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| InventoryError::Validation(format!("invalid year {year}")))?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| InventoryError::Validation(format!("invalid year {year}")))?;
    Ok(WeekRange { start, end })
}

fn month_end(year: i32, month: u32) -> InventoryResult<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|d| d - Duration::days(1))
        .ok_or_else(|| InventoryError::Validation(format!("invalid calendar month {year}-{month:02}")))
}

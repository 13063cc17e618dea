//! Academic calendar.
//!
//! Fixes the twelve-month order of an academic session (April first) and
//! translates between month names, session positions, and calendar dates.

use chrono::{Datelike, NaiveDate};

use crate::error::EngineResult;
use crate::models::AcademicMonth;

/// Session position of the first month of the academic year (April).
pub const SESSION_START_INDEX: usize = 0;

/// The twelve months of a session in canonical order.
///
/// # Example
///
/// ```
/// use school_fee_engine::calculation::academic_months;
/// use school_fee_engine::models::AcademicMonth;
///
/// let months = academic_months();
/// assert_eq!(months[0], AcademicMonth::April);
/// assert_eq!(months[11], AcademicMonth::March);
/// ```
pub fn academic_months() -> [AcademicMonth; 12] {
    AcademicMonth::ALL
}

/// Session position (0..=11, April = 0) of a month given by name.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::UnknownMonth`] if `name` is not one of
/// the twelve month names.
///
/// # Example
///
/// ```
/// use school_fee_engine::calculation::month_index;
///
/// assert_eq!(month_index("April").unwrap(), 0);
/// assert_eq!(month_index("January").unwrap(), 9);
/// assert!(month_index("Apr").is_err());
/// ```
pub fn month_index(name: &str) -> EngineResult<usize> {
    Ok(name.parse::<AcademicMonth>()?.academic_index())
}

/// Session position of the session-start month.
pub fn session_start_index() -> usize {
    SESSION_START_INDEX
}

/// Zero-based calendar month of a date (January = 0).
pub fn calendar_month_index(date: NaiveDate) -> u32 {
    date.month0()
}

//! Date text boundary for the estimator.
//!
//! Batch dates cross the boundary in UK order (`day/month/year`, no zero
//! padding, e.g. `7/3/2025`), and months are labelled by their 3-letter
//! English abbreviation. Formatting and parsing are symmetric for every valid
//! calendar date.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Month abbreviations, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Reasons a `day/month/year` string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("expected day/month/year, got {0:?}")]
    Shape(String),

    #[error("non-numeric date component {0:?}")]
    Component(String),

    #[error("{day}/{month}/{year} is not a calendar date")]
    OutOfRange { day: u32, month: u32, year: i32 },
}

// ---

/// Format a date as `day/month/year`.
pub fn format_uk_date(date: NaiveDate) -> String {
    // ---
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// Parse a `day/month/year` string.
///
/// Components are trimmed; anything that is not exactly three numeric parts
/// naming a real calendar day (no rollover of `31/2/2025` into March) is
/// rejected.
pub fn parse_uk_date(text: &str) -> Result<NaiveDate, DateParseError> {
    // ---
    let parts: Vec<&str> = text.trim().split('/').map(str::trim).collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(DateParseError::Shape(text.to_string()));
    };

    let day: u32 = day
        .parse()
        .map_err(|_| DateParseError::Component((*day).to_string()))?;
    let month: u32 = month
        .parse()
        .map_err(|_| DateParseError::Component((*month).to_string()))?;
    let year: i32 = year
        .parse()
        .map_err(|_| DateParseError::Component((*year).to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(DateParseError::OutOfRange { day, month, year })
}

/// Abbreviation for a 1-based month number, `None` outside 1..=12.
pub fn month_abbreviation(month: u32) -> Option<&'static str> {
    // ---
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_ABBREVIATIONS.get(index).copied()
}

/// 1-based month number for an abbreviation. Case-sensitive, like the labels
/// this crate produces.
pub fn month_number(abbreviation: &str) -> Option<u32> {
    // ---
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| *m == abbreviation)
        .and_then(|i| u32::try_from(i + 1).ok())
}
